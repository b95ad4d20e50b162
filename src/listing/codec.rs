//! Canonical query-string encoding for [`ListingQuery`].
//!
//! The canonical form is what the listing persists between sessions and
//! what it sends to the backend:
//!
//! ```text
//! page=2&size=20&s:gc.price=desc&f:gc.name=shoes&f:t.name=sale
//! ```
//!
//! `page` and `size` are always written, followed by the sort pair when a
//! sort is active and then one `f:` pair per filter in query order. Terms
//! are form-urlencoded; keys are written verbatim.

use tracing::trace;
use url::form_urlencoded;

use super::error::ListingError;
use super::query::{Filter, FilterField, ListingQuery, PageSize, Sort, SortDirection, SortField};

const PAGE_KEY: &str = "page";
const SIZE_KEY: &str = "size";
const SORT_PREFIX: &str = "s:";
const FILTER_PREFIX: &str = "f:";

/// Encodes `query` in canonical form.
pub(crate) fn encode(query: &ListingQuery) -> String {
    let mut pairs = vec![
        format!("{PAGE_KEY}={}", query.page()),
        format!("{SIZE_KEY}={}", query.page_size()),
    ];

    if let Some(sort) = query.sort() {
        pairs.push(format!(
            "{SORT_PREFIX}{}={}",
            sort.field.wire_name(),
            sort.direction.as_str()
        ));
    }

    pairs.extend(query.filters().iter().map(|filter| {
        let term: String = form_urlencoded::byte_serialize(filter.term.as_bytes()).collect();
        format!("{FILTER_PREFIX}{}={term}", filter.field.wire_name())
    }));

    pairs.join("&")
}

/// Decodes a canonical query string.
///
/// Missing keys keep their defaults and unknown keys are skipped.
pub(crate) fn decode(input: &str) -> Result<ListingQuery, ListingError> {
    let trimmed = input.trim();
    let body = trimmed.strip_prefix('?').unwrap_or(trimmed);

    let mut page: Option<u32> = None;
    let mut page_size: Option<PageSize> = None;
    let mut sort: Option<Sort> = None;
    let mut sort_seen = false;
    let mut filters = Vec::new();

    for (key, value) in form_urlencoded::parse(body.as_bytes()) {
        if key == PAGE_KEY {
            page = Some(parse_page(&value)?);
        } else if key == SIZE_KEY {
            page_size = Some(parse_size(&value)?);
        } else if let Some(field_name) = key.strip_prefix(SORT_PREFIX) {
            if sort_seen {
                return Err(ListingError::malformed("more than one sort pair"));
            }
            sort_seen = true;
            sort = parse_sort(field_name, &value)?;
        } else if let Some(field_name) = key.strip_prefix(FILTER_PREFIX) {
            filters.push(parse_filter(field_name, &value)?);
        } else {
            trace!(key = %key, "ignoring unknown listing query key");
        }
    }

    let mut query = ListingQuery::default()
        .with_sort(sort)
        .with_filters(filters);
    if let Some(number) = page {
        query = query.with_page(number);
    }
    if let Some(size) = page_size {
        query = query.with_page_size(size);
    }
    Ok(query)
}

fn parse_page(value: &str) -> Result<u32, ListingError> {
    match value.trim().parse::<u32>() {
        Ok(0) => Err(ListingError::malformed("page must be at least 1")),
        Ok(number) => Ok(number),
        Err(error) => Err(ListingError::malformed(format!(
            "page '{value}' is not a number: {error}"
        ))),
    }
}

fn parse_size(value: &str) -> Result<PageSize, ListingError> {
    let raw = value.trim().parse::<u32>().map_err(|error| {
        ListingError::malformed(format!("size '{value}' is not a number: {error}"))
    })?;
    PageSize::try_from(raw)
}

/// An empty direction is the neutral sort button and means no sort.
fn parse_sort(field_name: &str, value: &str) -> Result<Option<Sort>, ListingError> {
    let field = SortField::from_wire(field_name)
        .ok_or_else(|| ListingError::malformed(format!("unknown sort field '{field_name}'")))?;
    let direction_text = value.trim();
    if direction_text.is_empty() {
        return Ok(None);
    }
    let direction = SortDirection::parse(direction_text)?;
    Ok(Some(Sort::new(field, direction)))
}

fn parse_filter(field_name: &str, value: &str) -> Result<Filter, ListingError> {
    let field = FilterField::from_wire(field_name)
        .ok_or_else(|| ListingError::malformed(format!("unknown filter field '{field_name}'")))?;
    if value.is_empty() {
        return Err(ListingError::malformed(format!(
            "filter on '{field_name}' has an empty term"
        )));
    }
    Ok(Filter::new(field, value))
}
