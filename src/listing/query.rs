//! The listing query value type and its vocabulary.
//!
//! A [`ListingQuery`] describes what the user currently wants to see: which
//! page, how many items per page, the active sort, and the active filters.
//! Queries are plain values; every change produces a new query rather than
//! mutating one that may already be in flight.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::codec;
use super::error::ListingError;

/// Page sizes offered by the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageSize {
    /// Ten items per page.
    #[default]
    Ten,
    /// Twenty items per page.
    Twenty,
    /// Fifty items per page.
    Fifty,
}

impl PageSize {
    /// Every allowed page size, smallest first.
    pub const ALL: [Self; 3] = [Self::Ten, Self::Twenty, Self::Fifty];

    /// Returns the number of items per page.
    #[must_use]
    pub const fn get(self) -> u32 {
        match self {
            Self::Ten => 10,
            Self::Twenty => 20,
            Self::Fifty => 50,
        }
    }

    /// Returns the number of items per page as a slice length.
    #[must_use]
    pub const fn items(self) -> usize {
        match self {
            Self::Ten => 10,
            Self::Twenty => 20,
            Self::Fifty => 50,
        }
    }
}

impl TryFrom<u32> for PageSize {
    type Error = ListingError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or_else(|| {
                ListingError::malformed(format!("page size {value} is not one of 10, 20, 50"))
            })
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Fields the listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    /// Creation timestamp.
    Created,
    /// Certificate name.
    Name,
    /// Certificate description.
    Description,
    /// Certificate price.
    Price,
}

impl SortField {
    /// Every sortable field in column order.
    pub const ALL: [Self; 4] = [Self::Created, Self::Name, Self::Description, Self::Price];

    /// Returns the field name used in canonical query strings.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Created => "gc.create",
            Self::Name => "gc.name",
            Self::Description => "gc.description",
            Self::Price => "gc.price",
        }
    }

    /// Returns the column heading for the field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Created => "Datetime",
            Self::Name => "Title",
            Self::Description => "Description",
            Self::Price => "Price",
        }
    }

    /// Looks a field up by its wire name.
    #[must_use]
    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.wire_name() == name)
    }
}

impl FromStr for SortField {
    type Err = ListingError;

    /// Accepts either the wire name (`gc.name`) or the bare column name
    /// (`name`, `create`, `created`), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        if let Some(field) = Self::from_wire(&lowered) {
            return Ok(field);
        }
        match lowered.as_str() {
            "create" | "created" | "datetime" => Ok(Self::Created),
            "name" | "title" => Ok(Self::Name),
            "description" => Ok(Self::Description),
            "price" => Ok(Self::Price),
            _ => Err(ListingError::malformed(format!("unknown sort field '{s}'"))),
        }
    }
}

/// Direction of an active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Returns the direction token used in canonical query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// Parses a direction token.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::MalformedQuery`] for anything other than
    /// `asc` or `desc`.
    pub fn parse(value: &str) -> Result<Self, ListingError> {
        match value {
            "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            other => Err(ListingError::malformed(format!(
                "sort direction '{other}' must be asc or desc"
            ))),
        }
    }
}

/// The single active sort of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sort {
    /// Field being sorted.
    pub field: SortField,
    /// Direction of the sort.
    pub direction: SortDirection,
}

impl Sort {
    /// Creates a sort on `field` in `direction`.
    #[must_use]
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Returns the sort produced by activating `field` once more.
    ///
    /// Each field cycles `none -> ascending -> descending -> none`. Choosing
    /// a field other than the active one starts that field at ascending and
    /// drops the previous sort.
    #[must_use]
    pub fn cycle(current: Option<Self>, field: SortField) -> Option<Self> {
        match current {
            Some(active) if active.field == field => match active.direction {
                SortDirection::Ascending => Some(Self::new(field, SortDirection::Descending)),
                SortDirection::Descending => None,
            },
            _ => Some(Self::new(field, SortDirection::Ascending)),
        }
    }
}

/// Fields a filter term can apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    /// Certificate name contains the term.
    Name,
    /// Certificate description contains the term.
    Description,
    /// Certificate carries a tag with exactly this name.
    Tag,
}

impl FilterField {
    /// Every filterable field.
    pub const ALL: [Self; 3] = [Self::Name, Self::Description, Self::Tag];

    /// Returns the field name used in canonical query strings.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Name => "gc.name",
            Self::Description => "gc.description",
            Self::Tag => "t.name",
        }
    }

    /// Looks a field up by its wire name.
    #[must_use]
    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.wire_name() == name)
    }

    /// Returns true for the free-text fields matched by substring.
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Name | Self::Description)
    }
}

/// One `(field, term)` filter pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Filter {
    /// Field the term applies to.
    pub field: FilterField,
    /// Search term.
    pub term: String,
}

impl Filter {
    /// Creates a filter pair.
    #[must_use]
    pub fn new(field: FilterField, term: impl Into<String>) -> Self {
        Self {
            field,
            term: term.into(),
        }
    }

    /// Returns true when `item` satisfies this single term.
    ///
    /// Text fields match by case-insensitive substring; tags match by
    /// case-insensitive equality.
    #[must_use]
    pub fn matches<T: ListingItem>(&self, item: &T) -> bool {
        let term = self.term.to_lowercase();
        match self.field {
            FilterField::Name => item.name().to_lowercase().contains(&term),
            FilterField::Description => item.description().to_lowercase().contains(&term),
            FilterField::Tag => item.has_tag(&self.term),
        }
    }
}

/// Item that can be filtered and sorted locally.
pub trait ListingItem {
    /// Item name matched by [`FilterField::Name`].
    fn name(&self) -> &str;

    /// Item description matched by [`FilterField::Description`].
    fn description(&self) -> &str;

    /// Returns true when the item carries `tag`, ignoring case.
    fn has_tag(&self, tag: &str) -> bool;

    /// Orders two items by `field`, ascending.
    fn compare_by(&self, other: &Self, field: SortField) -> Ordering;
}

const DEFAULT_PAGE: u32 = 1;

/// Immutable description of the listing the user wants to see.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingQuery {
    page: u32,
    page_size: PageSize,
    sort: Option<Sort>,
    filters: Vec<Filter>,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: PageSize::default(),
            sort: None,
            filters: Vec::new(),
        }
    }
}

impl ListingQuery {
    /// Returns the 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Returns the active sort, if any.
    #[must_use]
    pub const fn sort(&self) -> Option<Sort> {
        self.sort
    }

    /// Returns the filters in the order they were supplied.
    #[must_use]
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Returns a copy of the query on `page`; zero is raised to 1.
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(DEFAULT_PAGE);
        self
    }

    /// Returns a copy of the query with a different page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Returns a copy of the query with a different sort.
    #[must_use]
    pub const fn with_sort(mut self, sort: Option<Sort>) -> Self {
        self.sort = sort;
        self
    }

    /// Returns a copy of the query with different filters.
    #[must_use]
    pub fn with_filters(mut self, filters: Vec<Filter>) -> Self {
        self.filters = filters;
        self
    }

    /// Encodes the query as its canonical query string.
    ///
    /// ```
    /// use certlist::listing::{ListingQuery, SortDirection, SortField, Sort};
    ///
    /// let query = ListingQuery::default()
    ///     .with_page(2)
    ///     .with_sort(Some(Sort::new(SortField::Name, SortDirection::Descending)));
    /// assert_eq!(query.to_canonical_string(), "page=2&size=10&s:gc.name=desc");
    /// ```
    #[must_use]
    pub fn to_canonical_string(&self) -> String {
        codec::encode(self)
    }

    /// Decodes a canonical query string.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::MalformedQuery`] when any recognised key
    /// carries an invalid value.
    pub fn from_canonical_string(input: &str) -> Result<Self, ListingError> {
        codec::decode(input)
    }

    /// Returns true when `item` passes every filter group.
    ///
    /// Name and description terms form one group and tag terms another.
    /// Terms within a group are alternatives; an item must satisfy each
    /// non-empty group.
    #[must_use]
    pub fn matches<T: ListingItem>(&self, item: &T) -> bool {
        let group_matches = |in_group: fn(FilterField) -> bool| {
            let mut terms = self
                .filters
                .iter()
                .filter(|filter| in_group(filter.field))
                .peekable();
            terms.peek().is_none() || terms.any(|filter| filter.matches(item))
        };

        group_matches(FilterField::is_text) && group_matches(|field| field == FilterField::Tag)
    }

    /// Orders two items according to the active sort.
    ///
    /// Without a sort every pair compares equal, so a stable sort keeps the
    /// source order.
    #[must_use]
    pub fn compare<T: ListingItem>(&self, left: &T, right: &T) -> Ordering {
        match self.sort {
            None => Ordering::Equal,
            Some(sort) => {
                let ordering = left.compare_by(right, sort.field);
                match sort.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            }
        }
    }
}

impl fmt::Display for ListingQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

impl FromStr for ListingQuery {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_canonical_string(s)
    }
}
