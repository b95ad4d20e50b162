//! Storefront scrolling over the demo catalogue.

use std::io::{self, Write};

use certlist::catalog::{STOREFRONT_PAGE_SIZE, demo_catalog};
use certlist::listing::parse_search;
use certlist::{
    CertlistConfig, DemoCatalogGateway, FileQueryStore, GiftCertificate, ListingError,
    ListingQuery, MemoryQueryStore, QueryStore, ScrollState,
};
use chrono::Utc;
use tracing::{debug, warn};

use super::output::{io_error, write_certificates};

/// Shows the storefront catalogue, resuming from the saved scroll position.
///
/// # Errors
///
/// Returns [`ListingError::Configuration`] for an invalid sort and
/// [`ListingError::Io`] if output or the scroll position cannot be written.
pub fn run(config: &CertlistConfig) -> Result<(), ListingError> {
    let mut stdout = io::stdout().lock();
    let catalog = demo_catalog(Utc::now());
    match config.state_file.as_deref() {
        Some(path) => run_with_catalog(config, catalog, &mut FileQueryStore::new(path), &mut stdout),
        None => run_with_catalog(
            config,
            catalog,
            &mut MemoryQueryStore::default(),
            &mut stdout,
        ),
    }
}

/// Shows the storefront for a custom catalogue and scroll store.
///
/// The stored query supplies the search, the sort and the page scrolled to.
/// A different search or sort starts again from the first page. The page
/// reached is written back to `store`.
pub fn run_with_catalog<S: QueryStore, W: Write>(
    config: &CertlistConfig,
    catalog: Vec<GiftCertificate>,
    store: &mut S,
    writer: &mut W,
) -> Result<(), ListingError> {
    let saved = saved_query(config, store);
    let query = storefront_query(config, saved.clone())?;
    let resumed_page = if query.sort() == saved.sort() && query.filters() == saved.filters() {
        saved.page()
    } else {
        1
    };
    let matched = DemoCatalogGateway::new(catalog).matching(&query);

    let requested =
        usize::try_from(resumed_page.max(config.scroll_pages)).unwrap_or(usize::MAX);
    let scroll = ScrollState::restore(STOREFRONT_PAGE_SIZE, matched.len(), requested);
    debug!(
        page = scroll.current_page(),
        total = scroll.total_pages(),
        "storefront scrolled"
    );

    let visible = scroll.visible(&matched);
    write_certificates(writer, visible)?;
    writeln!(writer, "Showing {} of {}", visible.len(), matched.len())
        .map_err(|e| io_error(&e))?;

    let footer = if scroll.has_next() {
        "Scroll for more"
    } else {
        "End of catalogue"
    };
    writeln!(writer, "{footer}").map_err(|e| io_error(&e))?;

    let reached = u32::try_from(scroll.current_page()).unwrap_or(u32::MAX);
    store.save(&query.with_page(reached).to_canonical_string())
}

/// Returns the `--query` deep link, else the stored query, else defaults.
fn saved_query<S: QueryStore>(config: &CertlistConfig, store: &S) -> ListingQuery {
    let canonical = config.query.clone().or_else(|| {
        store.load().unwrap_or_else(|error| {
            warn!(%error, "could not read saved storefront position");
            None
        })
    });
    canonical.map_or_else(ListingQuery::default, |text| {
        ListingQuery::from_canonical_string(&text).unwrap_or_else(|error| {
            warn!(%error, "ignoring unusable storefront query");
            ListingQuery::default()
        })
    })
}

/// Applies the configured search and sort on top of `base`.
fn storefront_query(
    config: &CertlistConfig,
    base: ListingQuery,
) -> Result<ListingQuery, ListingError> {
    let with_search = match config.search.as_deref() {
        Some(search) => base.with_filters(parse_search(search)),
        None => base,
    };
    Ok(match config.sort_request()? {
        Some(sort) => with_search.with_sort(Some(sort)),
        None => with_search,
    })
}
