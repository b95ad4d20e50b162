//! Admin certificate listing operation.

use std::io::{self, Write};
use std::sync::Arc;

use certlist::{
    AccessToken, CertlistConfig, ErrorLog, FetchTicket, FileQueryStore, HttpListingGateway,
    ListingError, ListingGateway, ListingStateController, MemoryQueryStore, QueryStore,
};
use tracing::debug;

use super::output::{
    io_error, write_certificates, write_error_log, write_page_navigation, write_sort_headers,
};

/// Sort cycle length; a field returns to unsorted after this many steps.
const SORT_CYCLE: usize = 3;

/// Lists one page of certificates from the backend.
///
/// # Errors
///
/// Returns [`ListingError::Configuration`] if configuration is invalid and
/// [`ListingError::Io`] when state or output cannot be written. Fetch
/// failures are listed in the output instead.
pub async fn run(config: &CertlistConfig) -> Result<(), ListingError> {
    let mut stdout = io::stdout().lock();
    run_with_gateway_builder(config, HttpListingGateway::new, &mut stdout).await
}

/// Lists certificates using a custom gateway builder.
///
/// This function is exposed for testing with mock gateways.
pub async fn run_with_gateway_builder<G, F, W>(
    config: &CertlistConfig,
    build_gateway: F,
    writer: &mut W,
) -> Result<(), ListingError>
where
    G: ListingGateway,
    F: FnOnce(&str, Option<AccessToken>) -> Result<G, ListingError>,
    W: Write,
{
    let token = config.resolve_token().map(AccessToken::new).transpose()?;
    let gateway = Arc::new(build_gateway(config.resolve_base_url(), token)?);

    match config.state_file.as_deref() {
        Some(path) => list_with_store(config, gateway, FileQueryStore::new(path), writer).await,
        None => list_with_store(config, gateway, MemoryQueryStore::default(), writer).await,
    }
}

async fn list_with_store<G, S, W>(
    config: &CertlistConfig,
    gateway: Arc<G>,
    store: S,
    writer: &mut W,
) -> Result<(), ListingError>
where
    G: ListingGateway,
    S: QueryStore,
    W: Write,
{
    let mut controller = ListingStateController::new(gateway, store, ErrorLog::default());
    let initial = match config.query.as_deref() {
        Some(canonical) => controller.restore(canonical),
        None => controller.load(),
    };
    let ticket = apply_requests(config, &mut controller, initial)?;

    let outcome = controller.execute(ticket).await;
    debug!(?outcome, query = %controller.query(), "listing settled");

    write_listing(writer, &controller)?;
    controller.save()
}

/// Applies the command-line requests in the order a user would click them.
///
/// Only the last ticket is fetched; earlier ones are superseded.
fn apply_requests<G, S>(
    config: &CertlistConfig,
    controller: &mut ListingStateController<G, S, ErrorLog>,
    initial: FetchTicket,
) -> Result<FetchTicket, ListingError>
where
    G: ListingGateway,
    S: QueryStore,
{
    let mut ticket = initial;

    if let Some(search) = config.search.as_deref() {
        ticket = controller.set_filter(search);
    }
    if let Some(page_size) = config.page_size()? {
        ticket = controller.set_page_size(page_size);
    }
    if let Some(target) = config.sort_request()? {
        for _ in 0..SORT_CYCLE {
            if controller.query().sort() == Some(target) {
                break;
            }
            ticket = controller.set_sort(target.field);
        }
    }
    if let Some(page) = config.page {
        ticket = controller.set_page(page);
    }

    Ok(ticket)
}

fn write_listing<G, S, W>(
    writer: &mut W,
    controller: &ListingStateController<G, S, ErrorLog>,
) -> Result<(), ListingError>
where
    G: ListingGateway,
    S: QueryStore,
    W: Write,
{
    let query = controller.query();
    let total_pages = controller.total_pages().unwrap_or(1);
    let found = controller
        .result()
        .and_then(|result| result.found_items)
        .map_or_else(String::new, |found| format!(", {found} found"));

    writeln!(
        writer,
        "Gift certificates: page {} of {total_pages}{found}",
        query.page()
    )
    .map_err(|e| io_error(&e))?;
    write_sort_headers(writer, &controller.sort_headers())?;
    write_certificates(writer, controller.items())?;
    write_page_navigation(writer, &controller.page_navigation())?;

    let search = controller.search_text();
    if !search.is_empty() {
        writeln!(writer, "Search: {search}").map_err(|e| io_error(&e))?;
    }
    writeln!(writer, "Query: {query}").map_err(|e| io_error(&e))?;
    write_error_log(writer, controller.errors())
}
