//! Behavioural tests for listing certificates from an HTTP backend.

#[path = "backend_listing_bdd/mod.rs"]
mod backend_listing_bdd_support;

use std::sync::Arc;

use backend_listing_bdd_support::{BackendState, ensure_runtime_and_server, mount_listing_response};
use certlist::models::test_support::numbered_certificates;
use certlist::{
    AccessToken, ErrorLog, HttpListingGateway, ListingResult, ListingStateController,
    MemoryQueryStore,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::json;
use wiremock::{MockServer, ResponseTemplate};

#[fixture]
fn backend_state() -> BackendState {
    BackendState::default()
}

fn error_log_lines(backend_state: &BackendState) -> Vec<String> {
    backend_state
        .controller
        .with_ref(|controller| {
            controller
                .errors()
                .entries()
                .iter()
                .map(|entry| {
                    format!(
                        "status {}: {}",
                        entry.report.status_code, entry.report.message
                    )
                })
                .collect()
        })
        .unwrap_or_else(|| panic!("listing has not run"))
}

fn listed_count(backend_state: &BackendState) -> usize {
    backend_state
        .controller
        .with_ref(|controller| controller.items().len())
        .unwrap_or_else(|| panic!("listing has not run"))
}

// Given steps

#[given("a certificate backend serving {count:u64} certificates on each of {pages:u32} pages")]
fn given_backend_with_pages(backend_state: &BackendState, count: u64, pages: u32) {
    let found = count.saturating_mul(u64::from(pages));
    let body = ListingResult::new(numbered_certificates(count), pages).with_found_items(found);
    mount_listing_response(backend_state, ResponseTemplate::new(200).set_body_json(&body));
}

#[given("a certificate backend answering {status:u16} with \"{message}\"")]
fn given_backend_failing(backend_state: &BackendState, status: u16, message: String) {
    let body = json!({ "errorMessage": message });
    mount_listing_response(backend_state, ResponseTemplate::new(status).set_body_json(body));
}

// When steps

#[when("the listing fetches \"{canonical}\"")]
fn when_listing_fetches(backend_state: &BackendState, canonical: String) {
    let runtime = ensure_runtime_and_server(backend_state);
    let base_url = backend_state
        .server
        .with_ref(MockServer::uri)
        .unwrap_or_else(|| panic!("mock server URL missing"));

    let token = AccessToken::new("admin-token").unwrap_or_else(|error| panic!("{error}"));
    let gateway = HttpListingGateway::new(&base_url, Some(token))
        .unwrap_or_else(|error| panic!("failed to create gateway: {error}"));
    let mut controller = ListingStateController::new(
        Arc::new(gateway),
        MemoryQueryStore::default(),
        ErrorLog::default(),
    );

    let ticket = controller.restore(&canonical);
    let _outcome = runtime.block_on(controller.execute(ticket));
    backend_state.controller.set(controller);
}

// Then steps

#[then("{count:usize} certificates are listed")]
fn then_certificates_listed(backend_state: &BackendState, count: usize) {
    assert_eq!(listed_count(backend_state), count, "listed count mismatch");
}

#[then("no certificates are listed")]
fn then_no_certificates_listed(backend_state: &BackendState) {
    assert_eq!(listed_count(backend_state), 0, "expected an empty listing");
}

#[then("the listing spans {pages:u32} pages")]
fn then_listing_spans(backend_state: &BackendState, pages: u32) {
    let total = backend_state
        .controller
        .with_ref(|controller| controller.total_pages())
        .unwrap_or_else(|| panic!("listing has not run"));
    assert_eq!(total, Some(pages));
}

#[then("the query page is {page:u32}")]
fn then_query_page_is(backend_state: &BackendState, page: u32) {
    let actual = backend_state
        .controller
        .with_ref(|controller| controller.query().page())
        .unwrap_or_else(|| panic!("listing has not run"));
    assert_eq!(actual, page, "query page mismatch");
}

#[then("the error log is empty")]
fn then_error_log_empty(backend_state: &BackendState) {
    let lines = error_log_lines(backend_state);
    assert!(lines.is_empty(), "unexpected errors: {lines:?}");
}

#[then("the error log reads \"{line}\"")]
fn then_error_log_reads(backend_state: &BackendState, line: String) {
    assert_eq!(error_log_lines(backend_state), vec![line]);
}

#[scenario(path = "tests/features/backend_listing.feature", index = 0)]
fn backend_page_is_listed(backend_state: BackendState) {
    let _ = backend_state;
}

#[scenario(path = "tests/features/backend_listing.feature", index = 1)]
fn page_past_the_end_is_refetched(backend_state: BackendState) {
    let _ = backend_state;
}

#[scenario(path = "tests/features/backend_listing.feature", index = 2)]
fn rejected_token_is_reported(backend_state: BackendState) {
    let _ = backend_state;
}

#[scenario(path = "tests/features/backend_listing.feature", index = 3)]
fn missing_resource_is_reported(backend_state: BackendState) {
    let _ = backend_state;
}
