//! Scenario state for the listing controller BDD tests.

use std::collections::HashMap;
use std::sync::Arc;

use certlist::models::test_support::numbered_certificates;
use certlist::{
    CompletionOutcome, DemoCatalogGateway, ErrorLog, FetchTicket, ListingStateController,
    MemoryQueryStore,
};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use tokio::runtime::Builder;

/// Controller over the in-memory demo catalogue.
pub(crate) type DemoController =
    ListingStateController<DemoCatalogGateway, MemoryQueryStore, ErrorLog>;

#[derive(ScenarioState, Default)]
pub(crate) struct ControllerState {
    /// Controller under test.
    pub(crate) controller: Slot<DemoController>,
    /// Ticket of the most recent transition, not yet fetched.
    pub(crate) pending: Slot<FetchTicket>,
    /// Tickets issued by searches, keyed by search text.
    pub(crate) searches: Slot<HashMap<String, FetchTicket>>,
    /// Outcomes of completed searches, keyed by search text.
    pub(crate) outcomes: Slot<HashMap<String, CompletionOutcome>>,
}

/// Builds a controller over `count` numbered certificates.
pub(crate) fn demo_controller(count: u64, store: MemoryQueryStore) -> DemoController {
    let gateway = Arc::new(DemoCatalogGateway::new(numbered_certificates(count)));
    ListingStateController::new(gateway, store, ErrorLog::default())
}

/// Runs `future` to completion on a fresh current-thread runtime.
pub(crate) fn block_on<F: std::future::Future>(future: F) -> F::Output {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|error| panic!("failed to create Tokio runtime: {error}"))
        .block_on(future)
}
