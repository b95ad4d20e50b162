//! Behavioural tests for the listing state controller.

#[path = "listing_controller_bdd/mod.rs"]
mod listing_controller_bdd_support;

use certlist::listing::FetchCompletion;
use certlist::{CompletionOutcome, FetchTicket, MemoryQueryStore, SortField};
use listing_controller_bdd_support::{ControllerState, DemoController, block_on, demo_controller};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[fixture]
fn controller_state() -> ControllerState {
    ControllerState::default()
}

fn transition(
    controller_state: &ControllerState,
    step: impl FnOnce(&mut DemoController) -> FetchTicket,
) -> FetchTicket {
    let ticket = controller_state
        .controller
        .with_mut(step)
        .unwrap_or_else(|| panic!("controller not initialised"));
    controller_state.pending.set(ticket.clone());
    ticket
}

fn settle(controller_state: &ControllerState) {
    let ticket = controller_state
        .pending
        .take()
        .unwrap_or_else(|| panic!("no transition awaiting a fetch"));
    let _outcome = controller_state
        .controller
        .with_mut(|controller| block_on(controller.execute(ticket)))
        .unwrap_or_else(|| panic!("controller not initialised"));
}

fn with_controller<T>(
    controller_state: &ControllerState,
    read: impl FnOnce(&DemoController) -> T,
) -> T {
    controller_state
        .controller
        .with_ref(read)
        .unwrap_or_else(|| panic!("controller not initialised"))
}

// Given steps

#[given("a catalogue of {count:u64} certificates")]
fn given_catalogue(controller_state: &ControllerState, count: u64) {
    controller_state
        .controller
        .set(demo_controller(count, MemoryQueryStore::default()));
}

#[given("a stored query \"{canonical}\"")]
fn given_stored_query(controller_state: &ControllerState, canonical: String) {
    controller_state
        .controller
        .set(demo_controller(25, MemoryQueryStore::with_saved(canonical)));
}

#[given("the listing has loaded its first page")]
fn given_first_page_loaded(controller_state: &ControllerState) {
    let _first_page = transition(controller_state, DemoController::refresh);
    settle(controller_state);
}

// When steps

#[when("the user requests page {page:u32}")]
fn when_user_requests_page(controller_state: &ControllerState, page: u32) {
    let _requested = transition(controller_state, |controller| controller.set_page(page));
}

#[when("the user moves to the next page")]
fn when_user_moves_next(controller_state: &ControllerState) {
    let _next = transition(controller_state, DemoController::next_page);
}

#[when("the user moves to the last page")]
fn when_user_moves_last(controller_state: &ControllerState) {
    let _last = transition(controller_state, DemoController::last_page);
}

#[when("the user sorts by {field:SortField}")]
fn when_user_sorts(controller_state: &ControllerState, field: SortField) {
    let _sorted = transition(controller_state, |controller| controller.set_sort(field));
}

#[when("the user searches for \"{text}\"")]
fn when_user_searches(controller_state: &ControllerState, text: String) {
    let ticket = transition(controller_state, |controller| controller.set_filter(&text));
    let mut searches = controller_state.searches.take().unwrap_or_default();
    searches.insert(text, ticket);
    controller_state.searches.set(searches);
}

#[when("the listing loads its stored query")]
fn when_listing_loads(controller_state: &ControllerState) {
    let _loaded = transition(controller_state, DemoController::load);
}

#[when("the listing settles")]
fn when_listing_settles(controller_state: &ControllerState) {
    settle(controller_state);
}

#[when("the response for \"{text}\" arrives")]
fn when_response_arrives(controller_state: &ControllerState, text: String) {
    let ticket = controller_state
        .searches
        .with_ref(|searches| searches.get(&text).cloned())
        .flatten()
        .unwrap_or_else(|| panic!("no search issued for {text}"));

    let pending = with_controller(controller_state, |controller| controller.fetch(ticket));
    let completion: FetchCompletion = block_on(pending.resolve());
    let outcome = controller_state
        .controller
        .with_mut(|controller| controller.complete(completion))
        .unwrap_or_else(|| panic!("controller not initialised"));

    let mut outcomes = controller_state.outcomes.take().unwrap_or_default();
    outcomes.insert(text, outcome);
    controller_state.outcomes.set(outcomes);
}

// Then steps

#[then("the query page is {page:u32}")]
fn then_query_page_is(controller_state: &ControllerState, page: u32) {
    let actual = with_controller(controller_state, |controller| controller.query().page());
    assert_eq!(actual, page, "query page mismatch");
}

#[then("the canonical query is \"{canonical}\"")]
fn then_canonical_query_is(controller_state: &ControllerState, canonical: String) {
    let actual = with_controller(controller_state, |controller| {
        controller.query().to_canonical_string()
    });
    assert_eq!(actual, canonical);
}

#[then("certificates {first} to {last} are shown")]
fn then_certificates_shown(controller_state: &ControllerState, first: String, last: String) {
    let names: Vec<String> = with_controller(controller_state, |controller| {
        controller
            .items()
            .iter()
            .map(|item| item.name.clone())
            .collect()
    });
    assert_eq!(names.first(), Some(&first), "first certificate mismatch");
    assert_eq!(names.last(), Some(&last), "last certificate mismatch");
}

#[then("the search box reads \"{text}\"")]
fn then_search_box_reads(controller_state: &ControllerState, text: String) {
    let actual = with_controller(controller_state, DemoController::search_text);
    assert_eq!(actual, text);
}

#[then("the response for \"{text}\" is discarded")]
fn then_response_discarded(controller_state: &ControllerState, text: String) {
    let outcome = controller_state
        .outcomes
        .with_ref(|outcomes| outcomes.get(&text).cloned())
        .flatten()
        .unwrap_or_else(|| panic!("no response recorded for {text}"));
    assert_eq!(outcome, CompletionOutcome::Stale);
}

#[scenario(path = "tests/features/listing_controller.feature", index = 0)]
fn requested_page_is_clamped(controller_state: ControllerState) {
    let _ = controller_state;
}

#[scenario(path = "tests/features/listing_controller.feature", index = 1)]
fn sorting_cycles(controller_state: ControllerState) {
    let _ = controller_state;
}

#[scenario(path = "tests/features/listing_controller.feature", index = 2)]
fn paging_through_the_catalogue(controller_state: ControllerState) {
    let _ = controller_state;
}

#[scenario(path = "tests/features/listing_controller.feature", index = 3)]
fn search_text_becomes_filters(controller_state: ControllerState) {
    let _ = controller_state;
}

#[scenario(path = "tests/features/listing_controller.feature", index = 4)]
fn superseded_response_is_discarded(controller_state: ControllerState) {
    let _ = controller_state;
}

#[scenario(path = "tests/features/listing_controller.feature", index = 5)]
fn unusable_stored_state_restores_defaults(controller_state: ControllerState) {
    let _ = controller_state;
}
