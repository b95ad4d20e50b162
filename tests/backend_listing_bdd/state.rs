//! Scenario state and runtime/server initialisation for the backend listing
//! BDD tests.

use std::cell::RefCell;
use std::rc::Rc;

use certlist::{ErrorLog, HttpListingGateway, ListingStateController, MemoryQueryStore};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Route the gateway requests under the mock server root.
pub(crate) const LISTING_ROUTE: &str = "/gift/certificates/all";

/// Controller talking to the mock backend.
pub(crate) type BackendController =
    ListingStateController<HttpListingGateway, MemoryQueryStore, ErrorLog>;

/// Shared runtime wrapper that can be stored in an rstest-bdd Slot.
#[derive(Clone)]
pub(crate) struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    pub(crate) fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

#[derive(ScenarioState, Default)]
pub(crate) struct BackendState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) controller: Slot<BackendController>,
}

/// Ensures the runtime and server are initialised in `BackendState`.
pub(crate) fn ensure_runtime_and_server(backend_state: &BackendState) -> SharedRuntime {
    if backend_state.runtime.with_ref(|_| ()).is_none() {
        let runtime = Runtime::new()
            .unwrap_or_else(|error| panic!("failed to create Tokio runtime: {error}"));
        backend_state.runtime.set(SharedRuntime::new(runtime));
    }

    let shared_runtime = backend_state
        .runtime
        .get()
        .unwrap_or_else(|| panic!("runtime not initialised after set"));

    if backend_state.server.with_ref(|_| ()).is_none() {
        backend_state
            .server
            .set(shared_runtime.block_on(MockServer::start()));
    }

    shared_runtime
}

/// Answers every listing request with `response`.
pub(crate) fn mount_listing_response(backend_state: &BackendState, response: ResponseTemplate) {
    let runtime = ensure_runtime_and_server(backend_state);
    let mock = Mock::given(method("GET"))
        .and(path(LISTING_ROUTE))
        .respond_with(response);

    backend_state
        .server
        .with_ref(|server| {
            runtime.block_on(mock.mount(server));
        })
        .unwrap_or_else(|| panic!("mock server not initialised"));
}
