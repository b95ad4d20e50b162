//! Support modules for the backend listing BDD tests.

pub(crate) mod state;

pub(crate) use state::{BackendState, ensure_runtime_and_server, mount_listing_response};
