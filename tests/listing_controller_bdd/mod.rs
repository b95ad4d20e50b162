//! Support modules for the listing controller BDD tests.

pub(crate) mod state;

pub(crate) use state::{ControllerState, DemoController, block_on, demo_controller};
