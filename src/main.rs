//! Certlist CLI entrypoint for the gift certificate listing.

use std::io::{self, Write};
use std::process::ExitCode;

use certlist::{CertlistConfig, ListingError, OperationMode};
use ortho_config::OrthoConfig;
use tracing_subscriber::EnvFilter;

mod cli;

const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ListingError> {
    let config = load_config()?;

    match config.operation_mode() {
        OperationMode::AdminListing => cli::admin_listing::run(&config).await,
        OperationMode::Storefront => cli::storefront::run(&config),
    }
}

/// Sends log output to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ListingError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<CertlistConfig, ListingError> {
    CertlistConfig::load().map_err(|error| ListingError::Configuration {
        message: error.to_string(),
    })
}
