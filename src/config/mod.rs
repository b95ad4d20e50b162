//! Application configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.certlist.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `CERTLIST_BASE_URL`, `CERTLIST_TOKEN`, or
//!    legacy `GIFT_API_TOKEN`
//! 4. **Command-line arguments** – `--base-url`/`-b`, `--token`/`-t`, ...
//!
//! # Configuration File
//!
//! ```toml
//! base_url = "http://localhost:8080"
//! token = "eyJhbGciOi..."
//! state_file = "~/.cache/certlist/query"
//! size = 20
//! sort = "price:desc"
//! ```

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::listing::{ListingError, PageSize, Sort, SortDirection, SortField};

/// Backend used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Environment variable consulted when no token is configured.
pub const LEGACY_TOKEN_ENV: &str = "GIFT_API_TOKEN";

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Page through the backend listing as an administrator.
    AdminListing,
    /// Scroll the fabricated storefront catalogue.
    Storefront,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use certlist::CertlistConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = CertlistConfig::load().expect("failed to load configuration");
/// println!("listing from {}", config.resolve_base_url());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "CERTLIST",
    discovery(
        dotfile_name = ".certlist.toml",
        config_file_name = "certlist.toml",
        app_name = "certlist"
    )
)]
pub struct CertlistConfig {
    /// Root URL of the certificate backend.
    ///
    /// Can be provided via:
    /// - CLI: `--base-url <URL>` or `-b <URL>`
    /// - Environment: `CERTLIST_BASE_URL`
    /// - Config file: `base_url = "..."`
    #[ortho_config(cli_short = 'b')]
    pub base_url: Option<String>,

    /// Bearer token for the backend.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `CERTLIST_TOKEN` or `GIFT_API_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Canonical query string to start from, e.g. `page=2&size=20`.
    ///
    /// Takes precedence over the state file.
    #[ortho_config(cli_short = 'q')]
    pub query: Option<String>,

    /// File the canonical query is kept in between runs.
    ///
    /// When unset the query only lives for the current run.
    ///
    /// Can be provided via:
    /// - CLI: `--state-file <PATH>` or `-w <PATH>`
    /// - Environment: `CERTLIST_STATE_FILE`
    /// - Config file: `state_file = "..."`
    #[ortho_config(cli_short = 'w')]
    pub state_file: Option<String>,

    /// Page to show.
    #[ortho_config(cli_short = 'p')]
    pub page: Option<u32>,

    /// Items per page; one of 10, 20 or 50.
    #[ortho_config(cli_short = 's')]
    pub size: Option<u32>,

    /// Sort as `field` or `field:asc|desc`, e.g. `price:desc`.
    ///
    /// Can be provided via:
    /// - CLI: `--sort <SORT>` or `-o <SORT>`
    #[ortho_config(cli_short = 'o')]
    pub sort: Option<String>,

    /// Search box text, e.g. `shoes #(sale)`.
    #[ortho_config(cli_short = 'f')]
    pub search: Option<String>,

    /// Scrolls the demo storefront instead of the admin listing.
    ///
    /// Can be provided via:
    /// - CLI: `--storefront` / `-S`
    /// - Config file: `storefront = true`
    #[ortho_config(cli_short = 'S')]
    pub storefront: bool,

    /// Storefront pages to reveal at least.
    ///
    /// A saved scroll position further down is kept.
    #[ortho_config(cli_short = 'n')]
    pub scroll_pages: u32,
}

const DEFAULT_SCROLL_PAGES: u32 = 1;

impl Default for CertlistConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            query: None,
            state_file: None,
            page: None,
            size: None,
            sort: None,
            search: None,
            storefront: false,
            scroll_pages: DEFAULT_SCROLL_PAGES,
        }
    }
}

impl CertlistConfig {
    /// Resolves the token from configuration or the legacy `GIFT_API_TOKEN`
    /// environment variable.
    ///
    /// Returns `None` when neither source provides a value; the backend is
    /// then called without credentials.
    #[must_use]
    pub fn resolve_token(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| env::var(LEGACY_TOKEN_ENV).ok())
    }

    /// Returns the configured backend URL or [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn resolve_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Determines the operation mode based on provided configuration.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.storefront {
            OperationMode::Storefront
        } else {
            OperationMode::AdminListing
        }
    }

    /// Returns the requested page size.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::Configuration`] when the size is not one of
    /// the offered page sizes.
    pub fn page_size(&self) -> Result<Option<PageSize>, ListingError> {
        self.size
            .map(|raw| {
                PageSize::try_from(raw).map_err(|_| ListingError::Configuration {
                    message: format!("size must be 10, 20 or 50 (got {raw})"),
                })
            })
            .transpose()
    }

    /// Returns the requested sort.
    ///
    /// A bare field name sorts ascending.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::Configuration`] for an unknown field or
    /// direction.
    pub fn sort_request(&self) -> Result<Option<Sort>, ListingError> {
        let Some(raw) = self.sort.as_deref() else {
            return Ok(None);
        };
        let (field_text, direction_text) = raw.split_once(':').unwrap_or((raw, "asc"));
        let field = field_text
            .parse::<SortField>()
            .map_err(|error| configuration_error("sort", &error))?;
        let direction = SortDirection::parse(&direction_text.trim().to_lowercase())
            .map_err(|error| configuration_error("sort", &error))?;
        Ok(Some(Sort::new(field, direction)))
    }
}

fn configuration_error(setting: &str, error: &ListingError) -> ListingError {
    ListingError::Configuration {
        message: format!("invalid {setting}: {error}"),
    }
}

#[cfg(test)]
mod tests;
