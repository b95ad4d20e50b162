//! Listing gateway backed by the certificate REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::ListingGateway;
use super::error_mapping::{extract_error_message, map_http_error, map_transport_error};
use super::token::AccessToken;
use crate::listing::{ListingError, ListingQuery};
use crate::models::{GiftCertificate, ListingResult};

const LISTING_PATH: &str = "gift/certificates/all";
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Fetches listing pages with `GET {base}/gift/certificates/all?{query}`.
#[derive(Debug, Clone)]
pub struct HttpListingGateway {
    client: Client,
    endpoint: Url,
    token: Option<AccessToken>,
}

impl HttpListingGateway {
    /// Creates a gateway for the backend rooted at `base_url`.
    ///
    /// Requests carry `Authorization: Bearer <token>` when a token is given.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::InvalidUrl`] when `base_url` does not parse and
    /// [`ListingError::Configuration`] when the HTTP client cannot be built.
    pub fn new(base_url: &str, token: Option<AccessToken>) -> Result<Self, ListingError> {
        let endpoint = listing_endpoint(base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|error| ListingError::Configuration {
                message: format!("failed to configure listing HTTP client: {error}"),
            })?;
        Ok(Self {
            client,
            endpoint,
            token,
        })
    }

    /// Returns the listing endpoint without a query.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request_url(&self, query: &ListingQuery) -> Url {
        let mut url = self.endpoint.clone();
        url.set_query(Some(&query.to_canonical_string()));
        url
    }
}

#[async_trait]
impl ListingGateway for HttpListingGateway {
    async fn fetch(
        &self,
        query: &ListingQuery,
    ) -> Result<ListingResult<GiftCertificate>, ListingError> {
        let url = self.request_url(query);
        debug!(%url, "fetching listing page");

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.value());
        }

        let response = request
            .send()
            .await
            .map_err(|error| map_transport_error(&error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_http_error(status, extract_error_message(&body)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|error| map_transport_error(&error))?;
        serde_json::from_slice(&body).map_err(|error| ListingError::Serialization {
            message: error.to_string(),
        })
    }
}

fn listing_endpoint(base_url: &str) -> Result<Url, ListingError> {
    let trimmed = base_url.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_owned()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&with_slash)
        .and_then(|base| base.join(LISTING_PATH))
        .map_err(|error| ListingError::InvalidUrl(format!("'{trimmed}': {error}")))
}
