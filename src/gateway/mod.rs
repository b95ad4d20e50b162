//! Data sources the listing fetches certificate pages from.
//!
//! The trait keeps the controller independent of where pages come from: the
//! admin screen talks to the HTTP backend while the storefront demo serves a
//! fabricated catalogue from memory.

mod demo;
mod error_mapping;
mod http;
mod token;

pub use demo::DemoCatalogGateway;
pub use http::HttpListingGateway;
pub use token::AccessToken;

use async_trait::async_trait;

use crate::listing::{ListingError, ListingQuery};
use crate::models::{GiftCertificate, ListingResult};

/// Source of listing pages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingGateway: Send + Sync {
    /// Fetches the page of certificates described by `query`.
    async fn fetch(
        &self,
        query: &ListingQuery,
    ) -> Result<ListingResult<GiftCertificate>, ListingError>;
}
