//! Certlist library crate providing the gift certificate listing.
//!
//! The library keeps the query behind a paginated, sortable, filterable
//! certificate listing consistent with asynchronously fetched pages. It
//! encodes that query as a canonical string for persistence and for the
//! backend, discards responses that a newer query has superseded, and
//! collects fetch failures in a dismissible error log.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod gateway;
pub mod listing;
pub mod models;
pub mod store;

pub use config::{CertlistConfig, OperationMode};
pub use errors::{ErrorLog, ErrorReport, ErrorSink};
pub use gateway::{AccessToken, DemoCatalogGateway, HttpListingGateway, ListingGateway};
pub use listing::{
    CompletionOutcome, FetchTicket, ListingError, ListingQuery, ListingStateController, PageSize,
    ScrollState, Sort, SortDirection, SortField,
};
pub use models::{GiftCertificate, ListingResult, Tag};
pub use store::{FileQueryStore, MemoryQueryStore, QueryStore};
