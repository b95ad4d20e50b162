//! Listing state: the query, its canonical encoding, and the controller
//! that keeps it consistent with asynchronously fetched pages.

mod codec;
pub mod controller;
pub mod error;
pub mod query;
pub mod search;
pub mod view;
pub mod window;

pub use controller::{
    CompletionOutcome, FetchCompletion, FetchTicket, ListingStateController, PendingFetch,
    QueryVersion,
};
pub use error::ListingError;
pub use query::{
    Filter, FilterField, ListingItem, ListingQuery, PageSize, Sort, SortDirection, SortField,
};
pub use search::{parse_search, render_search_text};
pub use view::{
    OpenPanel, PageButton, PageNavigation, PanelVisibility, SortButtons, SortHeader, sort_headers,
};
pub use window::ScrollState;
