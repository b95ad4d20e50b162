//! Authoritative listing state and its transitions.
//!
//! [`ListingStateController`] owns the one query describing what the user
//! wants to see. Every transition produces a new query, bumps the query
//! version, and returns a [`FetchTicket`] for the single fetch that the
//! transition triggers. Fetch results are applied through
//! [`ListingStateController::complete`], which discards any result whose
//! ticket has been superseded, so responses arriving out of order can never
//! overwrite newer state.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use super::error::ListingError;
use super::query::{ListingQuery, PageSize, Sort, SortField};
use super::search::{parse_search, render_search_text};
use super::view::{PageNavigation, SortHeader, sort_headers};
use crate::errors::{ErrorReport, ErrorSink};
use crate::gateway::ListingGateway;
use crate::models::{GiftCertificate, ListingResult};
use crate::store::QueryStore;

/// Monotonic identifier of a query revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct QueryVersion(u64);

impl QueryVersion {
    /// Returns the raw revision number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// The fetch a transition asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a transition's fetch must be issued or deliberately dropped"]
pub struct FetchTicket {
    version: QueryVersion,
    query: ListingQuery,
}

impl FetchTicket {
    /// Returns the query revision the fetch belongs to.
    #[must_use]
    pub const fn version(&self) -> QueryVersion {
        self.version
    }

    /// Returns the query to fetch.
    #[must_use]
    pub const fn query(&self) -> &ListingQuery {
        &self.query
    }
}

/// Outcome of a fetch, ready to hand back to the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchCompletion {
    ticket: FetchTicket,
    result: Result<ListingResult<GiftCertificate>, ListingError>,
}

impl FetchCompletion {
    /// Pairs a fetch result with the ticket that requested it.
    #[must_use]
    pub const fn new(
        ticket: FetchTicket,
        result: Result<ListingResult<GiftCertificate>, ListingError>,
    ) -> Self {
        Self { ticket, result }
    }

    /// Returns the ticket the fetch was issued for.
    #[must_use]
    pub const fn ticket(&self) -> &FetchTicket {
        &self.ticket
    }
}

/// A fetch detached from the controller so it can be awaited freely.
#[derive(Debug)]
pub struct PendingFetch<G> {
    gateway: Arc<G>,
    ticket: FetchTicket,
}

impl<G: ListingGateway> PendingFetch<G> {
    /// Returns the ticket being fetched.
    #[must_use]
    pub const fn ticket(&self) -> &FetchTicket {
        &self.ticket
    }

    /// Runs the fetch against the gateway.
    pub async fn resolve(self) -> FetchCompletion {
        let result = self.gateway.fetch(&self.ticket.query).await;
        FetchCompletion::new(self.ticket, result)
    }
}

/// What applying a fetch completion did.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum CompletionOutcome {
    /// The result is now displayed.
    Applied,
    /// The result is displayed, but it revealed that the current page is
    /// past the end; the page was clamped and this follow-up fetch issued.
    Clamped(FetchTicket),
    /// The fetch failed; the report went to the error sink and the previous
    /// result stays displayed.
    Failed(ErrorReport),
    /// A newer transition superseded the fetch; nothing changed.
    Stale,
}

/// Maintains the listing query, applies fetch results, and persists state.
#[derive(Debug)]
pub struct ListingStateController<G, S, E> {
    query: ListingQuery,
    version: QueryVersion,
    total_pages: Option<u32>,
    result: Option<ListingResult<GiftCertificate>>,
    gateway: Arc<G>,
    store: S,
    errors: E,
}

impl<G, S, E> ListingStateController<G, S, E>
where
    G: ListingGateway,
    S: QueryStore,
    E: ErrorSink,
{
    /// Creates a controller holding the default query.
    #[must_use]
    pub fn new(gateway: Arc<G>, store: S, errors: E) -> Self {
        Self {
            query: ListingQuery::default(),
            version: QueryVersion::default(),
            total_pages: None,
            result: None,
            gateway,
            store,
            errors,
        }
    }

    /// Returns the current query.
    #[must_use]
    pub const fn query(&self) -> &ListingQuery {
        &self.query
    }

    /// Returns the current query revision.
    #[must_use]
    pub const fn version(&self) -> QueryVersion {
        self.version
    }

    /// Returns the page count learnt from the latest applied result.
    #[must_use]
    pub const fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Returns the latest applied result.
    #[must_use]
    pub const fn result(&self) -> Option<&ListingResult<GiftCertificate>> {
        self.result.as_ref()
    }

    /// Returns the certificates on display.
    #[must_use]
    pub fn items(&self) -> &[GiftCertificate] {
        self.result
            .as_ref()
            .map(|result| result.items.as_slice())
            .unwrap_or_default()
    }

    /// Returns the error sink.
    #[must_use]
    pub const fn errors(&self) -> &E {
        &self.errors
    }

    /// Returns the error sink mutably, e.g. to dismiss log entries.
    pub const fn errors_mut(&mut self) -> &mut E {
        &mut self.errors
    }

    /// Moves to `page`, clamped into the known page range.
    ///
    /// Until a result has reported the page count only the lower bound
    /// applies.
    pub fn set_page(&mut self, page: u32) -> FetchTicket {
        let last = self.total_pages.unwrap_or(u32::MAX);
        let clamped = page.clamp(1, last.max(1));
        self.replace_query(self.query.clone().with_page(clamped))
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, page_size: PageSize) -> FetchTicket {
        self.replace_query(
            self.query
                .clone()
                .with_page_size(page_size)
                .with_page(1),
        )
    }

    /// Advances the sort cycle of `field`, keeping the current page.
    pub fn set_sort(&mut self, field: SortField) -> FetchTicket {
        let sort = Sort::cycle(self.query.sort(), field);
        self.replace_query(self.query.clone().with_sort(sort))
    }

    /// Replaces the filters with those parsed from the search box text.
    ///
    /// Returns to the first page at the default page size.
    pub fn set_filter(&mut self, search_text: &str) -> FetchTicket {
        let filters = parse_search(search_text);
        self.replace_query(
            self.query
                .clone()
                .with_filters(filters)
                .with_page(1)
                .with_page_size(PageSize::default()),
        )
    }

    /// Re-issues a fetch for the unchanged query.
    pub fn refresh(&mut self) -> FetchTicket {
        self.replace_query(self.query.clone())
    }

    /// Moves to the first page.
    pub fn first_page(&mut self) -> FetchTicket {
        self.set_page(1)
    }

    /// Moves back one page.
    pub fn previous_page(&mut self) -> FetchTicket {
        self.set_page(self.query.page().saturating_sub(1))
    }

    /// Moves forward one page.
    pub fn next_page(&mut self) -> FetchTicket {
        self.set_page(self.query.page().saturating_add(1))
    }

    /// Moves to the last known page.
    pub fn last_page(&mut self) -> FetchTicket {
        self.set_page(self.total_pages.unwrap_or_else(|| self.query.page()))
    }

    /// Replaces the query with one decoded from a canonical string.
    ///
    /// Unusable input restores the default query. The learnt page count is
    /// forgotten either way, since it belonged to a different query.
    pub fn restore(&mut self, canonical: &str) -> FetchTicket {
        let query = ListingQuery::from_canonical_string(canonical).unwrap_or_else(|error| {
            warn!(%error, "falling back to the default listing query");
            ListingQuery::default()
        });
        self.total_pages = None;
        self.replace_query(query)
    }

    /// Restores the query kept by the store.
    ///
    /// Missing, unreadable, or malformed state yields the default query.
    pub fn load(&mut self) -> FetchTicket {
        match self.store.load() {
            Ok(Some(canonical)) => self.restore(&canonical),
            Ok(None) => {
                debug!("no stored listing query; using defaults");
                self.restore("")
            }
            Err(error) => {
                warn!(%error, "could not read stored listing query; using defaults");
                self.restore("")
            }
        }
    }

    /// Writes the canonical query to the store.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the write fails.
    pub fn save(&mut self) -> Result<(), ListingError> {
        let canonical = self.query.to_canonical_string();
        self.store.save(&canonical)
    }

    /// Prepares the fetch for `ticket` without borrowing the controller.
    #[must_use]
    pub fn fetch(&self, ticket: FetchTicket) -> PendingFetch<G> {
        PendingFetch {
            gateway: Arc::clone(&self.gateway),
            ticket,
        }
    }

    /// Applies a fetch outcome unless a newer transition superseded it.
    pub fn complete(&mut self, completion: FetchCompletion) -> CompletionOutcome {
        let FetchCompletion { ticket, result } = completion;
        if ticket.version != self.version {
            trace!(
                ticket = ticket.version.get(),
                current = self.version.get(),
                "discarding stale listing response"
            );
            return CompletionOutcome::Stale;
        }

        match result {
            Err(error) => {
                let report = ErrorReport::from(&error);
                self.errors.report(report.clone());
                CompletionOutcome::Failed(report)
            }
            Ok(result) => {
                let total = result.total_pages.max(1);
                self.total_pages = Some(total);
                self.result = Some(result);
                if self.query.page() > total {
                    debug!(
                        page = self.query.page(),
                        total, "current page is past the end; clamping"
                    );
                    CompletionOutcome::Clamped(self.set_page(total))
                } else {
                    CompletionOutcome::Applied
                }
            }
        }
    }

    /// Fetches `ticket` and applies the result, following clamp
    /// follow-ups until the listing settles.
    pub async fn execute(&mut self, ticket: FetchTicket) -> CompletionOutcome {
        let mut pending = ticket;
        loop {
            let completion = self.fetch(pending).resolve().await;
            match self.complete(completion) {
                CompletionOutcome::Clamped(next) => pending = next,
                outcome => return outcome,
            }
        }
    }

    /// Returns the search box text matching the active filters.
    #[must_use]
    pub fn search_text(&self) -> String {
        render_search_text(self.query.filters())
    }

    /// Returns the column headers for the active sort.
    #[must_use]
    pub fn sort_headers(&self) -> Vec<SortHeader> {
        sort_headers(self.query.sort())
    }

    /// Returns page navigation for the current page.
    ///
    /// Before the page count is known the current page is treated as the
    /// last one.
    #[must_use]
    pub fn page_navigation(&self) -> PageNavigation {
        let page = self.query.page();
        PageNavigation::new(page, self.total_pages.unwrap_or(page))
    }

    fn replace_query(&mut self, query: ListingQuery) -> FetchTicket {
        self.version = self.version.next();
        self.query = query;
        trace!(
            version = self.version.get(),
            query = %self.query,
            "listing query changed"
        );
        FetchTicket {
            version: self.version,
            query: self.query.clone(),
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
