//! Fetch failure reports and the log that collects them.
//!
//! The listing never raises fetch failures to its caller. Each failure is
//! reduced to an [`ErrorReport`] and handed to an [`ErrorSink`]; the admin
//! screen keeps them in an [`ErrorLog`] the user can dismiss entries from.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::listing::ListingError;

/// A fetch failure as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    /// HTTP status code, or `0` when the backend was never reached.
    pub status_code: u16,
    /// Human-readable failure message.
    pub message: String,
}

impl ErrorReport {
    /// Creates a report.
    #[must_use]
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }
}

impl From<&ListingError> for ErrorReport {
    fn from(error: &ListingError) -> Self {
        match error {
            ListingError::Api {
                status_code,
                message,
            }
            | ListingError::Authentication {
                status_code,
                message,
            } => Self::new(*status_code, message.clone()),
            other => Self::new(other.status_code(), other.to_string()),
        }
    }
}

/// Receives fetch failure reports.
pub trait ErrorSink {
    /// Records one failure.
    fn report(&mut self, report: ErrorReport);
}

/// One entry of the [`ErrorLog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    /// Identifier used to dismiss the entry.
    pub id: u64,
    /// The reported failure.
    pub report: ErrorReport,
}

/// Dismissible log of fetch failures, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorLog {
    entries: Vec<ErrorEntry>,
    next_id: u64,
}

impl ErrorLog {
    /// Returns the entries still on display.
    #[must_use]
    pub fn entries(&self) -> &[ErrorEntry] {
        &self.entries
    }

    /// Returns true when nothing is logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes the entry with `id`; returns false when it was not present.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl ErrorSink for ErrorLog {
    fn report(&mut self, report: ErrorReport) {
        warn!(
            status_code = report.status_code,
            message = %report.message,
            "listing fetch failed"
        );
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        self.entries.push(ErrorEntry { id, report });
    }
}
