//! Error types exposed by the listing layer.

use thiserror::Error;

/// Errors surfaced while decoding listing state or talking to a data source.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ListingError {
    /// A canonical query string or stored state could not be decoded.
    #[error("malformed listing query: {message}")]
    MalformedQuery {
        /// Which part of the query was rejected and why.
        message: String,
    },

    /// The backend answered with a non-success status.
    #[error("listing API error (status {status_code}): {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status_code: u16,
        /// Error message taken from the response body when available.
        message: String,
    },

    /// The backend rejected the access token.
    #[error("backend rejected the access token (status {status_code}): {message}")]
    Authentication {
        /// HTTP status code returned with the 401/403 response.
        status_code: u16,
        /// Error message taken from the response body when available.
        message: String,
    },

    /// The access token was blank.
    #[error("access token must not be blank")]
    MissingToken,

    /// Networking failed while calling the backend.
    #[error("network error talking to the listing backend: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The configured backend URL could not be parsed.
    #[error("listing backend URL is invalid: {0}")]
    InvalidUrl(String),

    /// The response body did not match the listing contract.
    #[error("could not decode listing response: {message}")]
    Serialization {
        /// Decoder error detail.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },
}

impl ListingError {
    /// Builds a [`ListingError::MalformedQuery`] from any displayable detail.
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedQuery {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code associated with the error.
    ///
    /// Failures that never reached the backend report `0`.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Api { status_code, .. } | Self::Authentication { status_code, .. } => {
                *status_code
            }
            _ => 0,
        }
    }
}
