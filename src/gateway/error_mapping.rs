//! Error mapping helpers for the HTTP listing gateway.

use http::StatusCode;

use crate::listing::ListingError;

/// Checks if a backend status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Maps a non-success response onto a listing error.
pub(super) fn map_http_error(status: StatusCode, maybe_message: Option<String>) -> ListingError {
    let message = maybe_message.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_owned()
    });
    let status_code = status.as_u16();
    if is_auth_failure(status) {
        ListingError::Authentication {
            status_code,
            message,
        }
    } else {
        ListingError::Api {
            status_code,
            message,
        }
    }
}

/// Maps a transport failure; the request never produced a response.
pub(super) fn map_transport_error(error: &reqwest::Error) -> ListingError {
    ListingError::Network {
        message: error.to_string(),
    }
}

/// Pulls the human-readable message out of a backend error body.
///
/// The backend answers `{ "errorMessage": ..., "errorCode": ... }`; a plain
/// `message` field is accepted as well.
pub(super) fn extract_error_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    ["errorMessage", "message"]
        .into_iter()
        .find_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .map(ToOwned::to_owned)
}
