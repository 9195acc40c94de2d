//! API error types.

use thiserror::Error;

/// Errors from talking to the PackLightly API.
///
/// The remote failure classes are exactly the three the sync status collapses
/// into a single `error` flag: transport failures, non-success statuses, and
/// bodies that don't parse. `NotAuthenticated` is raised client-side when the
/// token provider has no session.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Server returned status {0}")]
    Status(u16),

    #[error("Malformed response body: {0}")]
    MalformedBody(String),

    #[error("Not authenticated. Sign in or set an API token in config.")]
    NotAuthenticated,
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::MalformedBody(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}
