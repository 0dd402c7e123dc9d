//! Search client error types.

use std::sync::Arc;

/// Errors from the documentation search API client.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Invalid search parameters (e.g., empty term).
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The backend demanded authentication and no credential is configured.
    #[error("authentication required")]
    AuthRequired,

    /// The backend rejected the configured session cookie.
    #[error("session expired")]
    SessionExpired,

    /// Non-auth HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// The response body is not the expected search result shape.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { SearchError::Timeout } else { SearchError::Network(Arc::new(err)) }
    }
}

impl From<SearchError> for gsdocs_core::Error {
    fn from(err: SearchError) -> Self {
        use gsdocs_core::Error;
        match err {
            SearchError::InvalidQuery(msg) => Error::InvalidInput(msg),
            SearchError::AuthRequired => {
                Error::MissingCredential("Authentication required for this resource.".into())
            }
            SearchError::SessionExpired => {
                Error::SessionExpired("Authentication expired.".into())
            }
            SearchError::HttpError { status } => {
                Error::FetchFailed { status, message: "search request failed".into() }
            }
            SearchError::Timeout => Error::Network("request timed out".into()),
            SearchError::Network(e) => Error::Network(e.to_string()),
            SearchError::Protocol(msg) => Error::BackendProtocol(msg),
        }
    }
}
