//! Unified error taxonomy for the docs-search bridge.
//!
//! Every failed invocation maps to exactly one of these categories. The
//! category only decides which user-facing message template is shown; nothing
//! here triggers a retry, and no error is fatal to the process.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the docs-search server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty search term).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// An authenticated operation was invoked with no credential configured.
    #[error("MISSING_CREDENTIAL: {0}")]
    MissingCredential(String),

    /// Credential present but rejected by the backend.
    #[error("SESSION_EXPIRED: {0}")]
    SessionExpired(String),

    /// The search backend returned a shape we cannot interpret.
    #[error("BACKEND_PROTOCOL: {0}")]
    BackendProtocol(String),

    /// Transport-level failure (DNS, connection refused, timeout).
    #[error("NETWORK: {0}")]
    Network(String),

    /// Non-auth HTTP failure on a page fetch.
    #[error("FETCH_FAILED: HTTP {status}: {message}")]
    FetchFailed { status: u16, message: String },

    /// Configuration could not be loaded or validated.
    #[error("CONFIG: {0}")]
    Config(String),
}

impl Error {
    /// The user-facing message for this category, with actionable guidance.
    pub fn user_message(&self) -> String {
        match self {
            Error::InvalidInput(msg) => format!("❌ Invalid input: {msg}"),
            Error::MissingCredential(msg) => format!(
                "❌ {msg}\n\nPlease set the INTRANET_SESSION_COOKIE environment variable \
                 with a valid session cookie value."
            ),
            Error::SessionExpired(msg) => format!(
                "❌ {msg}\n\nYour INTRANET_SESSION_COOKIE has expired. Update it with a \
                 fresh cookie value, or remove it to search public documentation only."
            ),
            Error::BackendProtocol(msg) => {
                format!("❌ The search backend returned an unexpected response. {msg}")
            }
            Error::Network(msg) => format!(
                "❌ Network error: {msg}\n\nPlease check your connectivity and try again."
            ),
            Error::FetchFailed { status, message } => {
                format!("❌ HTTP {status}: {message}. Please check the URL or try again.")
            }
            Error::Config(msg) => format!("❌ Configuration error: {msg}"),
        }
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidInput(_) => -32602,
            Error::MissingCredential(_) => -32001,
            Error::SessionExpired(_) => -32002,
            Error::BackendProtocol(_) => -32003,
            Error::Network(_) => -32004,
            Error::FetchFailed { .. } => -32005,
            Error::Config(_) => -32006,
        };

        let message = err.user_message();
        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}
