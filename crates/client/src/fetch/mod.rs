//! Page fetch pipeline.
//!
//! Retrieves a single URL and converts the body to readable text.
//!
//! ### Credential scoping
//! The session cookie is attached only when the URL's host is the configured
//! intranet host. Any other host never sees the credential, regardless of
//! whether one is configured.
//!
//! ### Classification
//! - 401/403 (or a login-page body) with no credential: authentication required
//! - 401/403 (or a login-page body) with a credential: session expired
//! - other non-2xx: fetch failure carrying the status code
//! - DNS/connect/timeout: network error, no status code

use std::sync::Arc;

use reqwest::header;
use url::Url;

use crate::LOGIN_PAGE_MARKER;
use crate::convert::{convert_html, truncate_chars};
use gsdocs_core::Credential;

/// Errors from the page fetch pipeline.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The URL did not parse or uses an unsupported scheme.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The page demanded authentication and no credential is configured.
    #[error("authentication required")]
    AuthRequired,

    /// The page rejected the configured session cookie.
    #[error("session expired")]
    SessionExpired,

    /// Non-auth HTTP error response.
    #[error("HTTP error: {status}")]
    Http { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { FetchError::Timeout } else { FetchError::Network(Arc::new(err)) }
    }
}

impl From<FetchError> for gsdocs_core::Error {
    fn from(err: FetchError) -> Self {
        use gsdocs_core::Error;
        match err {
            FetchError::InvalidUrl(msg) => Error::InvalidInput(msg),
            FetchError::AuthRequired => {
                Error::MissingCredential("Authentication required to read this page.".into())
            }
            FetchError::SessionExpired => {
                Error::SessionExpired("The page rejected the session cookie.".into())
            }
            FetchError::Http { status: 404 } => {
                Error::FetchFailed { status: 404, message: "page not found".into() }
            }
            FetchError::Http { status } => {
                Error::FetchFailed { status, message: "request failed".into() }
            }
            FetchError::Timeout => Error::Network("request timed out".into()),
            FetchError::Network(e) => Error::Network(e.to_string()),
        }
    }
}

/// A fetched and converted page.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub url: String,
    /// Best-effort page title; empty when none was found.
    pub title: String,
    /// Converted readable text, free of script/style/navigation markup.
    pub body: String,
    /// True when the converted text was cut at the configured maximum.
    pub truncated: bool,
}

/// Page fetch client over a pooled HTTP connection.
#[derive(Debug, Clone)]
pub struct PageClient {
    http: reqwest::Client,
    credential: Credential,
    intranet_host: String,
    max_page_chars: usize,
}

impl PageClient {
    /// Create a new page client sharing the given HTTP connection pool.
    pub fn new(
        http: reqwest::Client, credential: Credential, intranet_host: impl Into<String>,
        max_page_chars: usize,
    ) -> Self {
        Self { http, credential, intranet_host: intranet_host.into(), max_page_chars }
    }

    /// Fetch a URL and convert the response body to readable text.
    ///
    /// Issues exactly one GET; the outcome is classified, never retried.
    pub async fn fetch_page(&self, url_str: &str) -> Result<PageContent, FetchError> {
        let url = canonicalize(url_str)?;

        let mut request = self.http.get(url.as_str()).header(
            header::ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        );

        if let Some(cookie) = self.auth_cookie_for(&url) {
            request = request.header(header::COOKIE, cookie);
        }

        let response = request.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response.text().await?;

        tracing::debug!(url = %url, status = status.as_u16(), "fetched page");

        if status == 401 || status == 403 || body.contains(LOGIN_PAGE_MARKER) {
            return Err(self.auth_failure());
        }

        if !status.is_success() {
            return Err(FetchError::Http { status: status.as_u16() });
        }

        let is_html = content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("html"));

        let (title, text, truncated) = if is_html {
            let page = convert_html(&body, self.max_page_chars);
            (page.title, page.body, page.truncated)
        } else {
            // non-HTML content is passed through as-is, still bounded
            let (text, truncated) = truncate_chars(body, self.max_page_chars);
            (String::new(), text, truncated)
        };

        Ok(PageContent { url: url.to_string(), title, body: text, truncated })
    }

    /// The cookie header for this URL, or nothing.
    ///
    /// Credentials are scoped to the intranet host; this is the guard that
    /// keeps the session cookie from ever leaving for another site.
    fn auth_cookie_for(&self, url: &Url) -> Option<String> {
        if url.host_str() == Some(self.intranet_host.as_str()) {
            self.credential.cookie_header()
        } else {
            None
        }
    }

    fn auth_failure(&self) -> FetchError {
        if self.credential.is_authenticated() {
            FetchError::SessionExpired
        } else {
            FetchError::AuthRequired
        }
    }
}

/// Normalize a URL string: trim whitespace, require http(s), drop fragments.
fn canonicalize(input: &str) -> Result<Url, FetchError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(FetchError::InvalidUrl("URL cannot be empty".to_string()));
    }

    let mut url =
        Url::parse(trimmed).map_err(|e| FetchError::InvalidUrl(format!("{trimmed}: {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(FetchError::InvalidUrl(format!("unsupported scheme: {scheme}")));
        }
    }

    url.set_fragment(None);
    Ok(url)
}
