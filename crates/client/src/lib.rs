//! Client code for the docs-search bridge.
//!
//! This crate provides the search API client (query construction and result
//! normalization), the page fetch pipeline, and HTML-to-Markdown conversion
//! shared by the server tools.

pub mod convert;
pub mod fetch;
pub mod search;

/// Body marker of the OAuth2 proxy's login page. Seeing it in a response
/// means the request was bounced to sign-in rather than served.
pub(crate) const LOGIN_PAGE_MARKER: &str = "Sign in to GitHub";

pub use convert::{ConvertedPage, convert_html};
pub use fetch::{FetchError, PageClient, PageContent};
pub use search::{
    ContentType, ResultItem, SearchClient, SearchError, SearchRequest, SearchResults,
};

/// Build the pooled HTTP client shared by all tool invocations.
///
/// One client per process: connections are reused across invocations while
/// each invocation stays independent and stateless.
pub fn build_http_client(
    user_agent: &str, timeout: std::time::Duration,
) -> Result<reqwest::Client, gsdocs_core::Error> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .use_rustls_tls()
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()
        .map_err(|e| gsdocs_core::Error::Config(format!("failed to build HTTP client: {e}")))
}
