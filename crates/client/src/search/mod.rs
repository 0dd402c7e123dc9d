//! Documentation search API client.
//!
//! Issues structured queries against the versioned search index behind either
//! the public or the intranet endpoint, and normalizes the heterogeneous
//! response into a stable result list.
//!
//! ### Behavior
//!
//! - **Endpoint**: `<base>/searchapi/`, POST with a JSON query document.
//! - **Authentication**: session cookie, attached only for endpoints that
//!   require it.
//! - **One attempt per call**: failures are classified and reported, never
//!   retried.

pub mod error;
pub mod query;
pub mod response;

pub use error::SearchError;
pub use query::SearchRequest;
pub use response::{ContentType, RawSearchResponse, ResultItem, SearchResults, normalize};

use reqwest::header;

use crate::LOGIN_PAGE_MARKER;
use gsdocs_core::{Credential, Endpoint};

/// Search API client over a pooled HTTP connection.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    credential: Credential,
    max_results: usize,
}

impl SearchClient {
    /// Create a new search client sharing the given HTTP connection pool.
    pub fn new(http: reqwest::Client, credential: Credential, max_results: usize) -> Self {
        Self { http, credential, max_results }
    }

    /// Execute a search against the given endpoint.
    ///
    /// Validates the request, builds the query document, issues exactly one
    /// HTTP call, and normalizes the response.
    pub async fn search(
        &self, endpoint: &Endpoint, req: &SearchRequest,
    ) -> Result<SearchResults, SearchError> {
        req.validate()?;

        let payload = req.build_payload(self.max_results);
        let url = endpoint.search_url();

        tracing::debug!(endpoint = %url, term = %req.term, "issuing search request");

        let mut request = self
            .http
            .post(url.as_str())
            .header(header::ACCEPT, "application/json")
            .json(&payload);

        if endpoint.requires_auth
            && let Some(cookie) = self.credential.cookie_header()
        {
            request = request.header(header::COOKIE, cookie);
        }

        let http_response = request.send().await?;
        let status = http_response.status();

        tracing::debug!(status = status.as_u16(), "search response status");

        if status == 401 || status == 403 {
            return Err(self.auth_failure());
        }

        let body = http_response.text().await?;

        if body.contains(LOGIN_PAGE_MARKER) {
            tracing::warn!("search request was redirected to the login page");
            return Err(self.auth_failure());
        }

        if status.is_client_error() || status.is_server_error() {
            return Err(SearchError::HttpError { status: status.as_u16() });
        }

        // an HTML body on a JSON endpoint is an auth redirect in disguise
        if body.trim_start().starts_with('<') {
            tracing::warn!("search endpoint returned HTML instead of JSON");
            if self.credential.is_authenticated() {
                return Err(SearchError::SessionExpired);
            }
            return Err(SearchError::Protocol(
                "received HTML instead of JSON from the search endpoint".to_string(),
            ));
        }

        let raw: RawSearchResponse = serde_json::from_str(&body)
            .map_err(|e| SearchError::Protocol(format!("failed to parse response: {e}")))?;

        let results = normalize(raw, req.start_index)?;

        tracing::debug!(
            returned = results.items.len(),
            total = results.total,
            "search completed"
        );

        Ok(results)
    }

    /// Classify an authentication bounce by credential presence:
    /// supplied-but-rejected means expired, absent means required.
    fn auth_failure(&self) -> SearchError {
        if self.credential.is_authenticated() {
            SearchError::SessionExpired
        } else {
            SearchError::AuthRequired
        }
    }
}
