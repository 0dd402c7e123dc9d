//! search tool implementation.
//!
//! Runs a query against the search index behind the endpoint selected for
//! this process's credential state and renders the ranked hits as Markdown.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use gsdocs_client::{ContentType, SearchRequest, SearchResults};
use gsdocs_core::Error;

use crate::handler::ServerState;

/// Default result count when the caller does not ask for one.
pub const DEFAULT_SIZE: usize = 30;

/// Input parameters for the search tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Search term (required).
    pub term: String,

    /// Start index of the results, for pagination (default 0).
    #[serde(default)]
    pub start_index: Option<usize>,

    /// Number of results to return (default 30, capped by the server).
    #[serde(default)]
    pub size: Option<usize>,

    /// Restrict results to one source type, e.g. "Intranet".
    #[serde(default)]
    pub type_filter: Option<String>,

    /// Restrict results to a section, e.g. ["docs", "support-and-ops"].
    #[serde(default)]
    pub breadcrumb_filter: Option<Vec<String>>,
}

/// Implementation of the search tool.
pub async fn search_impl(state: &ServerState, params: SearchParams) -> Result<CallToolResult, McpError> {
    if params.term.trim().is_empty() {
        return Err(Error::InvalidInput("search term cannot be empty".into()).into());
    }

    let endpoint = state.endpoints.select(&state.credential);

    let type_filter = params
        .type_filter
        .filter(|t| !t.is_empty())
        .map(ContentType::from);

    // refuse intranet-only filters up front in public mode, before any request
    if matches!(type_filter, Some(ContentType::Intranet)) && !state.credential.is_authenticated() {
        return Err(Error::MissingCredential(
            "Cannot search Intranet resources without authentication. \
             Search without the Intranet filter instead."
                .into(),
        )
        .into());
    }

    tracing::info!(endpoint = %endpoint.base_url, term = %params.term, "search");

    let request = SearchRequest {
        term: params.term.clone(),
        start_index: params.start_index.unwrap_or(0),
        size: params.size.unwrap_or(DEFAULT_SIZE),
        type_filter,
        breadcrumb_filter: params.breadcrumb_filter.unwrap_or_default(),
    };

    let results = state
        .search
        .search(endpoint, &request)
        .await
        .map_err(|e| McpError::from(Error::from(e)))?;

    let text = render_results(&params.term, &results, state.credential.is_authenticated());
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Render normalized results as a ranked Markdown list.
///
/// Zero hits gets its own notice; it is a valid outcome, not a failure.
pub fn render_results(term: &str, results: &SearchResults, authenticated: bool) -> String {
    let mut body = format!("# Search results for {term}\n\n");

    if !authenticated {
        body.push_str(
            "ℹ️ **Note:** Searching public documentation only. For intranet access, \
             set the INTRANET_SESSION_COOKIE environment variable.\n\n",
        );
    }

    if results.is_empty() {
        body.push_str(&format!("No results found for \"{term}\".\n"));
        return body;
    }

    body.push_str(&format!(
        "Showing {} out of {} search results",
        results.items.len(),
        results.total
    ));
    if results.start_index > 0 {
        body.push_str(&format!(", starting at {}", results.start_index + 1));
    }
    body.push_str("\n\n");

    for (offset, item) in results.items.iter().enumerate() {
        let rank = results.start_index + offset + 1;
        body.push_str(&format!("{rank}. **[{}]({})**\n", item.title, item.url));
        body.push_str(&format!("   **Type:** {}\n", item.content_type));
        if !item.breadcrumb.is_empty() {
            body.push_str(&format!("   **Breadcrumb:** {}\n", item.breadcrumb.join(" / ")));
        }
        if !item.description.is_empty() {
            body.push_str(&format!("   **Description:** {}\n", item.description));
        }
        if !item.excerpt.is_empty() {
            body.push_str(&format!("   **Excerpt:** {}\n", item.excerpt));
        }
        body.push('\n');
    }

    body
}
