//! search_runbook and search_ops_recipe tool implementations.
//!
//! Both are scoped searches over internal intranet sections: the runbook tree
//! and the legacy ops-recipe tree. They gate on authentication up front and
//! delegate to the general search with a fixed breadcrumb filter.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use gsdocs_core::Error;

use crate::handler::ServerState;
use crate::tools::search::{SearchParams, search_impl};

/// Input parameters for the scoped intranet searches.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ScopedSearchParams {
    /// Search term (required).
    pub term: String,

    /// Start index of the results, for pagination (default 0).
    #[serde(default)]
    pub start_index: Option<usize>,

    /// Number of results to return (default 30, capped by the server).
    #[serde(default)]
    pub size: Option<usize>,
}

/// Implementation of the search_runbook tool.
pub async fn runbook_impl(state: &ServerState, params: ScopedSearchParams) -> Result<CallToolResult, McpError> {
    scoped_search(state, params, "Runbooks", &["support-and-ops", "runbooks"]).await
}

/// Implementation of the search_ops_recipe tool.
pub async fn ops_recipe_impl(state: &ServerState, params: ScopedSearchParams) -> Result<CallToolResult, McpError> {
    scoped_search(state, params, "Ops Recipes", &["support-and-ops", "ops-recipes"]).await
}

async fn scoped_search(
    state: &ServerState, params: ScopedSearchParams, what: &str, breadcrumbs: &[&str],
) -> Result<CallToolResult, McpError> {
    if !state.credential.is_authenticated() {
        return Err(Error::MissingCredential(format!("{what} are internal intranet resources.")).into());
    }

    search_impl(
        state,
        SearchParams {
            term: params.term,
            start_index: params.start_index,
            size: params.size,
            type_filter: None,
            breadcrumb_filter: Some(breadcrumbs.iter().map(|s| s.to_string()).collect()),
        },
    )
    .await
}
