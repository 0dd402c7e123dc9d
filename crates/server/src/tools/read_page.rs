//! read_handbook_url and read_intranet_url tool implementations.
//!
//! Both fetch a single page and return it as Markdown. Each tool only
//! accepts URLs on its own site; the intranet variant additionally requires
//! the session credential before any request is made.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use gsdocs_client::PageContent;
use gsdocs_core::Error;

use crate::handler::ServerState;

/// Input parameters for the page-reading tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ReadPageParams {
    /// The URL to fetch content from.
    pub url: String,
}

/// Implementation of the read_handbook_url tool.
pub async fn read_handbook_impl(state: &ServerState, params: ReadPageParams) -> Result<CallToolResult, McpError> {
    require_site(&params.url, &state.config.handbook_base_url, "handbook")?;
    fetch_and_render(state, &params.url).await
}

/// Implementation of the read_intranet_url tool.
pub async fn read_intranet_impl(state: &ServerState, params: ReadPageParams) -> Result<CallToolResult, McpError> {
    if !state.credential.is_authenticated() {
        return Err(Error::MissingCredential("The intranet requires authentication.".into()).into());
    }

    require_site(&params.url, &state.config.intranet_base_url, "intranet")?;
    fetch_and_render(state, &params.url).await
}

async fn fetch_and_render(state: &ServerState, url: &str) -> Result<CallToolResult, McpError> {
    tracing::info!(url = %url, "reading page");

    let page = state
        .pages
        .fetch_page(url)
        .await
        .map_err(|e| McpError::from(Error::from(e)))?;

    Ok(CallToolResult::success(vec![Content::text(render_page(&page))]))
}

/// Reject URLs that do not live under the given site base.
fn require_site(url: &str, base: &str, site: &str) -> Result<(), McpError> {
    let prefix = format!("{}/", base.trim_end_matches('/'));
    if !url.starts_with(&prefix) {
        return Err(Error::InvalidInput(format!("URL must be from the Giant Swarm {site} ({prefix}).")).into());
    }
    Ok(())
}

fn render_page(page: &PageContent) -> String {
    let mut text = format!("# Content from {}\n\n", page.url);

    if !page.title.is_empty() {
        text.push_str(&format!("**{}**\n\n", page.title));
    }

    text.push_str(&page.body);

    if page.truncated {
        text.push_str("\n\n⚠️ Content was truncated at the configured maximum length.");
    }

    text
}
