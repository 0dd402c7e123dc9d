//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (GSDOCS_*)
//! 2. TOML config file (if GSDOCS_CONFIG_FILE set)
//! 3. Built-in defaults
//!
//! The session credential keeps its historical variable name
//! `INTRANET_SESSION_COOKIE` and is merged on top of the layered sources.

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::auth::Credential;
use crate::endpoint::Endpoints;

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. `INTRANET_SESSION_COOKIE` (credential only)
/// 2. Environment variables (GSDOCS_*)
/// 3. TOML config file (if GSDOCS_CONFIG_FILE set)
/// 4. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// OAuth2 proxy session cookie for intranet access.
    ///
    /// Set via the INTRANET_SESSION_COOKIE environment variable.
    /// Absent means public-only mode; that is a valid state, not an error.
    #[serde(default)]
    pub session_cookie: Option<String>,

    /// Base URL of the public documentation site.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Base URL of the authenticated intranet.
    #[serde(default = "default_intranet_base_url")]
    pub intranet_base_url: String,

    /// Base URL of the public handbook site.
    #[serde(default = "default_handbook_base_url")]
    pub handbook_base_url: String,

    /// User-Agent string for outbound HTTP requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Hard cap on requested search result counts.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Maximum length of converted page text, in chars.
    #[serde(default = "default_max_page_chars")]
    pub max_page_chars: usize,
}

fn default_public_base_url() -> String {
    "https://docs.giantswarm.io".into()
}

fn default_intranet_base_url() -> String {
    "https://intranet.giantswarm.io".into()
}

fn default_handbook_base_url() -> String {
    "https://handbook.giantswarm.io".into()
}

fn default_user_agent() -> String {
    "mcp-docs-search/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_max_results() -> usize {
    50
}

fn default_max_page_chars() -> usize {
    80_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session_cookie: None,
            public_base_url: default_public_base_url(),
            intranet_base_url: default_intranet_base_url(),
            handbook_base_url: default_handbook_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_results: default_max_results(),
            max_page_chars: default_max_page_chars(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// The immutable credential value for this process.
    pub fn credential(&self) -> Credential {
        Credential::new(self.session_cookie.clone())
    }

    /// Build the two fixed endpoint instances from the configured base URLs.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a base URL does not parse; `load()`
    /// validates this up front, so failures here indicate a hand-built config.
    pub fn endpoints(&self) -> Result<Endpoints, ConfigError> {
        let public = parse_base_url("public_base_url", &self.public_base_url)?;
        let intranet = parse_base_url("intranet_base_url", &self.intranet_base_url)?;
        Ok(Endpoints::new(public, intranet))
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("GSDOCS_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("GSDOCS_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let mut config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        // the credential keeps its historical variable name and wins over
        // every other source
        if let Ok(cookie) = std::env::var("INTRANET_SESSION_COOKIE") {
            config.session_cookie = Some(cookie);
        }

        config.validate()?;

        Ok(config)
    }
}

pub(crate) fn parse_base_url(field: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::Invalid {
        field: field.to_string(),
        reason: format!("not a valid URL: {e}"),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Invalid {
            field: field.to_string(),
            reason: format!("unsupported scheme: {}", url.scheme()),
        });
    }

    if url.host_str().is_none() {
        return Err(ConfigError::Invalid { field: field.to_string(), reason: "missing host".into() });
    }

    Ok(url)
}
