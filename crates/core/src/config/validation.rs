//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::{AppConfig, parse_base_url};
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - a base URL does not parse as http(s) with a host
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `max_results` is 0 or exceeds 100
    /// - `max_page_chars` is under 1000 or exceeds 1 million
    /// - `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_base_url("public_base_url", &self.public_base_url)?;
        parse_base_url("intranet_base_url", &self.intranet_base_url)?;
        parse_base_url("handbook_base_url", &self.handbook_base_url)?;

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.max_results == 0 {
            return Err(ConfigError::Invalid { field: "max_results".into(), reason: "must be greater than 0".into() });
        }
        if self.max_results > 100 {
            return Err(ConfigError::Invalid { field: "max_results".into(), reason: "must not exceed 100".into() });
        }

        if self.max_page_chars < 1_000 {
            return Err(ConfigError::Invalid {
                field: "max_page_chars".into(),
                reason: "must be at least 1000".into(),
            });
        }
        if self.max_page_chars > 1_000_000 {
            return Err(ConfigError::Invalid {
                field: "max_page_chars".into(),
                reason: "must not exceed 1000000".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if let Some(cookie) = &self.session_cookie
            && cookie.is_empty()
        {
            tracing::warn!("INTRANET_SESSION_COOKIE is set but empty; running in public-only mode");
        }

        Ok(())
    }
}
