//! Core types and shared functionality for the docs-search bridge.
//!
//! This crate provides:
//! - Layered application configuration
//! - The session credential holder
//! - Endpoint selection between the public and intranet backends
//! - Unified error types

pub mod auth;
pub mod config;
pub mod endpoint;
pub mod error;

pub use auth::Credential;
pub use config::AppConfig;
pub use endpoint::{Endpoint, Endpoints};
pub use error::Error;
