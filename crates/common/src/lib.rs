//! Shared utilities, configuration, and error handling for CoralBase
//!
//! This crate provides common functionality used across the CoralBase backend:
//! - Configuration management following 12-factor principles
//! - Error types and the JSON error envelope
//! - Request extractors

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;

pub use config::Config;
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::ValidatedJson;
