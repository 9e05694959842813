//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Default lifetime of an issued access token (one hour).
const DEFAULT_JWT_EXPIRY_SECS: u64 = 3600;

/// Default lifetime of an identity cache entry (five minutes).
const DEFAULT_AUTH_CACHE_TTL_SECS: u64 = 300;

/// Longest token lifetime accepted from the environment (one year).
const MAX_JWT_EXPIRY_SECS: u64 = 365 * 24 * 3600;

const DEFAULT_PORT: u16 = 4000;

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection URL (PostgreSQL)
    pub database_url: String,

    /// Shared HS256 signing secret for access tokens
    pub jwt_secret: String,
    pub jwt_expiry_secs: u64,

    /// Identity cache TTL; the sweep runs every TTL/2
    pub auth_cache_ttl_secs: u64,

    /// Runtime configuration
    pub rust_log: String,
    pub log_format: String,
    pub port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"<redacted>")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiry_secs", &self.jwt_expiry_secs)
            .field("auth_cache_ttl_secs", &self.auth_cache_ttl_secs)
            .field("rust_log", &self.rust_log)
            .field("log_format", &self.log_format)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests pass a map-backed lookup instead
    /// of mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| anyhow::anyhow!("{} is required", key))
        };

        let config = Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_expiry_secs: parse_or(&lookup, "JWT_EXPIRY_SECS", DEFAULT_JWT_EXPIRY_SECS)?,
            auth_cache_ttl_secs: parse_or(
                &lookup,
                "AUTH_CACHE_TTL_SECS",
                DEFAULT_AUTH_CACHE_TTL_SECS,
            )?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "coralbase=debug".to_string()),
            log_format: lookup("LOG_FORMAT").unwrap_or_else(|| "pretty".to_string()),
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
        };

        if config.auth_cache_ttl_secs == 0 {
            anyhow::bail!("AUTH_CACHE_TTL_SECS must be greater than zero");
        }

        if config.jwt_expiry_secs == 0 || config.jwt_expiry_secs > MAX_JWT_EXPIRY_SECS {
            anyhow::bail!(
                "JWT_EXPIRY_SECS must be between 1 and {}, got {}",
                MAX_JWT_EXPIRY_SECS,
                config.jwt_expiry_secs
            );
        }

        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a positive integer, got {:?}", key, raw)),
        None => Ok(default),
    }
}
