//! Authentication configuration

use std::time::Duration;

use coralbase_common::Config;

/// Default identity cache TTL (five minutes).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Default lifetime of issued access tokens (one hour).
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);

/// Authentication configuration.
///
/// Built once at startup and shared read-only for the life of the process.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub cache_ttl: Duration,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: DEFAULT_TOKEN_TTL,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            jwt_secret: config.jwt_secret.clone(),
            token_ttl: Duration::from_secs(config.jwt_expiry_secs),
            cache_ttl: Duration::from_secs(config.auth_cache_ttl_secs),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}
