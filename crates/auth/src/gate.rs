//! The auth gate
//!
//! Orchestrates token verification, the identity cache, and the identity
//! store into a single authenticate call:
//!
//! 1. extract the credential (header first, then `token` query parameter)
//! 2. verify signature and expiry
//! 3. serve the user from the cache when a fresh entry exists
//! 4. otherwise load the active row, stamp `last_active`, and cache the row
//!
//! Every failure resolves to one `AuthError`; nothing else escapes.

use std::sync::Arc;

use axum::http::{HeaderMap, Uri};
use uuid::Uuid;

use crate::cache::IdentityCache;
use crate::config::AuthConfig;
use crate::context::AuthContext;
use crate::error::AuthError;
use crate::jwt::{extract_credential, verify_token};
use crate::store::IdentityStore;

/// Shared authentication entry point.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthGate {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthGate {
    store: Arc<dyn IdentityStore>,
    cache: Arc<IdentityCache>,
    config: Arc<AuthConfig>,
}

impl AuthGate {
    pub fn new(store: Arc<dyn IdentityStore>, cache: Arc<IdentityCache>, config: AuthConfig) -> Self {
        Self {
            store,
            cache,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn cache(&self) -> &Arc<IdentityCache> {
        &self.cache
    }

    /// Authenticate an HTTP request from its headers and URI.
    pub async fn authenticate(&self, headers: &HeaderMap, uri: &Uri) -> Result<AuthContext, AuthError> {
        let credential = extract_credential(headers, uri)?;
        self.authenticate_token(credential).await
    }

    /// Authenticate a raw credential.
    ///
    /// Also the entry point for real-time connection registration, where
    /// the token arrives outside an HTTP request.
    pub async fn authenticate_token(&self, credential: String) -> Result<AuthContext, AuthError> {
        let claims = verify_token(&credential, &self.config)?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
            tracing::debug!(sub = %claims.sub, "Token subject is not a user id");
            AuthError::InvalidCredential
        })?;

        if let Some(user) = self.cache.lookup(user_id) {
            return Ok(AuthContext::new(user, credential));
        }

        let user = self
            .store
            .find_active_user(user_id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, user_id = %user_id, "Failed to load user");
                AuthError::Internal
            })?
            .ok_or_else(|| {
                tracing::debug!(user_id = %user_id, "No active user for token subject");
                AuthError::UserNotFoundOrInactive
            })?;

        self.touch_activity(user_id).await;
        self.cache.insert(user_id, user.clone());

        Ok(AuthContext::new(user, credential))
    }

    /// Stamp `last_active` (best-effort, never fails authentication)
    async fn touch_activity(&self, user_id: Uuid) {
        if let Err(e) = self.store.touch_last_active(user_id).await {
            tracing::warn!(error = %e, user_id = %user_id, "Failed to update user last_active");
        }
    }
}
