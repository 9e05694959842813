//! Persistence seam for the auth gate
//!
//! The gate reads the active user row and stamps `last_active` through
//! `IdentityStore`. `PgIdentityStore` is the production implementation;
//! it uses runtime `sqlx::query_as` (not macros) so the crate builds
//! without a live database.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::types::ResolvedUser;

#[derive(Debug, thiserror::Error)]
pub enum IdentityStoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Identity store unavailable: {0}")]
    Unavailable(String),
}

/// Read/write access to the users table needed for authentication.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Fetch the user with `id`, only if the account is active.
    async fn find_active_user(&self, id: Uuid) -> Result<Option<ResolvedUser>, IdentityStoreError>;

    /// Set the user's `last_active` to the current time.
    async fn touch_last_active(&self, id: Uuid) -> Result<(), IdentityStoreError>;
}

/// Postgres-backed identity store
#[derive(Clone)]
pub struct PgIdentityStore {
    pool: PgPool,
}

impl PgIdentityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    async fn find_active_user(&self, id: Uuid) -> Result<Option<ResolvedUser>, IdentityStoreError> {
        let user: Option<ResolvedUser> = sqlx::query_as(
            r#"
            SELECT id, email, name, username, role, last_active
            FROM users
            WHERE id = $1 AND is_active = true
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn touch_last_active(&self, id: Uuid) -> Result<(), IdentityStoreError> {
        sqlx::query("UPDATE users SET last_active = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
