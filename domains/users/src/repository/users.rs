//! User repository

use crate::domain::entities::UserCredentials;
use coralbase_common::Result;
use sqlx::PgPool;

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find login credentials by email
    pub async fn find_credentials_by_email(&self, email: &str) -> Result<Option<UserCredentials>> {
        let user: Option<UserCredentials> = sqlx::query_as(
            r#"
            SELECT id, email, name, username, password, is_active
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
