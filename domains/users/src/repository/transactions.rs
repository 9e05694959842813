//! Transactional free functions for the Users domain

use crate::domain::entities::PublicUser;
use coralbase_common::RepositoryError;
use sqlx::{Postgres, Transaction};

/// Check whether an account already uses `email`.
pub async fn email_exists_tx(
    transaction: &mut Transaction<'_, Postgres>,
    email: &str,
) -> std::result::Result<bool, sqlx::Error> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(email)
        .fetch_one(&mut **transaction)
        .await?;
    Ok(exists)
}

/// Check whether an account already uses `username`.
pub async fn username_exists_tx(
    transaction: &mut Transaction<'_, Postgres>,
    username: &str,
) -> std::result::Result<bool, sqlx::Error> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(&mut **transaction)
            .await?;
    Ok(exists)
}

/// Insert a new active user within an existing transaction.
///
/// A unique-constraint race surfaces as `RepositoryError::AlreadyExists`
/// carrying the constraint name.
pub async fn create_user_tx(
    transaction: &mut Transaction<'_, Postgres>,
    email: &str,
    name: &str,
    username: &str,
    password_hash: &str,
) -> std::result::Result<PublicUser, RepositoryError> {
    sqlx::query_as(
        r#"
        INSERT INTO users (email, name, username, password)
        VALUES ($1, $2, $3, $4)
        RETURNING id, email, name, username
        "#,
    )
    .bind(email)
    .bind(name)
    .bind(username)
    .bind(password_hash)
    .fetch_one(&mut **transaction)
    .await
    .map_err(RepositoryError::from_write)
}
