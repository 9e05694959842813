//! Shared database types for CoralBase
//!
//! This module provides common database-related types used across domain repositories.

use crate::error::Error;
use thiserror::Error;

/// Database-specific error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// A unique constraint rejected the write; carries the constraint name
    #[error("Record already exists ({0})")]
    AlreadyExists(String),

    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),
}

impl RepositoryError {
    /// Classify a write error, separating unique-constraint violations
    /// from every other database failure.
    pub fn from_write(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepositoryError::AlreadyExists(db_err.constraint().unwrap_or_default().to_string())
            }
            other => RepositoryError::Connection(other),
        }
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::AlreadyExists(constraint) => {
                Error::Validation(format!("Record already exists ({})", constraint))
            }
            RepositoryError::Connection(e) => Error::Database(e),
        }
    }
}
