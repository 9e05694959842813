//! Auth read-model types
//!
//! A lightweight view of the `users` row carrying only what request
//! handlers need after authentication.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Point-in-time snapshot of an active user.
///
/// Cached by the gate and handed to handlers; never a live reference
/// to the persisted row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ResolvedUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub username: Option<String>,
    pub role: Option<String>,
    pub last_active: Option<DateTime<Utc>>,
}
