//! Users domain entities
//!
//! Row types for the `users` table as seen by the account endpoints.

use serde::Serialize;
use uuid::Uuid;

/// Public profile returned by register and login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub username: Option<String>,
}

/// Login lookup row; carries the password hash and never leaves the domain
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredentials {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub is_active: bool,
}

impl UserCredentials {
    pub fn into_public(self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email,
            name: self.name,
            username: self.username,
        }
    }
}
