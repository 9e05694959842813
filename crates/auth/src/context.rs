//! Authenticated request context

use crate::types::ResolvedUser;

/// Represents an authenticated caller for the rest of the request
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Snapshot taken when the credential was resolved
    pub user: ResolvedUser,
    /// Raw bearer credential the caller presented
    pub credential: String,
}

impl AuthContext {
    pub fn new(user: ResolvedUser, credential: String) -> Self {
        Self { user, credential }
    }
}
