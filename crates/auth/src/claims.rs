//! JWT claims types

use serde::{Deserialize, Serialize};

/// Claims carried by a CoralBase access token.
///
/// Only `sub` is used for routing; `email` is the issuance-time value and
/// is never trusted over the persisted user row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectClaims {
    /// Subject (user ID). Legacy tokens name this claim `id`.
    #[serde(alias = "id")]
    pub sub: String,
    /// Email at issuance time
    #[serde(default)]
    pub email: Option<String>,
    /// Issued at
    #[serde(default)]
    pub iat: u64,
    /// Expires at
    pub exp: u64,
}
