//! Axum extractors for authentication
//!
//! Generic over any state `S` where `AuthGate: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::context::AuthContext;
use crate::error::AuthError;
use crate::gate::AuthGate;

/// Authenticated user extractor
///
/// Reads the credential from `Authorization: Bearer …` or, failing
/// that, the `token` query parameter.
#[derive(Debug)]
pub struct AuthUser(pub AuthContext);

impl<S> FromRequestParts<S> for AuthUser
where
    AuthGate: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let gate = AuthGate::from_ref(state);
        let auth_context = gate.authenticate(&parts.headers, &parts.uri).await?;

        Ok(AuthUser(auth_context))
    }
}
