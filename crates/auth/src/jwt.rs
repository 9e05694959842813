//! JWT verification, issuance, and credential extraction helpers

use axum::{
    extract::Query,
    http::{header::AUTHORIZATION, HeaderMap, HeaderValue, Uri},
};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::claims::SubjectClaims;
use crate::config::AuthConfig;
use crate::error::AuthError;

/// Verify an access token's signature and expiry.
///
/// Pure function of the token and the shared secret. Expiry is checked
/// with zero leeway: a token whose `exp` has passed is always rejected.
pub fn verify_token(token: &str, config: &AuthConfig) -> Result<SubjectClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;
    validation.leeway = 0;

    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_ref());

    let token_data = decode::<SubjectClaims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "JWT validation failed");
        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::CredentialExpired,
            _ => AuthError::InvalidCredential,
        }
    })?;

    Ok(token_data.claims)
}

/// Sign a new access token for a user, valid for `config.token_ttl`.
pub fn issue_token(user_id: Uuid, email: &str, config: &AuthConfig) -> Result<String, AuthError> {
    let now = chrono::Utc::now().timestamp().max(0) as u64;
    let exp = now.checked_add(config.token_ttl.as_secs()).ok_or_else(|| {
        tracing::error!(token_ttl = ?config.token_ttl, "Token lifetime overflows the expiry claim");
        AuthError::Internal
    })?;
    let claims = SubjectClaims {
        sub: user_id.to_string(),
        email: Some(email.to_string()),
        iat: now,
        exp,
    };

    let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_ref());
    encode(&Header::new(Algorithm::HS256), &claims, &encoding_key).map_err(|e| {
        tracing::error!(error = %e, user_id = %user_id, "Failed to sign access token");
        AuthError::Internal
    })
}

#[derive(Debug, Deserialize)]
struct CredentialQuery {
    token: Option<String>,
}

/// Pull the bearer credential off a request.
///
/// The `Authorization` header wins whenever it is present; the `token`
/// query parameter is consulted only when the header is absent. A header
/// that is present but not a usable `Bearer` value is a rejection, not a
/// reason to fall back to the query string.
pub fn extract_credential(headers: &HeaderMap, uri: &Uri) -> Result<String, AuthError> {
    if let Some(header) = headers.get(AUTHORIZATION) {
        return extract_bearer_token(header);
    }

    Query::<CredentialQuery>::try_from_uri(uri)
        .ok()
        .and_then(|Query(query)| query.token)
        .filter(|token| !token.trim().is_empty())
        .ok_or(AuthError::MissingCredential)
}

/// Extract bearer token from Authorization header
fn extract_bearer_token(header: &HeaderValue) -> Result<String, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::MissingCredential)?;

    match header_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(AuthError::MissingCredential),
    }
}
