//! Account authentication API handlers
//!
//! Implements:
//! - POST /api/auth/register: Create an account and return a token
//! - POST /api/auth/login: Exchange email + password for a token
//! - POST /api/auth/logout: Acknowledge logout (tokens are discarded client-side)
//! - GET /api/auth/me: Return the authenticated caller

use std::borrow::Cow;

use axum::{extract::State, http::StatusCode, Json};
use coralbase_auth::{issue_token, ResolvedUser};
use coralbase_common::{Error, RepositoryError, Result, ValidatedJson};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::api::middleware::{AuthUser, UsersState};
use crate::domain::entities::PublicUser;
use crate::domain::password::{hash_password, verify_password};
use crate::domain::validation::{
    any_blank, is_long_enough_password, is_valid_email, EMAIL_TAKEN, INVALID_EMAIL,
    INVALID_LOGIN, MISSING_FIELDS, PASSWORD_TOO_SHORT, USERNAME_TAKEN,
};
use crate::repository::{create_user_tx, email_exists_tx, username_exists_tx};

/// Treat an explicit JSON `null` the same as an absent field
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Request for account registration
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_register_request"))]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub password: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

/// Request for login
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_login_request"))]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub password: String,
}

/// Response for register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub user: PublicUser,
    pub token: String,
}

/// Response for `GET /api/auth/me`
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub success: bool,
    pub user: ResolvedUser,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: &'static str,
}

fn rule_violation(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn validate_register_request(
    request: &RegisterRequest,
) -> std::result::Result<(), ValidationError> {
    if any_blank(&[
        &request.email,
        &request.password,
        &request.username,
        &request.name,
    ]) {
        return Err(rule_violation("missing_fields", MISSING_FIELDS));
    }

    if !is_valid_email(&request.email) {
        return Err(rule_violation("invalid_email", INVALID_EMAIL));
    }

    Ok(())
}

fn validate_login_request(request: &LoginRequest) -> std::result::Result<(), ValidationError> {
    if any_blank(&[&request.email, &request.password]) {
        return Err(rule_violation("missing_fields", MISSING_FIELDS));
    }

    Ok(())
}

fn invalid_login() -> Error {
    Error::Authentication(INVALID_LOGIN.to_string())
}

fn sign_token(state: &UsersState, user_id: Uuid, email: &str) -> Result<String> {
    issue_token(user_id, email, state.auth.config())
        .map_err(|e| Error::Internal(format!("token signing failed: {}", e)))
}

/// POST /api/auth/register: Create an account and return a token
pub async fn register(
    State(state): State<UsersState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let mut tx = state.repos.begin().await?;

    if email_exists_tx(&mut tx, &request.email).await? {
        return Err(Error::Validation(EMAIL_TAKEN.to_string()));
    }

    if username_exists_tx(&mut tx, &request.username).await? {
        return Err(Error::Validation(USERNAME_TAKEN.to_string()));
    }

    if !is_long_enough_password(&request.password) {
        return Err(Error::Validation(PASSWORD_TOO_SHORT.to_string()));
    }

    let password_hash = hash_password(&request.password)?;

    let user = create_user_tx(
        &mut tx,
        &request.email,
        &request.name,
        &request.username,
        &password_hash,
    )
    .await
    .map_err(|e| match e {
        RepositoryError::AlreadyExists(constraint) if constraint.contains("username") => {
            Error::Validation(USERNAME_TAKEN.to_string())
        }
        RepositoryError::AlreadyExists(_) => Error::Validation(EMAIL_TAKEN.to_string()),
        other => other.into(),
    })?;

    tx.commit().await?;

    let token = sign_token(&state, user.id, &user.email)?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            user,
            token,
        }),
    ))
}

/// POST /api/auth/login: Exchange email + password for a token
///
/// Unknown email, deactivated account, and wrong password all produce the
/// same 401 so the response never reveals whether an account exists.
pub async fn login(
    State(state): State<UsersState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let credentials = state
        .repos
        .users
        .find_credentials_by_email(&request.email)
        .await?
        .filter(|c| c.is_active)
        .ok_or_else(invalid_login)?;

    let password_hash = credentials.password.as_deref().ok_or_else(invalid_login)?;

    if !verify_password(&request.password, password_hash)? {
        tracing::debug!(user_id = %credentials.id, "Login rejected: wrong password");
        return Err(invalid_login());
    }

    let token = sign_token(&state, credentials.id, &credentials.email)?;

    Ok(Json(AuthResponse {
        success: true,
        user: credentials.into_public(),
        token,
    }))
}

/// POST /api/auth/logout: Acknowledge logout
pub async fn logout() -> Json<LogoutResponse> {
    Json(LogoutResponse {
        success: true,
        message: "Logged out successfully",
    })
}

/// GET /api/auth/me: Return the authenticated caller
pub async fn me(AuthUser(auth_context): AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        success: true,
        user: auth_context.user,
    })
}
