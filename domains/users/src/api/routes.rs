//! Route definitions for Users domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::auth;
use super::middleware::UsersState;

/// Create account authentication routes
fn auth_routes() -> Router<UsersState> {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
}

/// Create all Users domain API routes
pub fn routes() -> Router<UsersState> {
    Router::new().merge(auth_routes())
}
