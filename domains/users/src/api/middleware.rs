//! Users domain state and auth gate integration

use crate::UsersRepositories;
use axum::extract::FromRef;
use coralbase_auth::AuthGate;

pub use coralbase_auth::AuthUser;

/// Application state for the Users domain
#[derive(Clone)]
pub struct UsersState {
    pub repos: UsersRepositories,
    pub auth: AuthGate,
}

impl FromRef<UsersState> for AuthGate {
    fn from_ref(state: &UsersState) -> Self {
        state.auth.clone()
    }
}
