//! Request authentication for the CoralBase API
//!
//! Verifies bearer credentials, resolves the caller through a
//! time-bounded identity cache backed by the users table, and exposes
//! axum extractors that work with any domain state implementing
//! `FromRef<S>` for `AuthGate`.

mod cache;
mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod gate;
mod jwt;
pub mod mock;
mod store;
mod types;

pub use cache::{CacheSweeper, IdentityCache};
pub use claims::SubjectClaims;
pub use config::AuthConfig;
pub use context::AuthContext;
pub use error::AuthError;
pub use extractors::AuthUser;
pub use gate::AuthGate;
pub use jwt::{extract_credential, issue_token, verify_token};
pub use store::{IdentityStore, IdentityStoreError, PgIdentityStore};
pub use types::ResolvedUser;
