//! Users domain: registration, login, logout, current-user introspection

pub mod api;
pub mod domain;
pub mod repository;

pub use domain::entities::{PublicUser, UserCredentials};
pub use repository::{UserRepository, UsersRepositories};

pub use api::routes;
pub use api::UsersState;

// Re-export auth types used by handlers and the composition root
pub use coralbase_auth::{AuthConfig, AuthContext, AuthError, AuthGate, AuthUser};
