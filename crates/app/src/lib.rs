//! CoralBase application composition root
//!
//! Wires the auth gate, its identity cache and sweeper, and the domain
//! routers into a single application.

use std::sync::Arc;

use axum::Router;
use coralbase_auth::{AuthConfig, AuthGate, CacheSweeper, IdentityCache, PgIdentityStore};
use coralbase_common::config::Config;
use coralbase_users::{UsersRepositories, UsersState};
use sqlx::PgPool;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A composed application plus the background work it owns
pub struct App {
    pub router: Router,
    /// Identity cache sweeper; finishes once the shutdown token is cancelled
    pub sweeper: JoinHandle<()>,
}

/// Create the application router and start the identity cache sweeper.
///
/// The sweeper runs on a child of `shutdown`, so cancelling the parent
/// stops it.
pub fn create_app(
    config: &Config,
    pool: PgPool,
    shutdown: &CancellationToken,
) -> App {
    let auth_config = AuthConfig::from_config(config);

    let cache = Arc::new(IdentityCache::new(auth_config.cache_ttl));
    let sweeper = CacheSweeper::new(cache.clone());

    tracing::debug!(
        cache_ttl_secs = auth_config.cache_ttl.as_secs(),
        sweep_interval_ms = sweeper.interval().as_millis() as u64,
        token_ttl_secs = auth_config.token_ttl.as_secs(),
        "Auth gate configured"
    );

    let sweeper = sweeper.spawn(shutdown.child_token());

    let store = Arc::new(PgIdentityStore::new(pool.clone()));
    let auth = AuthGate::new(store, cache, auth_config);

    let users_state = UsersState {
        repos: UsersRepositories::new(pool),
        auth,
    };

    App {
        router: create_router(users_state),
        sweeper,
    }
}

/// Build the router: infrastructure routes plus every domain router
pub fn create_router(users_state: UsersState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route("/", axum::routing::get(|| async { "Server is Online" }))
        .merge(coralbase_users::routes().with_state(users_state))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
