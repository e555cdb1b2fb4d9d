//! Session middleware configuration.
//!
//! Sessions hold the signed-in user, the cart and pending flash messages.
//! They live in `tower_sessions.session` via tower-sessions.

use sqlx::PgPool;
use tower_sessions::{
    Expiry, SessionManagerLayer, SessionStore,
    cookie::{SameSite, time::Duration},
};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "sm_session";

/// Inactivity expiry (7 days).
const SESSION_EXPIRY: Duration = Duration::days(7);

/// Create the session layer with the `PostgreSQL` store.
///
/// The sessions table is created by migration, not at start-up.
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &StorefrontConfig,
) -> SessionManagerLayer<PostgresStore> {
    session_layer(PostgresStore::new(pool.clone()), config.is_https())
}

/// Apply the storefront's cookie settings to any session store.
///
/// Tests use this with `tower_sessions::MemoryStore`.
#[must_use]
pub fn session_layer<S: SessionStore + Clone>(store: S, secure: bool) -> SessionManagerLayer<S> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(SESSION_EXPIRY))
        .with_secure(secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
