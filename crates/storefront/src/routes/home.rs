//! Landing page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use crate::db;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::state::AppState;

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Result of the database connectivity probe.
    pub database_connected: bool,
}

impl HomeTemplate {
    /// Status line shown above the sign-in button.
    #[must_use]
    pub const fn status_line(&self) -> &'static str {
        if self.database_connected {
            "Database connected ✅"
        } else {
            "Connection failed ❌"
        }
    }
}

/// Display the landing page, or send signed-in visitors to their dashboard.
#[instrument(skip(state, user))]
pub async fn home(State(state): State<AppState>, OptionalAuth(user): OptionalAuth) -> Response {
    if user.is_some() {
        return Redirect::to("/dashboard").into_response();
    }

    let database_connected = match db::probe(state.pool()).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database probe failed");
            false
        }
    };

    HomeTemplate { database_connected }.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line() {
        let up = HomeTemplate {
            database_connected: true,
        };
        let down = HomeTemplate {
            database_connected: false,
        };
        assert_eq!(up.status_line(), "Database connected ✅");
        assert_eq!(down.status_line(), "Connection failed ❌");
    }
}
