//! Authentication route handlers.
//!
//! Email and password sign-in, registration and sign-out. Failures
//! redirect back to the form with an `?error=` code that the page turns
//! into a message.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService, validate_password};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<&'static str>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<&'static str>,
    pub min_password_length: usize,
}

/// Message for a `?error=` code on the login page.
fn login_error_message(code: &str) -> &'static str {
    match code {
        "credentials" => "Invalid email or password.",
        "session" => "We couldn't sign you in. Please try again.",
        _ => "Something went wrong. Please try again.",
    }
}

/// Message for a `?error=` code on the registration page.
fn register_error_message(code: &str) -> &'static str {
    match code {
        "password_mismatch" => "Passwords don't match.",
        "password_too_short" => "Password must be at least 8 characters.",
        "invalid_email" => "Please enter a valid email address.",
        "email_taken" => "An account with this email already exists.",
        _ => "Registration failed. Please try again.",
    }
}

/// Query-string code for a failed registration.
fn register_error_code(err: &AuthError) -> &'static str {
    match err {
        AuthError::InvalidEmail(_) => "invalid_email",
        AuthError::WeakPassword(_) => "password_too_short",
        AuthError::UserAlreadyExists => "email_taken",
        _ => "failed",
    }
}

/// Store the new identity in the session and go to the dashboard.
async fn sign_in(session: &Session, user: &CurrentUser, on_error: &str) -> Response {
    if let Err(e) = set_current_user(session, user).await {
        tracing::error!(error = %e, "Failed to set session");
        return Redirect::to(on_error).into_response();
    }

    set_sentry_user(&user.id, Some(user.email.as_str()));
    Redirect::to("/dashboard").into_response()
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/dashboard").into_response();
    }

    LoginTemplate {
        error: query.error.as_deref().map(login_error_message),
    }
    .into_response()
}

/// Handle login form submission.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let auth = AuthService::new(state.pool());

    match auth.login_with_password(&form.email, &form.password).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "User signed in");
            sign_in(&session, &CurrentUser::from(&user), "/auth/login?error=session").await
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("Login failed: invalid credentials");
            Redirect::to("/auth/login?error=credentials").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Login failed");
            Redirect::to("/auth/login?error=failed").into_response()
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/dashboard").into_response();
    }

    RegisterTemplate {
        error: query.error.as_deref().map(register_error_message),
        min_password_length: crate::services::auth::MIN_PASSWORD_LENGTH,
    }
    .into_response()
}

/// Handle registration form submission.
///
/// A successful registration signs the new user straight in.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.password != form.password_confirm {
        return Redirect::to("/auth/register?error=password_mismatch").into_response();
    }

    if validate_password(&form.password).is_err() {
        return Redirect::to("/auth/register?error=password_too_short").into_response();
    }

    let auth = AuthService::new(state.pool());

    match auth
        .register_with_password(&form.email, &form.password)
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "User registered");
            sign_in(&session, &CurrentUser::from(&user), "/auth/login?error=session").await
        }
        Err(e) => {
            let code = register_error_code(&e);
            if code == "failed" {
                tracing::error!(error = %e, "Registration failed");
            } else {
                tracing::warn!(error = %e, "Registration rejected");
            }
            Redirect::to(&format!("/auth/register?error={code}")).into_response()
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Sign out and return to the landing page.
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!(error = %e, "Failed to clear session");
    }
    clear_sentry_user();

    Redirect::to("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_error_codes() {
        assert_eq!(
            register_error_code(&AuthError::UserAlreadyExists),
            "email_taken"
        );
        assert_eq!(
            register_error_code(&AuthError::WeakPassword("short".into())),
            "password_too_short"
        );
        assert_eq!(register_error_code(&AuthError::PasswordHash), "failed");
    }

    #[test]
    fn test_every_register_code_has_its_own_message() {
        let generic = register_error_message("failed");
        for code in [
            "password_mismatch",
            "password_too_short",
            "invalid_email",
            "email_taken",
        ] {
            assert_ne!(register_error_message(code), generic, "{code}");
        }
    }

    #[test]
    fn test_unknown_login_code_is_generic() {
        assert_eq!(
            login_error_message("<script>"),
            "Something went wrong. Please try again."
        );
        assert_eq!(
            login_error_message("credentials"),
            "Invalid email or password."
        );
    }
}
