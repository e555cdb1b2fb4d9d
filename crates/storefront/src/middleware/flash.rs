//! One-shot flash messages carried across a redirect in the session.

use tower_sessions::Session;

use crate::models::{Flash, session_keys};

/// Queue a flash message for the next rendered page.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_flash(
    session: &Session,
    flash: &Flash,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::FLASH, flash).await
}

/// Take the pending flash message, if any. It will not be shown again.
///
/// A flash that fails to load is dropped and logged.
pub async fn take_flash(session: &Session) -> Option<Flash> {
    match session.remove::<Flash>(session_keys::FLASH).await {
        Ok(flash) => flash,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read flash message");
            None
        }
    }
}
