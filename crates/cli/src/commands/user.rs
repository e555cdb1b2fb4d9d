//! Account management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create an account (e.g. the bakery's admin)
//! sm-cli user create -e admin@sweermeraki.com -p 'a long passphrase'
//!
//! # Reset a forgotten password
//! sm-cli user set-password -e someone@example.com -p 'another passphrase'
//! ```
//!
//! Whether an account can open `/admin` is decided by the storefront's
//! `STOREFRONT_ADMIN_EMAILS` / `STOREFRONT_ADMIN_MARKER` settings, not here.

use sweet_meraki_core::UserId;
use sweet_meraki_storefront::services::auth::AuthService;

use super::{CommandError, connect};

/// Create an account with a password.
///
/// # Errors
///
/// Returns an error if the email is invalid or taken, the password is too
/// short, or the database is unreachable.
pub async fn create(email: &str, password: &str) -> Result<UserId, CommandError> {
    let pool = connect().await?;

    let user = AuthService::new(&pool)
        .register_with_password(email, password)
        .await?;

    tracing::info!(user_id = %user.id, email = %user.email, "Account created");
    Ok(user.id)
}

/// Replace an existing account's password.
///
/// # Errors
///
/// Returns an error if no account has this email, the password is too
/// short, or the database is unreachable.
pub async fn set_password(email: &str, password: &str) -> Result<(), CommandError> {
    let pool = connect().await?;

    let user = AuthService::new(&pool).set_password(email, password).await?;

    tracing::info!(user_id = %user.id, email = %user.email, "Password updated");
    Ok(())
}
