//! Cart route handlers.
//!
//! The cart lives in the session as a [`Cart`]. Every action redirects back
//! to the dashboard, which renders the updated cart.

use axum::{Form, response::Redirect};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use sweet_meraki_core::{Cart, CakeId, catalog};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::RequireAuth;
use crate::models::session_keys;

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session. A missing or unreadable cart is empty.
pub async fn load_cart(session: &Session) -> Cart {
    match session.get::<Cart>(session_keys::CART).await {
        Ok(cart) => cart.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read cart from session");
            Cart::default()
        }
    }
}

/// Write the cart back to the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_cart(
    session: &Session,
    cart: &Cart,
) -> std::result::Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

// =============================================================================
// Form Types
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub cake_id: CakeId,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    /// Zero-based cart line.
    pub index: usize,
}

// =============================================================================
// Handlers
// =============================================================================

/// Append a cake to the cart.
#[instrument(skip(user, session), fields(user_id = %user.id))]
pub async fn add(
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let cake = catalog::find(form.cake_id)
        .ok_or_else(|| AppError::BadRequest(format!("unknown cake {}", form.cake_id)))?;

    let mut cart = load_cart(&session).await;
    cart.add(cake);
    save_cart(&session, &cart).await?;

    add_breadcrumb(
        "cart",
        "Added cake to cart",
        Some(&[("cake_id", &cake.id.to_string())]),
    );

    Ok(Redirect::to("/dashboard"))
}

/// Remove one cart line.
#[instrument(skip(user, session), fields(user_id = %user.id))]
pub async fn remove(
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect> {
    let mut cart = load_cart(&session).await;
    if cart.remove(form.index).is_some() {
        save_cart(&session, &cart).await?;
    }

    Ok(Redirect::to("/dashboard"))
}

/// Empty the cart.
#[instrument(skip(user, session), fields(user_id = %user.id))]
pub async fn clear(RequireAuth(user): RequireAuth, session: Session) -> Result<Redirect> {
    save_cart(&session, &Cart::new()).await?;
    Ok(Redirect::to("/dashboard"))
}
