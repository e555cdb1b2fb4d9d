//! Checkout: turn the session cart into an order row.

use axum::{extract::State, response::Redirect};
use tower_sessions::Session;
use tracing::instrument;

use sweet_meraki_core::{Cart, Email, NewOrder, Order, OrderError, Price};

use super::cart::{load_cart, save_cart};
use crate::db::OrderRepository;
use crate::error::{Result, add_breadcrumb};
use crate::middleware::{RequireAuth, set_flash};
use crate::models::{Flash, FlashKind};
use crate::state::AppState;

const SIGN_OFF: &str = "Sweet dreams! 🍰";

/// "1 cake" or "n cakes".
#[must_use]
pub fn cake_count_label(count: usize) -> String {
    if count == 1 {
        "1 cake".to_string()
    } else {
        format!("{count} cakes")
    }
}

fn contact_line(email: &Email) -> String {
    format!(
        "We'll contact you at {email} within 24 hours to confirm delivery details and payment."
    )
}

/// Confirmation for an order that was saved.
#[must_use]
pub fn placed_flash(order: &Order) -> Flash {
    Flash::new(FlashKind::Success, "🎂 Order placed successfully!")
        .line(format!("Order ID: {}", order.id))
        .line(format!("Total: {}", order.total_amount.display()))
        .line(format!("Items: {}", cake_count_label(order.items.len())))
        .line(contact_line(&order.user_email))
        .line(SIGN_OFF)
}

/// Acknowledgement when the orders table hasn't been created yet.
#[must_use]
pub fn received_flash(total: Price, item_count: usize, email: &Email) -> Flash {
    Flash::new(FlashKind::Notice, "🎂 Order received!")
        .line(format!("Total: {}", total.display()))
        .line(format!("Items: {}", cake_count_label(item_count)))
        .line("⚠️ Note: Orders will be saved once the database table is created.")
        .line(contact_line(email))
        .line(SIGN_OFF)
}

/// Generic failure message.
#[must_use]
pub fn failed_flash() -> Flash {
    Flash::new(
        FlashKind::Error,
        "❌ Sorry, there was an error placing your order. Please try again.",
    )
}

/// Place an order from the cart.
///
/// The cart is only emptied once the row is written; on any failure it is
/// kept so the customer can retry.
#[instrument(skip(user, state, session), fields(user_id = %user.id))]
pub async fn place(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<Redirect> {
    let cart = load_cart(&session).await;

    let new_order = match NewOrder::from_cart(user.id, user.email.clone(), &cart) {
        Ok(order) => order,
        Err(OrderError::EmptyCart) => {
            set_flash(
                &session,
                &Flash::new(FlashKind::Error, "Your cart is empty."),
            )
            .await?;
            return Ok(Redirect::to("/dashboard"));
        }
    };

    match OrderRepository::new(state.pool()).insert(&new_order).await {
        Ok(order) => {
            tracing::info!(
                order_id = %order.id,
                total = %order.total_amount.display(),
                items = order.items.len(),
                "Order placed"
            );
            add_breadcrumb(
                "order",
                "Order placed",
                Some(&[("order_id", &order.id.to_string())]),
            );
            save_cart(&session, &Cart::new()).await?;
            set_flash(&session, &placed_flash(&order)).await?;
        }
        Err(e) if e.is_missing_table() => {
            tracing::warn!(error = %e, "Orders table missing; order not saved");
            set_flash(
                &session,
                &received_flash(
                    new_order.total_amount,
                    new_order.item_count(),
                    &new_order.user_email,
                ),
            )
            .await?;
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to save order");
            set_flash(&session, &failed_flash()).await?;
        }
    }

    Ok(Redirect::to("/dashboard"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use sweet_meraki_core::{CakeId, OrderId, OrderStatus, UserId, catalog::find};
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_cake_count_label() {
        assert_eq!(cake_count_label(1), "1 cake");
        assert_eq!(cake_count_label(2), "2 cakes");
        assert_eq!(cake_count_label(0), "0 cakes");
    }

    #[test]
    fn test_placed_flash_lists_order() {
        let mut cart = Cart::new();
        cart.add(find(CakeId::new(1)).unwrap());
        cart.add(find(CakeId::new(5)).unwrap());
        let email = Email::parse("sam@example.com").unwrap();
        let new_order = NewOrder::from_cart(UserId::new(1), email.clone(), &cart).unwrap();
        let id = OrderId::new(Uuid::nil());
        let order = Order {
            id,
            user_id: new_order.user_id,
            user_email: email,
            items: new_order.items,
            total_amount: new_order.total_amount,
            status: OrderStatus::Pending,
            order_details: Some(new_order.order_details),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let flash = placed_flash(&order);

        assert_eq!(flash.kind, FlashKind::Success);
        assert!(flash.title.contains("Order placed successfully"));
        assert!(flash.lines.contains(&format!("Order ID: {id}")));
        assert!(flash.lines.contains(&"Total: $87".to_string()));
        assert!(flash.lines.contains(&"Items: 2 cakes".to_string()));
        assert!(flash.lines.iter().any(|l| l.contains("sam@example.com")));
    }

    #[test]
    fn test_received_flash_mentions_missing_table() {
        let email = Email::parse("sam@example.com").unwrap();
        let flash = received_flash(Price::dollars(45), 1, &email);

        assert_eq!(flash.kind, FlashKind::Notice);
        assert!(flash.lines.contains(&"Items: 1 cake".to_string()));
        assert!(
            flash
                .lines
                .iter()
                .any(|l| l.contains("saved once the database table is created"))
        );
    }
}
