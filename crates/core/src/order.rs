//! Orders and order statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::catalog::Cake;
use crate::types::{CakeId, Email, OrderId, OrderStatus, Price, UserId};

/// Errors building an order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("cannot place an order with an empty cart")]
    EmptyCart,
}

/// A cake as it was when it went into the cart.
///
/// Orders keep their own copy so later menu changes don't rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: CakeId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image: String,
    pub category: String,
}

impl From<&Cake> for LineItem {
    fn from(cake: &Cake) -> Self {
        Self {
            id: cake.id,
            name: cake.name.clone(),
            description: cake.description.clone(),
            price: cake.price,
            image: cake.image.clone(),
            category: cake.category.clone(),
        }
    }
}

/// Summary stored alongside the line items (`order_details` column).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub item_count: usize,
    pub cakes: Vec<CakeSummary>,
}

/// Name and price of one ordered cake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CakeSummary {
    pub name: String,
    pub price: Price,
}

impl OrderDetails {
    fn from_items(items: &[LineItem]) -> Self {
        Self {
            item_count: items.len(),
            cakes: items
                .iter()
                .map(|item| CakeSummary {
                    name: item.name.clone(),
                    price: item.price,
                })
                .collect(),
        }
    }
}

/// An order ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: UserId,
    pub user_email: Email,
    pub items: Vec<LineItem>,
    pub total_amount: Price,
    pub status: OrderStatus,
    pub order_details: OrderDetails,
}

impl NewOrder {
    /// Build a pending order from the customer's cart.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::EmptyCart`] if the cart has no lines.
    pub fn from_cart(user_id: UserId, user_email: Email, cart: &Cart) -> Result<Self, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let items = cart.items().to_vec();
        Ok(Self {
            user_id,
            user_email,
            order_details: OrderDetails::from_items(&items),
            total_amount: cart.total(),
            status: OrderStatus::Pending,
            items,
        })
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// A stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub user_email: Email,
    pub items: Vec<LineItem>,
    pub total_amount: Price,
    pub status: OrderStatus,
    pub order_details: Option<OrderDetails>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Headline numbers for the admin order desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderStats {
    pub total_orders: usize,
    pub pending_orders: usize,
    pub revenue: Price,
    pub average_order_value: Price,
}

impl OrderStats {
    /// Compute stats over every order given, cancelled ones included.
    #[must_use]
    pub fn from_orders(orders: &[Order]) -> Self {
        let revenue: Price = orders.iter().map(|order| order.total_amount).sum();
        let pending_orders = orders
            .iter()
            .filter(|order| order.status == OrderStatus::Pending)
            .count();

        Self {
            total_orders: orders.len(),
            pending_orders,
            revenue,
            average_order_value: revenue.average_over(orders.len()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog;

    fn email() -> Email {
        Email::parse("hanshika@example.com").unwrap()
    }

    fn cart_of(ids: &[i32]) -> Cart {
        let mut cart = Cart::new();
        for id in ids {
            cart.add(catalog::find(CakeId::new(*id)).unwrap());
        }
        cart
    }

    fn stored(total: u32, status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(uuid::Uuid::new_v4()),
            user_id: UserId::new(1),
            user_email: email(),
            items: Vec::new(),
            total_amount: Price::dollars(total),
            status,
            order_details: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_from_cart_snapshots_items() {
        let cart = cart_of(&[1, 6]);
        let order = NewOrder::from_cart(UserId::new(7), email(), &cart).unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, Price::dollars(85));
        assert_eq!(order.item_count(), 2);
        assert_eq!(order.order_details.item_count, 2);
        assert_eq!(order.order_details.cakes[1].name, "Carrot Cake");
        assert_eq!(order.items, cart.items());
    }

    #[test]
    fn test_from_cart_rejects_empty() {
        let result = NewOrder::from_cart(UserId::new(7), email(), &Cart::new());
        assert_eq!(result, Err(OrderError::EmptyCart));
    }

    #[test]
    fn test_order_details_json_shape() {
        let order = NewOrder::from_cart(UserId::new(1), email(), &cart_of(&[2])).unwrap();
        let json = serde_json::to_value(&order.order_details).unwrap();
        assert_eq!(json["item_count"], 1);
        assert_eq!(json["cakes"][0]["name"], "Strawberry Bliss");
        assert_eq!(json["cakes"][0]["price"], "38");
    }

    #[test]
    fn test_stats() {
        let orders = vec![
            stored(45, OrderStatus::Pending),
            stored(38, OrderStatus::Delivered),
            stored(52, OrderStatus::Pending),
        ];
        let stats = OrderStats::from_orders(&orders);

        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.pending_orders, 2);
        assert_eq!(stats.revenue, Price::dollars(135));
        assert_eq!(stats.average_order_value, Price::dollars(45));
    }

    #[test]
    fn test_stats_empty() {
        let stats = OrderStats::from_orders(&[]);
        assert_eq!(stats, OrderStats::default());
        assert_eq!(stats.average_order_value.display_cents(), "$0.00");
    }
}
