//! Shopping cart.
//!
//! A cart is an ordered list of cake snapshots kept in the customer's
//! session. Adding the same cake twice gives two lines; there is no quantity
//! field.

use serde::{Deserialize, Serialize};

use crate::catalog::Cake;
use crate::order::LineItem;
use crate::types::Price;

/// The customer's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a snapshot of `cake`.
    pub fn add(&mut self, cake: &Cake) {
        self.items.push(LineItem::from(cake));
    }

    /// Remove the line at `index`. Out-of-range indexes leave the cart as is.
    pub fn remove(&mut self, index: usize) -> Option<LineItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of line prices.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(|item| item.price).sum()
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lines in the order they were added.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::types::CakeId;

    fn cake(id: i32) -> &'static Cake {
        catalog::find(CakeId::new(id)).unwrap()
    }

    #[test]
    fn test_total_is_sum_of_prices() {
        let mut cart = Cart::new();
        cart.add(cake(1));
        cart.add(cake(2));
        cart.add(cake(1));
        assert_eq!(cart.len(), 3);
        assert_eq!(cart.total(), Price::dollars(45 + 38 + 45));
        let by_hand: Price = cart.items().iter().map(|i| i.price).sum();
        assert_eq!(cart.total(), by_hand);
    }

    #[test]
    fn test_empty_total_is_zero() {
        assert_eq!(Cart::new().total(), Price::ZERO);
        assert!(Cart::new().is_empty());
    }

    #[test]
    fn test_remove_by_index() {
        let mut cart = Cart::new();
        cart.add(cake(1));
        cart.add(cake(5));
        cart.add(cake(6));

        let removed = cart.remove(1).unwrap();
        assert_eq!(removed.name, "Lemon Delight");
        let names: Vec<&str> = cart.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Red Velvet Dream", "Carrot Cake"]);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut cart = Cart::new();
        cart.add(cake(4));
        assert!(cart.remove(7).is_none());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(cake(2));
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_survives_session_serialization() {
        let mut cart = Cart::new();
        cart.add(cake(3));
        let json = serde_json::to_value(&cart).unwrap();
        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }
}
