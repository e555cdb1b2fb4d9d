//! The cake catalog.
//!
//! The bakery sells a fixed menu. The catalog lives in code, is built once
//! per process, and is never written to the database.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::types::{CakeId, Price};

/// A cake on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cake {
    pub id: CakeId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Emoji shown in place of a product photo.
    pub image: String,
    pub category: String,
}

impl Cake {
    fn new(
        id: i32,
        name: &str,
        description: &str,
        price: u32,
        image: &str,
        category: &str,
    ) -> Self {
        Self {
            id: CakeId::new(id),
            name: name.to_owned(),
            description: description.to_owned(),
            price: Price::dollars(price),
            image: image.to_owned(),
            category: category.to_owned(),
        }
    }
}

static CATALOG: LazyLock<Vec<Cake>> = LazyLock::new(|| {
    vec![
        Cake::new(
            1,
            "Red Velvet Dream",
            "Velvety smooth chocolate cake with cream cheese frosting",
            45,
            "🎂",
            "Classic",
        ),
        Cake::new(
            2,
            "Strawberry Bliss",
            "Fresh strawberry cake with vanilla buttercream",
            38,
            "🧁",
            "Fruit",
        ),
        Cake::new(
            3,
            "Chocolate Heaven",
            "Rich chocolate cake with ganache and berries",
            52,
            "🍰",
            "Chocolate",
        ),
        Cake::new(
            4,
            "Vanilla Elegance",
            "Classic vanilla cake with buttercream frosting",
            35,
            "🎂",
            "Classic",
        ),
        Cake::new(
            5,
            "Lemon Delight",
            "Tangy lemon cake with lemon curd filling",
            42,
            "🍋",
            "Citrus",
        ),
        Cake::new(
            6,
            "Carrot Cake",
            "Moist carrot cake with cream cheese frosting",
            40,
            "🥕",
            "Spiced",
        ),
    ]
});

/// All cakes, in menu order.
#[must_use]
pub fn catalog() -> &'static [Cake] {
    &CATALOG
}

/// Look up a cake by ID.
#[must_use]
pub fn find(id: CakeId) -> Option<&'static Cake> {
    CATALOG.iter().find(|cake| cake.id == id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_six_cakes_in_id_order() {
        let ids: Vec<i32> = catalog().iter().map(|c| c.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_find() {
        let cake = find(CakeId::new(3)).unwrap();
        assert_eq!(cake.name, "Chocolate Heaven");
        assert_eq!(cake.price, Price::dollars(52));
        assert!(find(CakeId::new(99)).is_none());
    }
}
