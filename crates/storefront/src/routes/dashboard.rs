//! Customer dashboard.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use sweet_meraki_core::{Cake, Cart, catalog};

use super::cart::load_cart;
use crate::filters;
use crate::middleware::{RequireAuth, take_flash};
use crate::models::{CurrentUser, Flash};
use crate::state::AppState;

/// A catalog card.
#[derive(Clone)]
pub struct CakeView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
}

impl From<&Cake> for CakeView {
    fn from(cake: &Cake) -> Self {
        Self {
            id: cake.id.as_i32(),
            name: cake.name.clone(),
            description: cake.description.clone(),
            price: cake.price.display(),
            image: cake.image.clone(),
            category: cake.category.clone(),
        }
    }
}

/// One cart line, with the index the remove button posts back.
#[derive(Clone)]
pub struct CartLineView {
    pub index: usize,
    pub name: String,
    pub price: String,
    pub image: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub count: usize,
    pub total: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart
                .items()
                .iter()
                .enumerate()
                .map(|(index, item)| CartLineView {
                    index,
                    name: item.name.clone(),
                    price: item.price.display(),
                    image: item.image.clone(),
                })
                .collect(),
            count: cart.len(),
            total: cart.total().display(),
        }
    }
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    /// Email local part, used in the greeting.
    pub greeting_name: String,
    pub member_since: String,
    pub is_admin: bool,
    pub cakes: Vec<CakeView>,
    pub cart: CartView,
    pub flash: Option<Flash>,
}

impl DashboardTemplate {
    #[must_use]
    pub fn new(user: &CurrentUser, is_admin: bool, cart: &Cart, flash: Option<Flash>) -> Self {
        Self {
            greeting_name: user.email.mailbox().to_string(),
            member_since: user.created_at.format("%B %-d, %Y").to_string(),
            is_admin,
            cakes: catalog().iter().map(CakeView::from).collect(),
            cart: CartView::from(cart),
            flash,
        }
    }
}

/// Display the dashboard.
#[instrument(skip(user, state, session), fields(user_id = %user.id))]
pub async fn index(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
) -> DashboardTemplate {
    let cart = load_cart(&session).await;
    let flash = take_flash(&session).await;
    let is_admin = state.config().admin.is_admin(&user.email);

    DashboardTemplate::new(&user, is_admin, &cart, flash)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use sweet_meraki_core::{CakeId, Email, UserId, catalog::find};

    use super::*;

    fn user() -> CurrentUser {
        CurrentUser {
            id: UserId::new(7),
            email: Email::parse("hanshika@example.com").unwrap(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_dashboard_view() {
        let mut cart = Cart::new();
        cart.add(find(CakeId::new(1)).unwrap());
        cart.add(find(CakeId::new(2)).unwrap());

        let page = DashboardTemplate::new(&user(), false, &cart, None);

        assert_eq!(page.greeting_name, "hanshika");
        assert_eq!(page.member_since, "March 9, 2024");
        assert_eq!(page.cakes.len(), 6);
        assert_eq!(page.cart.count, 2);
        assert_eq!(page.cart.total, "$83");
        assert_eq!(page.cart.lines[1].index, 1);
        assert_eq!(page.cart.lines[1].name, "Strawberry Bliss");
    }

    #[test]
    fn test_renders_cart_and_admin_link() {
        let mut cart = Cart::new();
        cart.add(find(CakeId::new(3)).unwrap());

        let html = DashboardTemplate::new(&user(), true, &cart, None)
            .render()
            .unwrap();

        assert!(html.contains("Welcome back, hanshika!"));
        assert!(html.contains("Total: $52"));
        assert!(html.contains("href=\"/admin\""));
    }

    #[test]
    fn test_hides_admin_link_and_empty_cart() {
        let html = DashboardTemplate::new(&user(), false, &Cart::new(), None)
            .render()
            .unwrap();

        assert!(!html.contains("href=\"/admin\""));
        assert!(!html.contains("Your Cart"));
    }
}
