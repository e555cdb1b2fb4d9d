//! Admin order desk.
//!
//! Lists every order with headline stats and lets an admin change an
//! order's status. Status changes post from a `<select>` per row; htmx
//! swaps the returned row in place, plain form posts get a redirect.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use sweet_meraki_core::{Order, OrderId, OrderStats, OrderStatus};

use crate::db::{OrderRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{RequireAdmin, set_flash, take_flash};
use crate::models::{Flash, FlashKind};
use crate::state::AppState;

/// Shown to the admin when a status change doesn't stick.
pub const UPDATE_FAILED: &str = "Failed to update order status";

// =============================================================================
// Views
// =============================================================================

/// One `<option>` in a row's status selector.
#[derive(Clone)]
pub struct StatusOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// One ordered cake in the items column.
#[derive(Clone)]
pub struct OrderItemView {
    pub image: String,
    pub name: String,
    pub price: String,
}

/// A row of the orders table.
#[derive(Clone)]
pub struct OrderView {
    pub id: String,
    pub short_id: String,
    pub customer: String,
    pub items: Vec<OrderItemView>,
    pub total: String,
    pub status: &'static str,
    pub status_options: Vec<StatusOption>,
    pub date: String,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            short_id: format!("{}...", order.id.short()),
            customer: order.user_email.to_string(),
            items: order
                .items
                .iter()
                .map(|item| OrderItemView {
                    image: item.image.clone(),
                    name: item.name.clone(),
                    price: item.price.display(),
                })
                .collect(),
            total: order.total_amount.display(),
            status: order.status.as_str(),
            status_options: OrderStatus::ALL
                .into_iter()
                .map(|status| StatusOption {
                    value: status.as_str(),
                    label: status.label(),
                    selected: status == order.status,
                })
                .collect(),
            date: order.created_at.format("%b %-d, %Y").to_string(),
        }
    }
}

/// The four stat cards.
#[derive(Clone)]
pub struct StatsView {
    pub total_orders: usize,
    pub pending_orders: usize,
    pub revenue: String,
    pub average_order_value: String,
}

impl From<&OrderStats> for StatsView {
    fn from(stats: &OrderStats) -> Self {
        Self {
            total_orders: stats.total_orders,
            pending_orders: stats.pending_orders,
            revenue: stats.revenue.display_cents(),
            average_order_value: stats.average_order_value.display_cents(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Admin orders page.
#[derive(Template, WebTemplate)]
#[template(path = "admin/index.html")]
pub struct AdminTemplate {
    pub greeting_name: String,
    pub stats: StatsView,
    pub orders: Vec<OrderView>,
    pub flash: Option<Flash>,
}

impl AdminTemplate {
    #[must_use]
    pub fn new(greeting_name: &str, orders: &[Order], flash: Option<Flash>) -> Self {
        Self {
            greeting_name: greeting_name.to_string(),
            stats: StatsView::from(&OrderStats::from_orders(orders)),
            orders: orders.iter().map(OrderView::from).collect(),
            flash,
        }
    }
}

/// A single table row, returned to htmx after a status change.
#[derive(Template, WebTemplate)]
#[template(path = "admin/_order_row.html")]
pub struct OrderRowPartial {
    pub order: OrderView,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display every order, newest first.
///
/// A failed fetch is logged and shown as the empty state.
#[instrument(skip(admin, state, session), fields(user_id = %admin.id))]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
) -> AdminTemplate {
    let orders = match OrderRepository::new(state.pool()).list_recent().await {
        Ok(orders) => orders,
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch orders");
            Vec::new()
        }
    };
    let flash = take_flash(&session).await;

    AdminTemplate::new(admin.email.mailbox(), &orders, flash)
}

/// Status change form data.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("hx-request")
        .is_some_and(|value| value.as_bytes() == b"true")
}

/// Set an order's status.
///
/// Unknown statuses are a 400 and unknown orders a 404. Other failures are
/// logged and reported to the admin without changing anything.
#[instrument(skip(admin, state, session, headers, form), fields(user_id = %admin.id))]
pub async fn update_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<OrderId>,
    Form(form): Form<StatusForm>,
) -> Result<Response> {
    let status = form
        .status
        .parse::<OrderStatus>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let htmx = is_htmx(&headers);

    match OrderRepository::new(state.pool())
        .update_status(id, status)
        .await
    {
        Ok(order) => {
            tracing::info!(order_id = %order.id, status = %order.status, "Order status updated");

            if htmx {
                return Ok(OrderRowPartial {
                    order: OrderView::from(&order),
                }
                .into_response());
            }

            let flash = Flash::new(
                FlashKind::Success,
                format!("Order {}... marked {}", order.id.short(), status.label()),
            );
            set_flash(&session, &flash).await?;
            Ok(Redirect::to("/admin").into_response())
        }
        Err(RepositoryError::NotFound) => Err(AppError::NotFound(format!("order {id}"))),
        Err(e) => {
            tracing::error!(order_id = %id, error = %e, "Failed to update order status");

            if htmx {
                return Ok((StatusCode::INTERNAL_SERVER_ERROR, UPDATE_FAILED).into_response());
            }

            set_flash(&session, &Flash::new(FlashKind::Error, UPDATE_FAILED)).await?;
            Ok(Redirect::to("/admin").into_response())
        }
    }
}
