//! Order repository.
//!
//! Orders are inserted by customers and only ever touched again by an
//! admin changing their status. Nothing here deletes an order.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use sweet_meraki_core::{
    Email, LineItem, NewOrder, Order, OrderDetails, OrderId, OrderStatus, Price, UserId,
};

use super::RepositoryError;

/// Raw `storefront.orders` row. Status is selected as text.
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    user_id: i32,
    user_email: String,
    items: Json<Vec<LineItem>>,
    total_amount: Price,
    status: String,
    order_details: Option<Json<OrderDetails>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let user_email = Email::parse(&row.user_email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email on order {}: {e}", row.id))
        })?;
        let status = row.status.parse::<OrderStatus>().map_err(|e| {
            RepositoryError::DataCorruption(format!("order {}: {e}", row.id))
        })?;

        Ok(Self {
            id: OrderId::new(row.id),
            user_id: UserId::new(row.user_id),
            user_email,
            items: row.items.0,
            total_amount: row.total_amount,
            status,
            order_details: row.order_details.map(|d| d.0),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const ORDER_COLUMNS: &str = "id, user_id, user_email, items, total_amount, status::text AS status, \
                             order_details, created_at, updated_at";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new order and return it with its generated ID and timestamps.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails, including when
    /// the orders table does not exist (see [`RepositoryError::is_missing_table`]).
    pub async fn insert(&self, order: &NewOrder) -> Result<Order, RepositoryError> {
        let query = format!(
            r"
            INSERT INTO storefront.orders
                (user_id, user_email, items, total_amount, status, order_details)
            VALUES ($1, $2, $3, $4, $5::storefront.order_status, $6)
            RETURNING {ORDER_COLUMNS}
            "
        );

        let row = sqlx::query_as::<_, OrderRow>(&query)
            .bind(order.user_id)
            .bind(order.user_email.as_str())
            .bind(Json(&order.items))
            .bind(order.total_amount)
            .bind(order.status.as_str())
            .bind(Json(&order.order_details))
            .fetch_one(self.pool)
            .await?;

        Order::try_from(row)
    }

    /// Every order, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row cannot be decoded.
    pub async fn list_recent(&self) -> Result<Vec<Order>, RepositoryError> {
        let query = format!(
            "SELECT {ORDER_COLUMNS} FROM storefront.orders ORDER BY created_at DESC"
        );

        let rows = sqlx::query_as::<_, OrderRow>(&query)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Set an order's status and bump `updated_at`.
    ///
    /// Any status may replace any other; there are no transition rules.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has this ID.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let query = format!(
            r"
            UPDATE storefront.orders
            SET status = $2::storefront.order_status,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "
        );

        let row = sqlx::query_as::<_, OrderRow>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Order::try_from(row)
    }
}
