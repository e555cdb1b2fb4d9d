//! Order repository tests against a migrated database.
//!
//! Requirements:
//! - A placed order is stored pending with the cart's lines and total
//! - After a status update the stored status is the one selected
//! - Updating an unknown order is `NotFound`
//! - Listing returns newest first
//! - Before the orders table exists, inserts fail as a missing table and
//!   checkout acknowledges the order while keeping the cart

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::http::StatusCode;
use sqlx::PgPool;
use url::Url;
use uuid::Uuid;

use sweet_meraki_core::{
    AdminPolicy, Cart, CakeId, Email, NewOrder, OrderId, OrderStatus, Price, UserId, catalog,
};
use sweet_meraki_integration_tests::TestApp;
use sweet_meraki_storefront::db::{OrderRepository, RepositoryError, UserRepository};
use sweet_meraki_storefront::models::User;

fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set")
}

async fn pool() -> PgPool {
    PgPool::connect(&database_url())
        .await
        .expect("connect to test database")
}

/// Scratch database with the `storefront` schema and status enum, but no
/// orders table.
async fn database_without_orders() -> (PgPool, String) {
    let name = format!("sm_no_orders_{}", Uuid::new_v4().simple());
    let server = pool().await;
    sqlx::raw_sql(&format!("CREATE DATABASE {name}"))
        .execute(&server)
        .await
        .expect("create scratch database");
    server.close().await;

    let mut url = Url::parse(&database_url()).expect("valid DATABASE_URL");
    url.set_path(&name);
    let scratch = PgPool::connect(url.as_str())
        .await
        .expect("connect to scratch database");
    sqlx::raw_sql(
        r"
        CREATE SCHEMA storefront;
        CREATE TYPE storefront.order_status AS ENUM (
            'pending', 'confirmed', 'preparing', 'ready', 'delivered', 'cancelled'
        );
        ",
    )
    .execute(&scratch)
    .await
    .expect("create schema");

    (scratch, name)
}

async fn drop_database(scratch: PgPool, name: &str) {
    scratch.close().await;
    let server = pool().await;
    sqlx::raw_sql(&format!("DROP DATABASE IF EXISTS {name}"))
        .execute(&server)
        .await
        .expect("drop scratch database");
}

async fn customer(pool: &PgPool) -> User {
    let email = Email::parse(&format!("orders-{}@example.com", Uuid::new_v4())).unwrap();
    UserRepository::new(pool)
        .create_with_password(&email, "not-a-real-hash")
        .await
        .expect("create customer")
}

fn cart_of(ids: &[i32]) -> Cart {
    let mut cart = Cart::new();
    for id in ids {
        cart.add(catalog::find(CakeId::new(*id)).expect("cake in catalog"));
    }
    cart
}

#[tokio::test]
#[ignore = "Requires migrated database at DATABASE_URL"]
async fn test_insert_stores_pending_order() {
    let pool = pool().await;
    let user = customer(&pool).await;
    let new_order = NewOrder::from_cart(user.id, user.email.clone(), &cart_of(&[1, 2])).unwrap();

    let order = OrderRepository::new(&pool).insert(&new_order).await.unwrap();

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.total_amount, Price::dollars(83));
    assert_eq!(order.user_email, user.email);
    assert_eq!(order.order_details.unwrap().item_count, 2);
}

#[tokio::test]
#[ignore = "Requires migrated database at DATABASE_URL"]
async fn test_update_status_persists_any_transition() {
    let pool = pool().await;
    let user = customer(&pool).await;
    let repo = OrderRepository::new(&pool);
    let new_order = NewOrder::from_cart(user.id, user.email.clone(), &cart_of(&[3])).unwrap();
    let order = repo.insert(&new_order).await.unwrap();

    let delivered = repo
        .update_status(order.id, OrderStatus::Delivered)
        .await
        .unwrap();
    assert_eq!(delivered.status, OrderStatus::Delivered);
    assert!(delivered.updated_at >= order.updated_at);

    let reopened = repo
        .update_status(order.id, OrderStatus::Pending)
        .await
        .unwrap();
    assert_eq!(reopened.status, OrderStatus::Pending);

    let listed = repo.list_recent().await.unwrap();
    let stored = listed.iter().find(|o| o.id == order.id).unwrap();
    assert_eq!(stored.status, OrderStatus::Pending);
}

#[tokio::test]
#[ignore = "Requires migrated database at DATABASE_URL"]
async fn test_update_unknown_order_is_not_found() {
    let pool = pool().await;

    let result = OrderRepository::new(&pool)
        .update_status(OrderId::new(Uuid::new_v4()), OrderStatus::Ready)
        .await;

    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[tokio::test]
#[ignore = "Requires migrated database at DATABASE_URL"]
async fn test_list_recent_is_newest_first() {
    let pool = pool().await;
    let user = customer(&pool).await;
    let repo = OrderRepository::new(&pool);

    let first = repo
        .insert(&NewOrder::from_cart(user.id, user.email.clone(), &cart_of(&[4])).unwrap())
        .await
        .unwrap();
    let second = repo
        .insert(&NewOrder::from_cart(user.id, user.email.clone(), &cart_of(&[5])).unwrap())
        .await
        .unwrap();

    let listed = repo.list_recent().await.unwrap();
    let first_at = listed.iter().position(|o| o.id == first.id).unwrap();
    let second_at = listed.iter().position(|o| o.id == second.id).unwrap();
    assert!(second_at < first_at);
}

#[tokio::test]
#[ignore = "Requires Postgres at DATABASE_URL with CREATE DATABASE rights"]
async fn test_insert_without_orders_table_is_missing_table() {
    let (scratch, name) = database_without_orders().await;
    let email = Email::parse("early@example.com").unwrap();
    let new_order = NewOrder::from_cart(UserId::new(1), email, &cart_of(&[1])).unwrap();

    let result = OrderRepository::new(&scratch).insert(&new_order).await;
    drop_database(scratch, &name).await;

    let err = result.expect_err("insert must fail without the orders table");
    assert!(err.is_missing_table(), "expected a missing table, got: {err}");
}

#[tokio::test]
#[ignore = "Requires Postgres at DATABASE_URL with CREATE DATABASE rights"]
async fn test_checkout_without_orders_table_keeps_cart() {
    let (scratch, name) = database_without_orders().await;
    let app = TestApp::with_pool(scratch.clone(), AdminPolicy::default());
    app.sign_in("early@example.com").await;
    app.post_form("/cart/add", "cake_id=1").await;

    let response = app.post_form("/orders", "").await;
    let page = app.get("/dashboard").await;
    drop(app);
    drop_database(scratch, &name).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/dashboard"));
    assert!(page.body.contains("Order received!"));
    assert!(page.body.contains("Orders will be saved once the database table is created."));
    assert!(page.body.contains("Your Cart"));
}
