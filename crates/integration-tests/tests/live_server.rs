//! End-to-end flows against a running storefront.
//!
//! Start the server against a migrated database first:
//!
//! ```bash
//! cargo run -p sweet-meraki-cli -- migrate
//! cargo run -p sweet-meraki-storefront
//! ```
//!
//! Requirements:
//! - A new customer can register, fill a cart and place an order
//! - An admin sees that order and can change its status
//! - Duplicate registrations are refused

#![allow(clippy::unwrap_used, clippy::expect_used)]

use reqwest::Client;
use uuid::Uuid;

use sweet_meraki_integration_tests::storefront_base_url;

fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build HTTP client")
}

fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", Uuid::new_v4().simple())
}

/// Register and land on the dashboard; returns the page body.
async fn register(client: &Client, email: &str) -> String {
    let base_url = storefront_base_url();
    let resp = client
        .post(format!("{base_url}/auth/register"))
        .form(&[
            ("email", email),
            ("password", "sweet-meraki-test"),
            ("password_confirm", "sweet-meraki-test"),
        ])
        .send()
        .await
        .expect("Failed to register");

    assert!(resp.status().is_success(), "Register failed: {}", resp.status());
    assert!(resp.url().path().ends_with("/dashboard"), "Landed on {}", resp.url());
    resp.text().await.unwrap()
}

/// Pull the first order ID out of the admin desk's htmx targets.
fn first_order_id(admin_page: &str) -> Option<&str> {
    let start = admin_page.find("hx-post=\"/admin/orders/")? + "hx-post=\"/admin/orders/".len();
    let rest = admin_page.get(start..)?;
    let end = rest.find('/')?;
    rest.get(..end)
}

#[tokio::test]
#[ignore = "Requires running storefront server on STOREFRONT_BASE_URL"]
async fn test_customer_places_order() {
    let client = client();
    let base_url = storefront_base_url();

    let dashboard = register(&client, &unique_email("customer")).await;
    assert!(dashboard.contains("Choose Your Cake"));

    for cake_id in ["1", "2"] {
        client
            .post(format!("{base_url}/cart/add"))
            .form(&[("cake_id", cake_id)])
            .send()
            .await
            .expect("Failed to add to cart");
    }

    let resp = client
        .post(format!("{base_url}/orders"))
        .send()
        .await
        .expect("Failed to place order");
    let body = resp.text().await.unwrap();

    assert!(body.contains("Order placed successfully!"), "No confirmation in: {body}");
    assert!(body.contains("Total: $83"));
    assert!(!body.contains("Your Cart"));
}

#[tokio::test]
#[ignore = "Requires running storefront server on STOREFRONT_BASE_URL"]
async fn test_admin_updates_order_status() {
    let base_url = storefront_base_url();

    let customer = client();
    register(&customer, &unique_email("customer")).await;
    customer
        .post(format!("{base_url}/cart/add"))
        .form(&[("cake_id", "3")])
        .send()
        .await
        .unwrap();
    customer
        .post(format!("{base_url}/orders"))
        .send()
        .await
        .unwrap();

    // Any address containing "admin" is an admin under the default policy.
    let admin = client();
    register(&admin, &unique_email("admin")).await;

    let desk = admin
        .get(format!("{base_url}/admin"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(desk.contains("Total Orders"));
    let order_id = first_order_id(&desk).expect("order row on admin desk");

    let resp = admin
        .post(format!("{base_url}/admin/orders/{order_id}/status"))
        .header("hx-request", "true")
        .form(&[("status", "ready")])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let row = resp.text().await.unwrap();
    assert!(row.starts_with("<tr"), "Expected a table row, got: {row}");
    assert!(row.contains("badge-ready"));
}

#[tokio::test]
#[ignore = "Requires running storefront server on STOREFRONT_BASE_URL"]
async fn test_duplicate_registration_is_refused() {
    let base_url = storefront_base_url();
    let email = unique_email("twice");

    register(&client(), &email).await;

    let resp = client()
        .post(format!("{base_url}/auth/register"))
        .form(&[
            ("email", email.as_str()),
            ("password", "sweet-meraki-test"),
            ("password_confirm", "sweet-meraki-test"),
        ])
        .send()
        .await
        .unwrap();

    assert!(resp.url().as_str().contains("error=email_taken"));
}

#[test]
fn test_first_order_id_reads_htmx_target() {
    let page = r#"<tr><select hx-post="/admin/orders/0b0e9a36-4c1d/status"></select></tr>"#;
    assert_eq!(first_order_id(page), Some("0b0e9a36-4c1d"));
    assert_eq!(first_order_id("<p>No orders yet</p>"), None);
}
