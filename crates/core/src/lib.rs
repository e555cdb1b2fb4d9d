//! Sweet Meraki Core - Shared domain types for the bakery storefront.
//!
//! This crate provides the types used by every Sweet Meraki component:
//! - `storefront` - Landing page, customer dashboard, and admin order desk
//! - `cli` - Command-line tools for migrations and user management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. Database encoding for the newtypes is available behind the
//! `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, and order status
//! - [`catalog`] - The fixed cake catalog
//! - [`cart`] - In-session shopping cart
//! - [`order`] - Order snapshots and admin statistics
//! - [`admin`] - Admin access policy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod order;
pub mod types;

pub use admin::AdminPolicy;
pub use cart::Cart;
pub use catalog::{Cake, catalog};
pub use order::{CakeSummary, LineItem, NewOrder, Order, OrderDetails, OrderError, OrderStats};
pub use types::*;
