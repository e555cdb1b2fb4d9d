//! Sweet Meraki storefront library.
//!
//! The landing page, customer dashboard and admin order desk as an axum
//! application. `main.rs` wires it to Postgres sessions and Sentry; the
//! integration tests drive [`routes::app`] in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
