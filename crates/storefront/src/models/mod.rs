//! Domain models for the storefront.

pub mod session;
pub mod user;

pub use session::{CurrentUser, Flash, FlashKind, keys as session_keys};
pub use user::User;
