//! Session-related types.
//!
//! Types stored in the session for authentication state, the cart, and
//! one-shot flash messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sweet_meraki_core::{Email, UserId};

use super::user::User;

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Sign-up time, shown as "Member since".
    pub created_at: DateTime<Utc>,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

/// Severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Notice,
    Error,
}

impl FlashKind {
    /// CSS modifier for the flash banner.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "flash-success",
            Self::Notice => "flash-notice",
            Self::Error => "flash-error",
        }
    }
}

/// A message shown once on the next page render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub title: String,
    /// Body lines, rendered as separate paragraphs.
    pub lines: Vec<String>,
}

impl Flash {
    #[must_use]
    pub fn new(kind: FlashKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            lines: Vec::new(),
        }
    }

    #[must_use]
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the customer's cart.
    pub const CART: &str = "cart";

    /// Key for a pending flash message.
    pub const FLASH: &str = "flash";
}
