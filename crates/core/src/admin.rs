//! Who gets to see the admin order desk.
//!
//! There are no roles in the user table. An account is an admin when its
//! email is on the allow-list, or when it contains the configured marker
//! (by default any address containing `admin`).

use crate::types::Email;

/// Default allow-listed admin address.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@sweermeraki.com";

/// Default marker substring.
pub const DEFAULT_ADMIN_MARKER: &str = "admin";

/// Admin access rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminPolicy {
    emails: Vec<Email>,
    marker: Option<String>,
}

impl AdminPolicy {
    /// Build a policy from an allow-list and an optional marker.
    ///
    /// An empty marker is treated as no marker.
    #[must_use]
    pub fn new(emails: Vec<Email>, marker: Option<String>) -> Self {
        let marker = marker
            .map(|m| m.trim().to_lowercase())
            .filter(|m| !m.is_empty());
        Self { emails, marker }
    }

    #[must_use]
    pub fn is_admin(&self, email: &Email) -> bool {
        self.emails.contains(email)
            || self
                .marker
                .as_deref()
                .is_some_and(|marker| email.as_str().contains(marker))
    }

    #[must_use]
    pub fn emails(&self) -> &[Email] {
        &self.emails
    }

    #[must_use]
    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }
}

impl Default for AdminPolicy {
    fn default() -> Self {
        let emails = Email::parse(DEFAULT_ADMIN_EMAIL).into_iter().collect();
        Self::new(emails, Some(DEFAULT_ADMIN_MARKER.to_owned()))
    }
}
