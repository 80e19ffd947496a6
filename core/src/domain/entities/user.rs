//! User entity representing a registered Gohub account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registered user
///
/// Contact details and the password hash never leave the process in
/// serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Auto-increment primary key
    pub id: u64,

    /// Display name
    pub name: String,

    #[serde(skip_serializing)]
    pub email: String,

    #[serde(skip_serializing)]
    pub phone: String,

    #[serde(skip_serializing)]
    pub password: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new, not yet persisted user
    pub fn new(name: impl Into<String>, phone: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            password: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the user registered with a phone number
    pub fn has_phone(&self) -> bool {
        !self.phone.is_empty()
    }

    /// Whether the user registered with an email address
    pub fn has_email(&self) -> bool {
        !self.email.is_empty()
    }
}
