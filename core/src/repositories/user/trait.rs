//! User repository trait defining the lookups signup needs.

use async_trait::async_trait;

use crate::errors::DomainError;

/// Repository trait for user existence checks
///
/// Implementations return `Ok(false)` for unknown users and reserve
/// `Err` for storage failures.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Whether a user with this phone number is registered
    async fn is_phone_exist(&self, phone: &str) -> Result<bool, DomainError>;

    /// Whether a user with this email address is registered
    async fn is_email_exist(&self, email: &str) -> Result<bool, DomainError>;
}
