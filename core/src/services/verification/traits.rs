//! Traits for code storage and delivery integration

use async_trait::async_trait;
use constant_time_eq::constant_time_eq;

use crate::errors::DomainResult;

use super::types::{CheckOutcome, SmsMessage};

/// Key-value store for issued codes
///
/// Keys are subjects (or captcha ids); implementations apply their own
/// namespace prefix and expiry. Writing a key replaces any previous value.
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Store a value with the implementation's TTL
    async fn set(&self, key: &str, value: &str) -> DomainResult<()>;

    /// Read a value, deleting it when `clear` is set
    async fn get(&self, key: &str, clear: bool) -> DomainResult<Option<String>>;

    /// Delete a value; deleting a missing key is not an error
    async fn remove(&self, key: &str) -> DomainResult<()>;

    /// Compare `answer` with the stored value
    ///
    /// The entry is deleted only when the answer matches and `clear` is set.
    async fn check(&self, key: &str, answer: &str, clear: bool) -> DomainResult<CheckOutcome> {
        let outcome = match self.get(key, false).await? {
            None => CheckOutcome::Missing,
            Some(stored) if constant_time_eq(stored.as_bytes(), answer.as_bytes()) => {
                CheckOutcome::Matched
            }
            Some(_) => CheckOutcome::Mismatch,
        };

        if clear && outcome.is_match() {
            self.remove(key).await?;
        }

        Ok(outcome)
    }

    /// Boolean form of [`CodeStore::check`]; missing keys are a plain `false`
    async fn verify(&self, key: &str, answer: &str, clear: bool) -> DomainResult<bool> {
        Ok(self.check(key, answer, clear).await?.is_match())
    }
}

/// Outbound message channel (SMS gateway)
///
/// Failures are reported as `false`; retry policy belongs to the caller.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// Send a templated message to the subject
    async fn send(&self, subject: &str, message: &SmsMessage) -> bool;

    /// Provider name used in logs
    fn provider_name(&self) -> &str;
}
