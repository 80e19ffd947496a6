//! Verification service issuing and checking codes

use std::sync::Arc;

use hub_shared::subject::mask_subject;

use crate::errors::DomainResult;

use super::config::VerificationServiceConfig;
use super::generator::CodeGenerator;
use super::policy::EnvironmentPolicy;
use super::traits::{CodeStore, DeliveryChannel};
use super::types::{CheckOutcome, SmsMessage};

/// Verification service for phone and email codes
///
/// Holds no mutable state of its own; issued codes live in the store, so a
/// single instance is shared across request handlers. Issuing a code for a
/// subject replaces the previous one. Expiry is left to the store's TTL.
pub struct VerifyCodeService<S, D, P>
where
    S: CodeStore + ?Sized,
    D: DeliveryChannel + ?Sized,
    P: EnvironmentPolicy + ?Sized,
{
    store: Arc<S>,
    channel: Arc<D>,
    policy: Arc<P>,
    generator: CodeGenerator,
    config: VerificationServiceConfig,
}

impl<S, D, P> VerifyCodeService<S, D, P>
where
    S: CodeStore + ?Sized,
    D: DeliveryChannel + ?Sized,
    P: EnvironmentPolicy + ?Sized,
{
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `store` - Store for issued codes, already namespaced
    /// * `channel` - SMS delivery channel
    /// * `policy` - Environment policy consulted for debug bypasses
    /// * `config` - Service configuration
    pub fn new(
        store: Arc<S>,
        channel: Arc<D>,
        policy: Arc<P>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            store,
            channel,
            policy,
            generator: CodeGenerator::new(config.code_length),
            config,
        }
    }

    /// Issue a code for a phone number and deliver it by SMS
    ///
    /// The code is stored before delivery is attempted. Store failures are
    /// returned as errors. Delivery failures are logged and reported as
    /// `Ok(false)` without retrying.
    pub async fn send_sms(&self, phone: &str) -> DomainResult<bool> {
        let code = self.issue_code(phone).await?;

        if self.policy.skip_delivery(phone) {
            tracing::debug!(
                phone = %mask_subject(phone),
                event = "sms_delivery_skipped",
                "Debug phone number, SMS not sent"
            );
            return Ok(true);
        }

        let message = SmsMessage::new(self.config.sms_template.as_str()).with("code", code);
        let delivered = self.channel.send(phone, &message).await;

        if delivered {
            tracing::info!(
                phone = %mask_subject(phone),
                provider = self.channel.provider_name(),
                event = "sms_sent",
                "Verification code sent"
            );
        } else {
            tracing::error!(
                phone = %mask_subject(phone),
                provider = self.channel.provider_name(),
                event = "sms_send_failed",
                "Failed to deliver verification code"
            );
        }

        Ok(delivered)
    }

    /// Check a submitted answer; `key` is a phone number or email address
    ///
    /// A matched code is left in place so repeated submissions keep working
    /// until it expires.
    pub async fn check_answer(&self, key: &str, answer: &str) -> DomainResult<bool> {
        Ok(self.check_answer_detailed(key, answer).await?.is_match())
    }

    /// Like [`Self::check_answer`] but tells a wrong answer from a missing code
    pub async fn check_answer_detailed(&self, key: &str, answer: &str) -> DomainResult<CheckOutcome> {
        if self.policy.bypass_check(key) {
            tracing::debug!(
                subject = %mask_subject(key),
                event = "verify_code_bypassed",
                "Debug subject, verification code accepted"
            );
            return Ok(CheckOutcome::Matched);
        }

        let outcome = self.store.check(key, answer, false).await?;

        tracing::debug!(
            subject = %mask_subject(key),
            outcome = ?outcome,
            event = "verify_code_checked",
            "Checked verification code"
        );

        Ok(outcome)
    }

    async fn issue_code(&self, key: &str) -> DomainResult<String> {
        let code = self
            .policy
            .fixed_code()
            .unwrap_or_else(|| self.generator.generate());

        tracing::debug!(
            subject = %mask_subject(key),
            event = "verify_code_generated",
            "Generated verification code"
        );

        self.store.set(key, &code).await.map_err(|e| {
            tracing::error!(
                subject = %mask_subject(key),
                error = %e,
                event = "verify_code_store_failed",
                "Failed to store verification code"
            );
            e
        })?;

        Ok(code)
    }
}
