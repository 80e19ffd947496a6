//! Captcha service

use std::sync::Arc;

use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};

use crate::errors::DomainResult;
use crate::services::verification::{CodeStore, EnvironmentPolicy};

use super::traits::CaptchaDriver;
use super::types::CaptchaIssued;

/// Length of generated captcha ids
pub const CAPTCHA_ID_LENGTH: usize = 20;

/// Issues captchas and checks answers against the store
pub struct CaptchaService<S, D, P>
where
    S: CodeStore + ?Sized,
    D: CaptchaDriver + ?Sized,
    P: EnvironmentPolicy + ?Sized,
{
    store: Arc<S>,
    driver: Arc<D>,
    policy: Arc<P>,
}

impl<S, D, P> CaptchaService<S, D, P>
where
    S: CodeStore + ?Sized,
    D: CaptchaDriver + ?Sized,
    P: EnvironmentPolicy + ?Sized,
{
    pub fn new(store: Arc<S>, driver: Arc<D>, policy: Arc<P>) -> Self {
        Self {
            store,
            driver,
            policy,
        }
    }

    /// Render a captcha and remember its answer under a fresh id
    pub async fn generate(&self) -> DomainResult<CaptchaIssued> {
        let challenge = self.driver.generate()?;
        let captcha_id = Self::new_id();

        self.store.set(&captcha_id, &challenge.answer).await?;

        tracing::debug!(
            captcha_id = %captcha_id,
            event = "captcha_generated",
            "Generated captcha"
        );

        Ok(CaptchaIssued {
            captcha_id,
            captcha_image: challenge.image,
        })
    }

    /// Check an answer; the entry is kept so the form can be resubmitted
    pub async fn verify(&self, captcha_id: &str, answer: &str) -> DomainResult<bool> {
        if self.policy.bypass_captcha(captcha_id) {
            tracing::debug!(
                captcha_id = %captcha_id,
                event = "captcha_bypassed",
                "Testing captcha id accepted"
            );
            return Ok(true);
        }

        let matched = self.store.verify(captcha_id, answer, false).await?;

        tracing::debug!(
            captcha_id = %captcha_id,
            matched = matched,
            event = "captcha_checked",
            "Checked captcha answer"
        );

        Ok(matched)
    }

    fn new_id() -> String {
        OsRng
            .sample_iter(&Alphanumeric)
            .take(CAPTCHA_ID_LENGTH)
            .map(char::from)
            .collect()
    }
}
