//! Captcha rendering seam

use crate::errors::DomainResult;

use super::types::Challenge;

/// Renders a new captcha challenge
pub trait CaptchaDriver: Send + Sync {
    fn generate(&self) -> DomainResult<Challenge>;
}
