//! Environment-dependent shortcuts for local and automated testing

use hub_shared::config::{CaptchaConfig, CheckBypassGate, Environment, VerifyCodeConfig};

/// Decides every debug bypass the verification workflow honours
pub trait EnvironmentPolicy: Send + Sync {
    /// Code to issue instead of a random one
    fn fixed_code(&self) -> Option<String>;

    /// Whether to skip real delivery for this subject
    fn skip_delivery(&self, subject: &str) -> bool;

    /// Whether to accept any answer for this subject
    fn bypass_check(&self, subject: &str) -> bool;

    /// Whether to accept any answer for this captcha id
    fn bypass_captcha(&self, captcha_id: &str) -> bool;
}

/// Policy driven by the environment and the debug settings
///
/// Empty patterns never match.
#[derive(Debug, Clone)]
pub struct DebugPolicy {
    environment: Environment,
    debug_code: String,
    debug_phone_prefix: String,
    debug_phone_suffix: String,
    debug_email_suffix: String,
    check_bypass: CheckBypassGate,
    captcha_testing_key: String,
}

impl DebugPolicy {
    pub fn new(
        environment: Environment,
        verify_code: &VerifyCodeConfig,
        captcha: &CaptchaConfig,
    ) -> Self {
        Self {
            environment,
            debug_code: verify_code.debug_code.clone(),
            debug_phone_prefix: verify_code.debug_phone_prefix.clone(),
            debug_phone_suffix: verify_code.debug_phone_suffix.clone(),
            debug_email_suffix: verify_code.debug_email_suffix.clone(),
            check_bypass: verify_code.check_bypass,
            captcha_testing_key: captcha.testing_key.clone(),
        }
    }

    /// Policy with every bypass off, as in production with empty patterns
    pub fn strict() -> Self {
        Self {
            environment: Environment::Production,
            debug_code: String::new(),
            debug_phone_prefix: String::new(),
            debug_phone_suffix: String::new(),
            debug_email_suffix: String::new(),
            check_bypass: CheckBypassGate::Disabled,
            captcha_testing_key: String::new(),
        }
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }
}

fn has_prefix(value: &str, pattern: &str) -> bool {
    !pattern.is_empty() && value.starts_with(pattern)
}

fn has_suffix(value: &str, pattern: &str) -> bool {
    !pattern.is_empty() && value.ends_with(pattern)
}

impl EnvironmentPolicy for DebugPolicy {
    fn fixed_code(&self) -> Option<String> {
        if self.environment.is_local() && !self.debug_code.is_empty() {
            Some(self.debug_code.clone())
        } else {
            None
        }
    }

    fn skip_delivery(&self, subject: &str) -> bool {
        !self.environment.is_production() && has_prefix(subject, &self.debug_phone_prefix)
    }

    fn bypass_check(&self, subject: &str) -> bool {
        self.check_bypass.is_open(self.environment.is_production())
            && (has_suffix(subject, &self.debug_phone_suffix)
                || has_suffix(subject, &self.debug_email_suffix))
    }

    fn bypass_captcha(&self, captcha_id: &str) -> bool {
        !self.environment.is_production()
            && !self.captcha_testing_key.is_empty()
            && captcha_id == self.captcha_testing_key
    }
}
