//! Verification code configuration

use serde::{Deserialize, Serialize};

/// Settings for SMS / email verification codes
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VerifyCodeConfig {
    /// Number of digits in a generated code
    pub code_length: usize,

    /// Lifetime of an issued code
    pub expire_minutes: u64,

    /// Lifetime of an issued code in local mode
    pub debug_expire_minutes: u64,

    /// Code issued in local mode instead of a random one
    pub debug_code: String,

    /// Phones starting with this are never sent a real SMS outside production
    pub debug_phone_prefix: String,

    /// Phones ending with this pass the answer check when the bypass applies
    pub debug_phone_suffix: String,

    /// Emails ending with this pass the answer check when the bypass applies
    pub debug_email_suffix: String,

    /// Which environments honour the answer-check bypass
    pub check_bypass: CheckBypassGate,
}

impl Default for VerifyCodeConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            expire_minutes: 15,
            debug_expire_minutes: 10080,
            debug_code: String::from("123456"),
            debug_phone_prefix: String::from("000"),
            debug_phone_suffix: String::new(),
            debug_email_suffix: String::from("@testing.com"),
            check_bypass: CheckBypassGate::default(),
        }
    }
}

/// Gate for the answer-check debug bypass
///
/// `NonProduction` mirrors the send path. `Production` reproduces the legacy
/// behaviour where the bypass was only active in production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckBypassGate {
    NonProduction,
    Production,
    Disabled,
}

impl Default for CheckBypassGate {
    fn default() -> Self {
        CheckBypassGate::NonProduction
    }
}

impl CheckBypassGate {
    /// Whether the bypass is active given the production flag
    pub fn is_open(&self, is_production: bool) -> bool {
        match self {
            CheckBypassGate::NonProduction => !is_production,
            CheckBypassGate::Production => is_production,
            CheckBypassGate::Disabled => false,
        }
    }
}
