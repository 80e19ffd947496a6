//! Configuration for the verification service

use hub_shared::config::{SmsConfig, VerifyCodeConfig};

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of digits in generated codes
    pub code_length: usize,
    /// Provider template the code is rendered into
    pub sms_template: String,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            sms_template: String::from("SMS_154950909"),
        }
    }
}

impl VerificationServiceConfig {
    /// Build from the loaded application settings
    pub fn from_settings(verify_code: &VerifyCodeConfig, sms: &SmsConfig) -> Self {
        Self {
            code_length: verify_code.code_length,
            sms_template: sms.aliyun.template_code.clone(),
        }
    }
}
