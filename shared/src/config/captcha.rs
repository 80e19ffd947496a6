//! Image captcha configuration

use serde::{Deserialize, Serialize};

/// Number of digits the send-code endpoint accepts as a captcha answer
pub const CAPTCHA_ANSWER_LENGTH: usize = 6;

/// Settings for the digit image captcha
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CaptchaConfig {
    /// Image height in pixels
    pub height: u32,

    /// Image width in pixels
    pub width: u32,

    /// Number of digits
    pub length: usize,

    /// Maximum glyph skew, 0.0 to 1.0
    pub max_skew: f64,

    /// Number of noise dots
    pub dot_count: u32,

    /// Lifetime of an issued captcha
    pub expire_minutes: u64,

    /// Lifetime of an issued captcha in local mode
    pub debug_expire_minutes: u64,

    /// Captcha id accepted without an answer outside production
    pub testing_key: String,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            height: 80,
            width: 240,
            length: CAPTCHA_ANSWER_LENGTH,
            max_skew: 0.7,
            dot_count: 80,
            expire_minutes: 15,
            debug_expire_minutes: 10080,
            testing_key: String::from("captcha_skip_test"),
        }
    }
}
