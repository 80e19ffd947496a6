//! Captcha values

use serde::{Deserialize, Serialize};

/// A rendered captcha before it is stored
#[derive(Debug, Clone)]
pub struct Challenge {
    /// Expected answer
    pub answer: String,
    /// `data:` URI with a base64 payload
    pub image: String,
}

/// A captcha handed to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptchaIssued {
    pub captcha_id: String,
    pub captcha_image: String,
}
