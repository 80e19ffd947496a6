//! SMS provider configuration

use serde::{Deserialize, Serialize};

/// SMS delivery settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SmsConfig {
    /// Delivery driver: "aliyun" or "mock"
    pub driver: String,

    /// Aliyun Dysmsapi credentials and template
    pub aliyun: AliyunSmsConfig,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            driver: String::from("mock"),
            aliyun: AliyunSmsConfig::default(),
        }
    }
}

/// Aliyun SMS settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AliyunSmsConfig {
    pub access_key_id: String,
    pub access_key_secret: String,
    pub sign_name: String,
    pub template_code: String,
    /// API host, without scheme
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AliyunSmsConfig {
    fn default() -> Self {
        Self {
            access_key_id: String::new(),
            access_key_secret: String::new(),
            sign_name: String::from("阿里云短信测试"),
            template_code: String::from("SMS_154950909"),
            endpoint: String::from("dysmsapi.aliyuncs.com"),
            timeout_secs: 10,
        }
    }
}
