//! SMS delivery channels
//!
//! - **Aliyun**: production delivery through Dysmsapi
//! - **Mock**: logs messages, for development and tests

use std::sync::Arc;

use hub_core::services::verification::DeliveryChannel;
use hub_shared::config::SmsConfig;

use crate::InfrastructureError;

pub mod aliyun;
pub mod mock_sms;

pub use aliyun::{AliyunSms, SendSmsResponse, SignedRequest};
pub use mock_sms::MockSms;

#[cfg(test)]
mod tests;

/// Create the delivery channel selected by `sms.driver`
pub fn create_channel(config: &SmsConfig) -> Result<Arc<dyn DeliveryChannel>, InfrastructureError> {
    match config.driver.as_str() {
        "mock" => Ok(Arc::new(MockSms::new())),
        "aliyun" => Ok(Arc::new(AliyunSms::new(config.aliyun.clone())?)),
        other => Err(InfrastructureError::Config(format!(
            "Unknown SMS driver: {}",
            other
        ))),
    }
}
