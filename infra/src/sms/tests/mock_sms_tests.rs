//! Unit tests for mock SMS channel

use hub_core::services::verification::{DeliveryChannel, SmsMessage};

use crate::sms::MockSms;

#[tokio::test]
async fn test_mock_sms_send_success() {
    let sms = MockSms::new();
    let message = SmsMessage::new("SMS_154950909").with("code", "123456");

    assert!(sms.send("13812345678", &message).await);
    assert_eq!(sms.sent_messages().len(), 1);
    assert_eq!(sms.last_message_to("13812345678"), Some(message));
    assert_eq!(sms.provider_name(), "Mock");
}

#[tokio::test]
async fn test_mock_sms_simulate_failure() {
    let sms = MockSms::new();
    sms.set_simulate_failure(true);

    assert!(!sms.send("13812345678", &SmsMessage::new("T")).await);
    assert!(sms.sent_messages().is_empty());

    sms.set_simulate_failure(false);
    assert!(sms.send("13812345678", &SmsMessage::new("T")).await);
}

#[tokio::test]
async fn test_clones_share_history() {
    let sms = MockSms::new();
    let clone = sms.clone();

    clone.send("13812345678", &SmsMessage::new("T")).await;
    assert_eq!(sms.sent_messages().len(), 1);
}
