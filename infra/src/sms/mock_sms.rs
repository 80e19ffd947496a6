//! Mock SMS delivery for development and testing
//!
//! Logs messages instead of sending them and keeps a copy for assertions.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use hub_core::services::verification::{DeliveryChannel, SmsMessage};
use hub_shared::subject::mask_subject;

/// Mock SMS channel
#[derive(Clone, Default)]
pub struct MockSms {
    sent: Arc<Mutex<Vec<(String, SmsMessage)>>>,
    simulate_failure: Arc<AtomicBool>,
}

impl MockSms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail (or succeed again)
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Messages delivered so far
    pub fn sent_messages(&self) -> Vec<(String, SmsMessage)> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// Last message delivered to a phone number
    pub fn last_message_to(&self, phone: &str) -> Option<SmsMessage> {
        self.sent_messages()
            .into_iter()
            .rev()
            .find(|(to, _)| to == phone)
            .map(|(_, message)| message)
    }
}

#[async_trait]
impl DeliveryChannel for MockSms {
    async fn send(&self, subject: &str, message: &SmsMessage) -> bool {
        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                target: "sms_service",
                provider = "mock",
                phone = %mask_subject(subject),
                "Mock SMS simulating failure"
            );
            return false;
        }

        info!(
            target: "sms_service",
            provider = "mock",
            phone = %mask_subject(subject),
            template = %message.template,
            data = ?message.data,
            "SMS sent successfully (mock)"
        );

        if let Ok(mut sent) = self.sent.lock() {
            sent.push((subject.to_string(), message.clone()));
        }
        true
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
