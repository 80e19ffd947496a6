//! Unit tests for verification service

use std::sync::Arc;

use hub_shared::config::{CaptchaConfig, Environment, VerifyCodeConfig};

use crate::errors::DomainError;
use crate::services::verification::{
    CheckOutcome, CodeStore, DebugPolicy, VerificationServiceConfig, VerifyCodeService,
};

use super::mocks::{MockChannel, MockCodeStore};

type TestService = VerifyCodeService<MockCodeStore, MockChannel, DebugPolicy>;

fn build(
    env: Environment,
    store_fails: bool,
    channel_fails: bool,
    configure: impl FnOnce(&mut VerifyCodeConfig),
) -> (TestService, Arc<MockCodeStore>, Arc<MockChannel>) {
    let mut verify_code = VerifyCodeConfig::default();
    configure(&mut verify_code);

    let store = Arc::new(MockCodeStore::new(store_fails));
    let channel = Arc::new(MockChannel::new(channel_fails));
    let policy = Arc::new(DebugPolicy::new(env, &verify_code, &CaptchaConfig::default()));
    let config = VerificationServiceConfig {
        code_length: verify_code.code_length,
        sms_template: "SMS_TEST".to_string(),
    };

    let service = VerifyCodeService::new(store.clone(), channel.clone(), policy, config);
    (service, store, channel)
}

#[tokio::test]
async fn test_send_sms_stores_and_delivers() {
    let (service, store, channel) = build(Environment::Production, false, false, |_| {});

    assert!(service.send_sms("13812345678").await.unwrap());

    let stored = store.stored("13812345678").expect("code stored");
    assert_eq!(stored.len(), 6);
    assert!(stored.chars().all(|c| c.is_ascii_digit()));

    let (subject, message) = channel.last_sent().expect("message sent");
    assert_eq!(subject, "13812345678");
    assert_eq!(message.template, "SMS_TEST");
    assert_eq!(message.data.get("code"), Some(&stored));
}

#[tokio::test]
async fn test_send_sms_uses_fixed_code_locally() {
    let (service, store, channel) = build(Environment::Local, false, false, |_| {});

    assert!(service.send_sms("13812345678").await.unwrap());
    assert_eq!(store.stored("13812345678"), Some("123456".to_string()));
    assert_eq!(channel.sent_count(), 1);
}

#[tokio::test]
async fn test_send_sms_skips_delivery_for_debug_prefix() {
    let (service, store, channel) = build(Environment::Testing, false, false, |c| {
        c.debug_phone_prefix = "test".to_string();
    });

    assert!(service.send_sms("test0001234").await.unwrap());
    assert_eq!(channel.sent_count(), 0);
    assert!(store.stored("test0001234").is_some());
}

#[tokio::test]
async fn test_send_sms_delivers_debug_prefix_in_production() {
    let (service, _store, channel) = build(Environment::Production, false, false, |c| {
        c.debug_phone_prefix = "000".to_string();
    });

    assert!(service.send_sms("00012345678").await.unwrap());
    assert_eq!(channel.sent_count(), 1);
}

#[tokio::test]
async fn test_send_sms_delivery_failure_returns_false() {
    let (service, store, channel) = build(Environment::Production, false, true, |_| {});

    assert!(!service.send_sms("13812345678").await.unwrap());
    assert_eq!(channel.sent_count(), 1);
    // Code stays issued; the caller decides whether to retry
    assert!(store.stored("13812345678").is_some());
}

#[tokio::test]
async fn test_send_sms_store_failure_is_error() {
    let (service, _store, channel) = build(Environment::Production, true, false, |_| {});

    let result = service.send_sms("13812345678").await;
    assert!(matches!(result, Err(DomainError::Store { .. })));
    assert_eq!(channel.sent_count(), 0);
}

#[tokio::test]
async fn test_new_code_replaces_previous() {
    let (service, store, _channel) = build(Environment::Production, false, false, |_| {});

    service.send_sms("13812345678").await.unwrap();
    store.set("13812345678", "111111").await.unwrap();
    service.send_sms("13812345678").await.unwrap();

    let latest = store.stored("13812345678").unwrap();
    assert!(service.check_answer("13812345678", &latest).await.unwrap());
}

#[tokio::test]
async fn test_check_answer_allows_repeated_submission() {
    let (service, store, _channel) = build(Environment::Production, false, false, |_| {});
    store.set("13800000000", "1234").await.unwrap();

    assert!(service.check_answer("13800000000", "1234").await.unwrap());
    assert!(service.check_answer("13800000000", "1234").await.unwrap());
    assert!(!service.check_answer("13800000000", "0000").await.unwrap());
}

#[tokio::test]
async fn test_check_answer_detailed_outcomes() {
    let (service, store, _channel) = build(Environment::Production, false, false, |_| {});
    store.set("13800000000", "1234").await.unwrap();

    assert_eq!(
        service.check_answer_detailed("13800000000", "1234").await.unwrap(),
        CheckOutcome::Matched
    );
    assert_eq!(
        service.check_answer_detailed("13800000000", "4321").await.unwrap(),
        CheckOutcome::Mismatch
    );
    assert_eq!(
        service.check_answer_detailed("13900000000", "1234").await.unwrap(),
        CheckOutcome::Missing
    );
}

#[tokio::test]
async fn test_check_answer_bypass_for_debug_email() {
    let (service, _store, _channel) = build(Environment::Local, false, false, |_| {});

    assert!(service.check_answer("someone@testing.com", "anything").await.unwrap());
    assert!(!service.check_answer("someone@example.com", "anything").await.unwrap());
}

#[tokio::test]
async fn test_check_answer_no_bypass_in_production_by_default() {
    let (service, _store, _channel) = build(Environment::Production, false, false, |_| {});

    assert!(!service.check_answer("someone@testing.com", "anything").await.unwrap());
}

#[tokio::test]
async fn test_check_answer_store_failure_is_error() {
    let (service, _store, _channel) = build(Environment::Production, true, false, |_| {});

    assert!(service.check_answer("13800000000", "1234").await.is_err());
}

#[tokio::test]
async fn test_service_over_trait_objects() {
    let store: Arc<dyn CodeStore> = Arc::new(MockCodeStore::new(false));
    let channel: Arc<dyn crate::services::verification::DeliveryChannel> =
        Arc::new(MockChannel::new(false));
    let policy: Arc<dyn crate::services::verification::EnvironmentPolicy> =
        Arc::new(DebugPolicy::strict());

    let service = VerifyCodeService::new(
        store.clone(),
        channel,
        policy,
        VerificationServiceConfig::default(),
    );

    assert!(service.send_sms("13812345678").await.unwrap());
    let code = store.get("13812345678", false).await.unwrap().unwrap();
    assert!(service.check_answer("13812345678", &code).await.unwrap());
}
