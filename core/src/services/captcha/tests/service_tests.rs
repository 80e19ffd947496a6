//! Unit tests for captcha service

use std::sync::Arc;

use hub_shared::config::{CaptchaConfig, Environment, VerifyCodeConfig};

use crate::errors::{DomainError, DomainResult};
use crate::services::captcha::{CaptchaDriver, CaptchaService, Challenge, CAPTCHA_ID_LENGTH};
use crate::services::verification::tests::mocks::MockCodeStore;
use crate::services::verification::DebugPolicy;

struct FixedDriver {
    answer: &'static str,
    should_fail: bool,
}

impl CaptchaDriver for FixedDriver {
    fn generate(&self) -> DomainResult<Challenge> {
        if self.should_fail {
            return Err(DomainError::Captcha {
                message: "render failed".to_string(),
            });
        }
        Ok(Challenge {
            answer: self.answer.to_string(),
            image: "data:image/png;base64,iVBORw0KGgo=".to_string(),
        })
    }
}

fn build(
    env: Environment,
    should_fail: bool,
) -> (
    CaptchaService<MockCodeStore, FixedDriver, DebugPolicy>,
    Arc<MockCodeStore>,
) {
    let store = Arc::new(MockCodeStore::new(false));
    let driver = Arc::new(FixedDriver {
        answer: "246810",
        should_fail,
    });
    let policy = Arc::new(DebugPolicy::new(
        env,
        &VerifyCodeConfig::default(),
        &CaptchaConfig::default(),
    ));
    (CaptchaService::new(store.clone(), driver, policy), store)
}

#[tokio::test]
async fn test_generate_stores_answer() {
    let (service, store) = build(Environment::Production, false);

    let issued = service.generate().await.unwrap();
    assert_eq!(issued.captcha_id.len(), CAPTCHA_ID_LENGTH);
    assert!(issued.captcha_id.chars().all(|c| c.is_ascii_alphanumeric()));
    assert!(issued.captcha_image.starts_with("data:image/png;base64,"));
    assert_eq!(store.stored(&issued.captcha_id), Some("246810".to_string()));
}

#[tokio::test]
async fn test_generate_unique_ids() {
    let (service, _store) = build(Environment::Production, false);

    let first = service.generate().await.unwrap();
    let second = service.generate().await.unwrap();
    assert_ne!(first.captcha_id, second.captcha_id);
}

#[tokio::test]
async fn test_verify_answer() {
    let (service, _store) = build(Environment::Production, false);
    let issued = service.generate().await.unwrap();

    assert!(!service.verify(&issued.captcha_id, "000000").await.unwrap());
    assert!(service.verify(&issued.captcha_id, "246810").await.unwrap());
    // Still valid for a resubmitted form
    assert!(service.verify(&issued.captcha_id, "246810").await.unwrap());
}

#[tokio::test]
async fn test_verify_unknown_id() {
    let (service, _store) = build(Environment::Production, false);
    assert!(!service.verify("unknown", "246810").await.unwrap());
}

#[tokio::test]
async fn test_testing_key_bypass_outside_production() {
    let (local, _) = build(Environment::Local, false);
    assert!(local.verify("captcha_skip_test", "").await.unwrap());

    let (prod, _) = build(Environment::Production, false);
    assert!(!prod.verify("captcha_skip_test", "").await.unwrap());
}

#[tokio::test]
async fn test_driver_failure_propagates() {
    let (service, _store) = build(Environment::Production, true);
    assert!(matches!(
        service.generate().await,
        Err(DomainError::Captcha { .. })
    ));
}
