//! Shared wiring for the route tests

use std::sync::Arc;
use std::time::Duration;

use hub_api::state::{SharedCaptchaService, SharedVerifyCodeService};
use hub_api::AppState;
use hub_core::services::captcha::{CaptchaDriver, CaptchaService};
use hub_core::services::verification::{
    CodeStore, DebugPolicy, DeliveryChannel, EnvironmentPolicy, VerificationServiceConfig,
    VerifyCodeService,
};
use hub_core::{MockUserRepository, User, UserRepository};
use hub_infra::cache::MemoryCodeStore;
use hub_infra::captcha::DigitCaptchaDriver;
use hub_infra::sms::MockSms;
use hub_shared::CaptchaConfig;

pub const KNOWN_PHONE: &str = "13800000000";
pub const KNOWN_EMAIL: &str = "john@example.com";

pub struct Harness {
    pub state: AppState,
    pub sms: MockSms,
    pub code_store: Arc<MemoryCodeStore>,
    pub captcha_store: Arc<MemoryCodeStore>,
}

impl Harness {
    pub fn new(policy: DebugPolicy) -> Self {
        let code_store = Arc::new(MemoryCodeStore::new(Duration::from_secs(15 * 60)));
        let captcha_store = Arc::new(MemoryCodeStore::new(Duration::from_secs(15 * 60)));
        let sms = MockSms::new();

        let policy: Arc<dyn EnvironmentPolicy> = Arc::new(policy);
        let codes: Arc<dyn CodeStore> = code_store.clone();
        let captchas: Arc<dyn CodeStore> = captcha_store.clone();
        let channel: Arc<dyn DeliveryChannel> = Arc::new(sms.clone());
        let driver: Arc<dyn CaptchaDriver> =
            Arc::new(DigitCaptchaDriver::from_config(&CaptchaConfig::default()));
        let users: Arc<dyn UserRepository> = Arc::new(MockUserRepository::with_users(vec![
            User::new("john", KNOWN_PHONE, KNOWN_EMAIL),
        ]));

        let verify_codes: SharedVerifyCodeService = VerifyCodeService::new(
            codes,
            channel,
            policy.clone(),
            VerificationServiceConfig::default(),
        );
        let captcha_service: SharedCaptchaService = CaptchaService::new(captchas, driver, policy);

        Self {
            state: AppState::new(Arc::new(verify_codes), Arc::new(captcha_service), users),
            sms,
            code_store,
            captcha_store,
        }
    }

    /// Harness with every debug bypass off
    pub fn strict() -> Self {
        Self::new(DebugPolicy::strict())
    }

    /// Stored answer for a captcha id
    pub async fn captcha_answer(&self, captcha_id: &str) -> String {
        self.captcha_store
            .get(captcha_id, false)
            .await
            .unwrap()
            .expect("captcha answer stored")
    }
}
