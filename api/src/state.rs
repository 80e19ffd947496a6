//! Shared application state handed to every handler

use std::sync::Arc;

use hub_core::services::captcha::{CaptchaDriver, CaptchaService};
use hub_core::services::verification::{
    CodeStore, DeliveryChannel, EnvironmentPolicy, VerifyCodeService,
};
use hub_core::UserRepository;

pub type SharedVerifyCodeService =
    VerifyCodeService<dyn CodeStore, dyn DeliveryChannel, dyn EnvironmentPolicy>;
pub type SharedCaptchaService = CaptchaService<dyn CodeStore, dyn CaptchaDriver, dyn EnvironmentPolicy>;

/// Services wired once at startup and cloned into each worker
#[derive(Clone)]
pub struct AppState {
    pub verify_codes: Arc<SharedVerifyCodeService>,
    pub captchas: Arc<SharedCaptchaService>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    pub fn new(
        verify_codes: Arc<SharedVerifyCodeService>,
        captchas: Arc<SharedCaptchaService>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            verify_codes,
            captchas,
            users,
        }
    }
}
