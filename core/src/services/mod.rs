//! Business services containing domain logic and use cases.

pub mod captcha;
pub mod verification;

// Re-export commonly used types
pub use captcha::{CaptchaDriver, CaptchaIssued, CaptchaService, Challenge};
pub use verification::{
    CheckOutcome, CodeGenerator, CodeStore, DebugPolicy, DeliveryChannel, EnvironmentPolicy,
    SmsMessage, VerificationServiceConfig, VerifyCodeService,
};
