//! Shared configuration and helpers for the Gohub services

pub mod config;
pub mod utils;

pub use config::{
    AliyunSmsConfig, AppConfig, AppSettings, CacheConfig, CaptchaConfig, CheckBypassGate,
    CAPTCHA_ANSWER_LENGTH,
    ConfigError, DatabaseConfig, Environment, LogFormat, LogKind, LoggingConfig, SmsConfig,
    VerifyCodeConfig,
};
pub use utils::subject;
