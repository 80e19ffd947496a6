//! Configuration module with feature-specific sub-modules
//!
//! - `app` - Application identity and HTTP listener
//! - `cache` - Redis connection
//! - `captcha` - Image captcha generation and lifetime
//! - `database` - MySQL connection pool
//! - `environment` - Environment detection and logging
//! - `sms` - SMS provider credentials
//! - `verify_code` - Verification code generation, lifetime and debug switches
//!
//! Values are layered: built-in defaults, then `config/default.toml`, then
//! `config/{env}.toml`, then `HUB_`-prefixed environment variables with `__`
//! separating nested keys (`HUB_VERIFY_CODE__CODE_LENGTH=4`).

pub mod app;
pub mod cache;
pub mod captcha;
pub mod database;
pub mod environment;
pub mod sms;
pub mod verify_code;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use app::AppSettings;
pub use cache::CacheConfig;
pub use captcha::{CaptchaConfig, CAPTCHA_ANSWER_LENGTH};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LogKind, LoggingConfig};
pub use sms::{AliyunSmsConfig, SmsConfig};
pub use verify_code::{CheckBypassGate, VerifyCodeConfig};

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Failed to read env file {path}: {reason}")]
    EnvFile { path: String, reason: String },

    #[error("Invalid configuration for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSettings,
    pub verify_code: VerifyCodeConfig,
    pub captcha: CaptchaConfig,
    pub sms: SmsConfig,
    pub cache: CacheConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the process
    ///
    /// `env_suffix` selects `.env.{suffix}` instead of `.env`. A missing
    /// default `.env` is not an error; a missing named one is.
    pub fn load(env_suffix: Option<&str>) -> Result<Self, ConfigError> {
        load_env_file(env_suffix)?;

        let env = Environment::from_env()?;
        let settings = config::Config::builder()
            .set_default("app.env", env.to_string())?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                config::Environment::with_prefix("HUB")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;

        tracing::debug!(
            app = %config.app.name,
            environment = %config.app.env,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Check cross-field constraints the type system cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app.name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "app.name",
                reason: "must not be empty".to_string(),
            });
        }

        if !(1..=10).contains(&self.verify_code.code_length) {
            return Err(ConfigError::Invalid {
                field: "verify_code.code_length",
                reason: format!("must be between 1 and 10, got {}", self.verify_code.code_length),
            });
        }

        if self.verify_code.expire_minutes == 0 {
            return Err(ConfigError::Invalid {
                field: "verify_code.expire_minutes",
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.captcha.length != CAPTCHA_ANSWER_LENGTH {
            return Err(ConfigError::Invalid {
                field: "captcha.length",
                reason: format!(
                    "must be {} to match the accepted answer length, got {}",
                    CAPTCHA_ANSWER_LENGTH, self.captcha.length
                ),
            });
        }

        match self.sms.driver.as_str() {
            "mock" => {}
            "aliyun" => {
                if self.sms.aliyun.access_key_id.is_empty()
                    || self.sms.aliyun.access_key_secret.is_empty()
                {
                    return Err(ConfigError::Invalid {
                        field: "sms.aliyun",
                        reason: "access_key_id and access_key_secret are required".to_string(),
                    });
                }
            }
            other => {
                return Err(ConfigError::Invalid {
                    field: "sms.driver",
                    reason: format!("unknown driver '{}'", other),
                });
            }
        }

        Ok(())
    }

    /// Lifetime of verification codes in the current environment
    pub fn verify_code_ttl_minutes(&self) -> u64 {
        if self.app.env.is_local() {
            self.verify_code.debug_expire_minutes
        } else {
            self.verify_code.expire_minutes
        }
    }

    /// Lifetime of captchas in the current environment
    pub fn captcha_ttl_minutes(&self) -> u64 {
        if self.app.env.is_local() {
            self.captcha.debug_expire_minutes
        } else {
            self.captcha.expire_minutes
        }
    }
}

fn load_env_file(env_suffix: Option<&str>) -> Result<(), ConfigError> {
    match env_suffix.filter(|s| !s.is_empty()) {
        Some(suffix) => {
            let path = format!(".env.{}", suffix);
            dotenvy::from_filename(&path).map_err(|e| ConfigError::EnvFile {
                path,
                reason: e.to_string(),
            })?;
        }
        None => {
            if let Err(e) = dotenvy::dotenv() {
                if !e.not_found() {
                    return Err(ConfigError::EnvFile {
                        path: ".env".to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}
