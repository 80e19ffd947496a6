//! Startup wiring from configuration to services

use std::sync::Arc;
use std::time::Duration;

use hub_core::services::captcha::{CaptchaDriver, CaptchaService};
use hub_core::services::verification::{
    CodeStore, DebugPolicy, EnvironmentPolicy, VerificationServiceConfig, VerifyCodeService,
};
use hub_core::{MockUserRepository, UserRepository};
use hub_infra::cache::{MemoryCodeStore, RedisClient, RedisCodeStore};
use hub_infra::captcha::DigitCaptchaDriver;
use hub_infra::database::{DatabasePool, MySqlUserRepository};
use hub_infra::sms::create_channel;
use hub_infra::InfrastructureError;
use hub_shared::AppConfig;

use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

/// Read `--env=<name>` or `--env <name>` from the command line
pub fn parse_env_flag<I>(args: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if let Some(value) = arg.strip_prefix("--env=") {
            return Some(value.to_string()).filter(|v| !v.is_empty());
        }
        if arg == "--env" {
            return args.next().filter(|v| !v.is_empty());
        }
    }
    None
}

fn minutes(value: u64) -> Duration {
    Duration::from_secs(value * 60)
}

async fn code_stores(
    config: &AppConfig,
) -> Result<(Arc<dyn CodeStore>, Arc<dyn CodeStore>), BootstrapError> {
    let code_ttl = minutes(config.verify_code_ttl_minutes());
    let captcha_ttl = minutes(config.captcha_ttl_minutes());

    if !config.cache.enabled {
        if !config.app.env.is_local() {
            tracing::warn!(
                environment = %config.app.env,
                "Cache disabled, codes are kept in process memory"
            );
        }
        return Ok((
            Arc::new(MemoryCodeStore::new(code_ttl)),
            Arc::new(MemoryCodeStore::new(captcha_ttl)),
        ));
    }

    let client = RedisClient::new(&config.cache).await?;
    let codes = RedisCodeStore::new(client.clone(), config.app.key_prefix("verifycode"), code_ttl);
    let captchas = RedisCodeStore::new(client, config.app.key_prefix("captcha"), captcha_ttl);

    tracing::info!(
        code_prefix = %codes.key_prefix(),
        captcha_prefix = %captchas.key_prefix(),
        code_ttl_secs = code_ttl.as_secs(),
        captcha_ttl_secs = captcha_ttl.as_secs(),
        "Redis code stores ready"
    );

    Ok((Arc::new(codes), Arc::new(captchas)))
}

async fn user_repository(config: &AppConfig) -> Result<Arc<dyn UserRepository>, BootstrapError> {
    if !config.database.enabled {
        tracing::warn!("Database disabled, user lookups run against an empty in-memory table");
        return Ok(Arc::new(MockUserRepository::new()));
    }

    let pool = DatabasePool::connect(&config.database).await?;
    if config.database.auto_migrate {
        pool.migrate().await?;
    }
    tracing::info!(pool = %pool.statistics(), "Database ready");

    Ok(Arc::new(MySqlUserRepository::new(pool.pool().clone())))
}

/// Build every service the handlers need
pub async fn build_state(config: &AppConfig) -> Result<AppState, BootstrapError> {
    let policy: Arc<dyn EnvironmentPolicy> = Arc::new(DebugPolicy::new(
        config.app.env,
        &config.verify_code,
        &config.captcha,
    ));

    let (code_store, captcha_store) = code_stores(config).await?;
    let channel = create_channel(&config.sms)?;
    let driver: Arc<dyn CaptchaDriver> = Arc::new(DigitCaptchaDriver::from_config(&config.captcha));

    tracing::info!(
        sms_provider = channel.provider_name(),
        environment = %config.app.env,
        "Verification services ready"
    );

    let verify_codes = VerifyCodeService::new(
        code_store,
        channel,
        policy.clone(),
        VerificationServiceConfig::from_settings(&config.verify_code, &config.sms),
    );
    let captchas = CaptchaService::new(captcha_store, driver, policy);
    let users = user_repository(config).await?;

    Ok(AppState::new(Arc::new(verify_codes), Arc::new(captchas), users))
}
