//! Redis client shared by the code stores
//!
//! One multiplexed connection per process. Transient failures (I/O, busy
//! loading, TRYAGAIN) are retried with capped exponential backoff; every
//! other error is returned on the first attempt.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use tokio::time::sleep;

use hub_shared::config::CacheConfig;
use hub_shared::subject::mask_subject;

use crate::InfrastructureError;

/// Longest delay between two retries
const MAX_RETRY_DELAY_MS: u64 = 5000;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Attempt counter with doubling delay
#[derive(Debug, Clone, Copy)]
pub(crate) struct Backoff {
    attempt: u32,
    max_attempts: u32,
    delay_ms: u64,
}

impl Backoff {
    pub(crate) fn new(max_attempts: u32, base_delay_ms: u64) -> Self {
        Self {
            attempt: 0,
            max_attempts: max_attempts.max(1),
            delay_ms: base_delay_ms,
        }
    }

    /// Record a failed attempt; returns the delay to wait, or `None` when exhausted
    pub(crate) fn next(&mut self) -> Option<Duration> {
        self.attempt += 1;
        if self.attempt >= self.max_attempts {
            return None;
        }
        let wait = Duration::from_millis(self.delay_ms);
        self.delay_ms = self.delay_ms.saturating_mul(2).min(MAX_RETRY_DELAY_MS);
        Some(wait)
    }

    pub(crate) fn attempt(&self) -> u32 {
        self.attempt
    }
}

/// Redis client with retry logic
///
/// Cloning is cheap; clones share the multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    connection: MultiplexedConnection,
    max_retries: u32,
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Connect using the configured URL, database and retry settings
    ///
    /// # Example
    /// ```no_run
    /// use hub_infra::cache::RedisClient;
    /// use hub_shared::config::CacheConfig;
    ///
    /// async fn connect() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let config = CacheConfig::new("redis://localhost:6379").with_database(1);
    ///     Ok(RedisClient::new(&config).await?)
    /// }
    /// ```
    pub async fn new(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        let url = config.connection_url();
        tracing::info!(url = %mask_url(&url), "Connecting to Redis");

        let client = Client::open(url.as_str())
            .map_err(|e| InfrastructureError::Config(format!("Invalid Redis URL: {}", e)))?;

        let mut backoff = Backoff::new(config.max_retries, config.retry_delay_ms);
        let connection = loop {
            match client.get_multiplexed_async_connection().await {
                Ok(connection) => break connection,
                Err(e) => match backoff.next() {
                    Some(wait) => {
                        tracing::warn!(
                            attempt = backoff.attempt(),
                            error = %e,
                            retry_in_ms = wait.as_millis() as u64,
                            "Redis connection failed, retrying"
                        );
                        sleep(wait).await;
                    }
                    None => {
                        tracing::error!(attempts = backoff.attempt(), error = %e, "Redis unreachable");
                        return Err(InfrastructureError::Cache(e));
                    }
                },
            }
        };

        tracing::info!("Redis connection established");

        Ok(Self {
            connection,
            max_retries: config.max_retries,
            retry_delay_ms: config.retry_delay_ms,
        })
    }

    /// SET with EX; replaces any existing value
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        let (owned_key, owned_value) = (key.to_string(), value.to_string());
        self.with_retry("SET", key, move |mut conn| {
            let (key, value) = (owned_key.clone(), owned_value.clone());
            Box::pin(async move { conn.set_ex::<_, _, ()>(key, value, expiry_seconds).await })
        })
        .await
    }

    /// GET; `None` when the key is missing or expired
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let owned_key = key.to_string();
        self.with_retry("GET", key, move |mut conn| {
            let key = owned_key.clone();
            Box::pin(async move { conn.get::<_, Option<String>>(key).await })
        })
        .await
    }

    /// GET then DEL inside one MULTI/EXEC
    pub async fn get_and_delete(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let owned_key = key.to_string();
        self.with_retry("GETDEL", key, move |mut conn| {
            let key = owned_key.clone();
            Box::pin(async move {
                let (value, _removed): (Option<String>, u32) = redis::pipe()
                    .atomic()
                    .get(&key)
                    .del(&key)
                    .query_async(&mut conn)
                    .await?;
                Ok(value)
            })
        })
        .await
    }

    /// DEL; returns whether the key existed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let owned_key = key.to_string();
        let removed: u32 = self
            .with_retry("DEL", key, move |mut conn| {
                let key = owned_key.clone();
                Box::pin(async move { conn.del::<_, u32>(key).await })
            })
            .await?;
        Ok(removed > 0)
    }

    /// PING
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let reply: String = self
            .with_retry("PING", "", |mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await?;

        if reply != "PONG" {
            tracing::warn!(reply = %reply, "Unexpected PING reply");
        }
        Ok(reply == "PONG")
    }

    async fn with_retry<F, T>(
        &self,
        command: &'static str,
        key: &str,
        operation: F,
    ) -> Result<T, InfrastructureError>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let mut backoff = Backoff::new(self.max_retries, self.retry_delay_ms);

        loop {
            let error = match operation(self.connection.clone()).await {
                Ok(result) => return Ok(result),
                Err(e) => e,
            };

            match backoff.next() {
                Some(wait) if is_retriable_error(&error) => {
                    tracing::warn!(
                        command,
                        key = %mask_key(key),
                        attempt = backoff.attempt(),
                        error = %error,
                        "Redis command failed, retrying"
                    );
                    sleep(wait).await;
                }
                _ => {
                    tracing::error!(
                        command,
                        key = %mask_key(key),
                        error = %error,
                        "Redis command failed"
                    );
                    return Err(InfrastructureError::Cache(error));
                }
            }
        }
    }
}

/// Whether an error is transient and the command may be retried
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Keys end with a phone number or email; mask that part for logs
pub(crate) fn mask_key(key: &str) -> String {
    match key.rsplit_once(':') {
        Some((namespace, subject)) => format!("{}:{}", namespace, mask_subject(subject)),
        None => mask_subject(key),
    }
}

/// Hide the credentials part of a Redis URL
pub(crate) fn mask_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}****{}", &url[..scheme_end + 3], &url[at..])
        }
        _ => url.to_string(),
    }
}
