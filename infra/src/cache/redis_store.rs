//! Redis-backed code store

use async_trait::async_trait;
use std::time::Duration;

use hub_core::errors::DomainResult;
use hub_core::services::verification::CodeStore;

use super::redis_client::RedisClient;

/// Stores codes under `{key_prefix}{key}` with a fixed TTL
///
/// One instance per namespace: verification codes use
/// `{app_name}:verifycode:` and captchas `{app_name}:captcha:`.
#[derive(Clone)]
pub struct RedisCodeStore {
    client: RedisClient,
    key_prefix: String,
    ttl: Duration,
}

impl RedisCodeStore {
    pub fn new(client: RedisClient, key_prefix: impl Into<String>, ttl: Duration) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
            ttl,
        }
    }

    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl CodeStore for RedisCodeStore {
    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        let seconds = self.ttl.as_secs().max(1);
        self.client
            .set_with_expiry(&self.full_key(key), value, seconds)
            .await?;
        Ok(())
    }

    async fn get(&self, key: &str, clear: bool) -> DomainResult<Option<String>> {
        let full_key = self.full_key(key);
        let value = if clear {
            self.client.get_and_delete(&full_key).await?
        } else {
            self.client.get(&full_key).await?
        };
        Ok(value)
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        self.client.delete(&self.full_key(key)).await?;
        Ok(())
    }
}
