//! In-process code store for cache-less local runs and tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use hub_core::errors::DomainResult;
use hub_core::services::verification::CodeStore;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// Code store keeping entries in a map with per-entry expiry
///
/// Expired entries are dropped lazily when read or when a new value is
/// written.
#[derive(Clone)]
pub struct MemoryCodeStore {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
    ttl: Duration,
}

impl MemoryCodeStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.lock().await;
        entries.values().filter(|e| e.expires_at > now).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CodeStore for MemoryCodeStore {
    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        entries.retain(|_, e| e.expires_at > now);
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: now + self.ttl,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str, clear: bool) -> DomainResult<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        let live = matches!(entries.get(key), Some(e) if e.expires_at > now);
        if !live {
            entries.remove(key);
            return Ok(None);
        }

        if clear {
            Ok(entries.remove(key).map(|e| e.value))
        } else {
            Ok(entries.get(key).map(|e| e.value.clone()))
        }
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}
