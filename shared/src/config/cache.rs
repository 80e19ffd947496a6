//! Cache configuration module

use serde::{Deserialize, Serialize};

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Use Redis; when false codes live in the process (local runs only)
    pub enabled: bool,

    /// Redis connection URL
    pub url: String,

    /// Redis database number (0-15)
    pub database: u8,

    /// Maximum retry attempts for transient Redis errors
    pub max_retries: u32,

    /// Base delay between retries in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: String::from("redis://127.0.0.1:6379"),
            database: 0,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl CacheConfig {
    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the database number
    pub fn with_database(mut self, db: u8) -> Self {
        self.database = db.min(15);
        self
    }

    /// Connection URL with the database index applied
    pub fn connection_url(&self) -> String {
        let base = self.url.trim_end_matches('/');
        if self.database == 0 || base.rsplit('/').next().map_or(false, |s| s.parse::<u8>().is_ok()) {
            base.to_string()
        } else {
            format!("{}/{}", base, self.database)
        }
    }
}
