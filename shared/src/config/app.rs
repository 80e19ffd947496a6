//! Application identity and HTTP server settings

use serde::{Deserialize, Serialize};

use super::environment::Environment;

/// Core application settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppSettings {
    /// Application name, also the namespace of every cache key
    pub name: String,

    /// Current environment; `APP_ENV` when not set in the config files
    pub env: Environment,

    /// Verbose error output
    pub debug: bool,

    /// Bind address
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Public base URL
    pub url: String,

    /// Display timezone
    pub timezone: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: String::from("Gohub"),
            env: Environment::default(),
            debug: false,
            host: String::from("0.0.0.0"),
            port: 3000,
            url: String::from("http://localhost:3000"),
            timezone: String::from("Asia/Shanghai"),
        }
    }
}

impl AppSettings {
    /// `host:port` for the HTTP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Cache key namespace for a feature, e.g. `Gohub:verifycode:`
    pub fn key_prefix(&self, feature: &str) -> String {
        format!("{}:{}:", self.name, feature)
    }
}
