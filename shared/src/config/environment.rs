//! Environment configuration module

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use super::ConfigError;

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Developer machine; fixed debug codes and long-lived entries
    #[serde(alias = "dev", alias = "development")]
    Local,
    /// Shared test / staging deployment
    #[serde(alias = "test", alias = "staging")]
    Testing,
    /// Production environment
    #[serde(alias = "prod")]
    Production,
}

impl Environment {
    /// Check if running in production
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Check if running locally
    pub fn is_local(&self) -> bool {
        matches!(self, Environment::Local)
    }

    /// Get environment from `APP_ENV`, falling back to `ENVIRONMENT`
    ///
    /// Unset means production; a value that does not parse is an error so a
    /// typo never enables the debug shortcuts.
    pub fn from_env() -> Result<Self, ConfigError> {
        let value = env::var("APP_ENV").or_else(|_| env::var("ENVIRONMENT")).ok();
        Self::resolve(value.as_deref())
    }

    /// Interpret a raw environment value
    pub fn resolve(value: Option<&str>) -> Result<Self, ConfigError> {
        match value {
            None => Ok(Self::default()),
            Some(raw) => raw.parse().map_err(|reason| ConfigError::Invalid {
                field: "APP_ENV",
                reason,
            }),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Production
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "local"),
            Environment::Testing => write!(f, "testing"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "dev" | "development" => Ok(Environment::Local),
            "testing" | "test" | "staging" => Ok(Environment::Testing),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` takes precedence
    pub level: String,

    /// Output format; derived from the environment when unset
    pub format: Option<LogFormat>,

    /// `single` writes to `file` as-is, `daily` substitutes today's date
    pub kind: LogKind,

    /// Log file path, `None` disables file output
    pub file: Option<PathBuf>,

    /// Mirror logs to stdout; derived from the environment when unset
    pub stdout: Option<bool>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("debug"),
            format: None,
            kind: LogKind::Single,
            file: Some(PathBuf::from("storage/logs/logs.log")),
            stdout: None,
        }
    }
}

impl LoggingConfig {
    /// Pretty output locally, JSON everywhere else
    pub fn effective_format(&self, env: Environment) -> LogFormat {
        self.format.unwrap_or(if env.is_local() {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        })
    }

    /// Local runs log to the terminal as well as the file
    pub fn effective_stdout(&self, env: Environment) -> bool {
        self.stdout.unwrap_or(env.is_local() || self.file.is_none())
    }

    /// Resolve the file to write for the given date (`YYYY-MM-DD`)
    ///
    /// In daily mode the `logs.log` file name is replaced by `<date>.log`.
    pub fn file_for_date(&self, date: &str) -> Option<PathBuf> {
        let path = self.file.as_ref()?;
        match self.kind {
            LogKind::Single => Some(path.clone()),
            LogKind::Daily => {
                let name = format!("{}.log", date);
                Some(match path.file_name().and_then(|n| n.to_str()) {
                    Some("logs.log") | None => path.with_file_name(name),
                    Some(_) => path.clone(),
                })
            }
        }
    }
}

/// Log format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Log file naming strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Single,
    Daily,
}
