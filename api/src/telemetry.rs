//! Tracing subscriber setup
//!
//! `RUST_LOG` overrides `logging.level`. Output goes to stdout, to the
//! configured file, or both. In `daily` mode the file is named after the
//! date the process started.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer as _};

use hub_shared::config::{AppConfig, LogFormat, LoggingConfig};
use hub_shared::Environment;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Invalid log filter '{filter}': {reason}")]
    Filter { filter: String, reason: String },

    #[error("Cannot open log file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Tracing already initialised: {0}")]
    Init(String),
}

fn open_log_file(path: &Path) -> Result<File, TelemetryError> {
    let to_error = |source| TelemetryError::File {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_error)?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_error)
}

/// Build the writer for the configured outputs
///
/// Returns the writer and whether it reaches a file.
pub fn make_writer(
    logging: &LoggingConfig,
    env: Environment,
    date: &str,
) -> Result<(BoxMakeWriter, bool), TelemetryError> {
    let file = logging
        .file_for_date(date)
        .map(|path| open_log_file(&path))
        .transpose()?;

    Ok(match (file, logging.effective_stdout(env)) {
        (Some(file), true) => (BoxMakeWriter::new(std::io::stdout.and(Mutex::new(file))), true),
        (Some(file), false) => (BoxMakeWriter::new(Mutex::new(file)), true),
        (None, _) => (BoxMakeWriter::new(std::io::stdout), false),
    })
}

fn env_filter(level: &str) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).map_err(|e| TelemetryError::Filter {
            filter: level.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Install the global subscriber
pub fn init(config: &AppConfig) -> Result<(), TelemetryError> {
    let env = config.app.env;
    let logging = &config.logging;
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();

    let filter = env_filter(&logging.level)?;
    let (writer, to_file) = make_writer(logging, env, &date)?;

    let fmt_layer = match logging.effective_format(env) {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_ansi(!to_file)
            .with_writer(writer)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))
}
