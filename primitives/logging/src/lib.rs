#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Logging setup for rpclink binaries and tests.
//!
//! Library crates only emit `tracing` events; installing a subscriber is
//! left to the application, usually through [`init`].

use std::fs::OpenOptions;
use std::str::FromStr;
use std::sync::Mutex;

use config::LoggingConfig;
use thiserror::Error;
use tracing::Level;

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The configured level is not one of trace, debug, info, warn, error.
    #[error("Unknown log level: {0}")]
    InvalidLevel(String),
    /// The configured log file could not be opened.
    #[error("Failed to open log file: {0}")]
    File(#[from] std::io::Error),
    /// A global subscriber is already installed.
    #[error("Failed to install subscriber: {0}")]
    AlreadyInstalled(String),
}

/// Parses a level name such as `"debug"`, ignoring case.
pub fn parse_level(level: &str) -> Result<Level, LoggingError> {
    Level::from_str(level.trim()).map_err(|_| LoggingError::InvalidLevel(level.to_string()))
}

/// Installs a formatting subscriber according to `config`.
///
/// Output goes to the configured file (appended) or to stderr.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let level = parse_level(&config.level)?;
    let builder = tracing_subscriber::fmt().with_max_level(level).with_target(true);

    let installed = match &config.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| LoggingError::AlreadyInstalled(e.to_string()))
}

/// Emits a trace event tagged with a module name.
pub fn trace(module: &str, msg: &str) {
    tracing::trace!(module, "{}", msg);
}
