//! # Logger Service
//!
//! This crate sets up structured logging for the bootstrap bridge.
//!
//! ## Philosophy
//!
//! Logging is explicit and structured, not text-based or printf-style.
//! Components emit `tracing` events with fields; this crate owns the level
//! model and installs the subscriber once per process.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Debug information
    Debug,
    /// Informational messages
    #[default]
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

impl LogLevel {
    /// Filter directive understood by `EnvFilter`
    pub fn directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.directive())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoggerError {
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    #[error("Logging already initialized")]
    AlreadyInitialized,
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" | "trace" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}

/// Builds the filter: `RUST_LOG` when set, otherwise `level`
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()))
}

/// Installs the global fmt subscriber
///
/// Only the first call in a process installs anything; later calls return
/// [`LoggerError::AlreadyInitialized`].
pub fn init_logging(level: LogLevel) -> Result<(), LoggerError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_target(false)
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)
}
