//! Serializable logger configuration
//!
//! ```
//! use leveled_logger::{LoggerConfig, LogLevel};
//!
//! let config = LoggerConfig::from_json(
//!     r#"{ "threshold": "DEBUG", "async_mode": true, "buffer_capacity": 256 }"#,
//! ).unwrap();
//!
//! assert_eq!(config.threshold, LogLevel::Debug);
//! assert!(config.delivery_mode().is_async());
//! ```

use super::error::{LoggerError, Result};
use super::level_names::set_level_name;
use super::log_level::LogLevel;
use super::logger::{DeliveryMode, DEFAULT_SHUTDOWN_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub threshold: LogLevel,
    pub async_mode: bool,
    /// Queue capacity in lines; only meaningful with `async_mode`
    pub buffer_capacity: usize,
    pub shutdown_timeout_ms: u64,
    /// Display-name overrides, applied process-wide
    pub level_names: BTreeMap<LogLevel, String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            threshold: LogLevel::Info,
            async_mode: false,
            buffer_capacity: 0,
            shutdown_timeout_ms: DEFAULT_SHUTDOWN_TIMEOUT.as_millis() as u64,
            level_names: BTreeMap::new(),
        }
    }
}

impl LoggerConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject names that would break the one-line layout
    pub fn validate(&self) -> Result<()> {
        for (level, name) in &self.level_names {
            if name.trim().is_empty() {
                return Err(LoggerError::config(
                    "LoggerConfig",
                    format!("level name for {} is empty", level),
                ));
            }
            if name.contains(['\n', '\r']) {
                return Err(LoggerError::config(
                    "LoggerConfig",
                    format!("level name for {} contains a line break", level),
                ));
            }
        }
        Ok(())
    }

    pub fn delivery_mode(&self) -> DeliveryMode {
        if self.async_mode {
            DeliveryMode::Asynchronous {
                capacity: self.buffer_capacity,
            }
        } else {
            DeliveryMode::Synchronous
        }
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }

    /// Install the configured display names for every logger in the process
    pub fn apply_level_names(&self) {
        for (level, name) in &self.level_names {
            set_level_name(*level, name.clone());
        }
    }
}
