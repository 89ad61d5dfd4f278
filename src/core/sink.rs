//! Sink traits: where records go once the logger has assembled them
//!
//! A [`Sink`] is a factory. Each logger asks it for a [`SinkHandle`]
//! configured with the logger's level, timestamp policy and level label
//! format, and asks again whenever its level changes. The handle owns the
//! severity gate and the actual output.

use super::{
    error::Result, log_level::LogLevel, log_record::LogRecord, timestamp::TimestampFormat,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// How the level is written into an output line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelFormat {
    /// Lowercase label: `"info"`
    #[default]
    Label,
    /// Numeric severity: `30`
    Number,
}

impl LevelFormat {
    pub fn format(&self, level: LogLevel) -> Value {
        match self {
            LevelFormat::Label => Value::String(level.as_str().to_string()),
            LevelFormat::Number => Value::from(level.value()),
        }
    }
}

/// Everything a sink needs to build a handle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SinkConfig {
    pub level: LogLevel,
    pub timestamp: TimestampFormat,
    pub level_format: LevelFormat,
}

impl SinkConfig {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    /// Severity gate shared by every handle
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level.passes(self.level)
    }
}

pub trait Sink: Send + Sync {
    fn configure(&self, config: &SinkConfig) -> Result<Arc<dyn SinkHandle>>;
    fn name(&self) -> &str;
}

pub trait SinkHandle: Send + Sync {
    /// Emit `record` at `level`, or drop it if the level is below this handle's threshold
    fn emit(&self, level: LogLevel, record: &LogRecord, primary: &str) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}
