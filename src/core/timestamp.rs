//! Timestamp policy handed to sinks
//!
//! Supports ISO 8601, RFC 3339, Unix timestamps, custom strftime formats, and
//! turning the timestamp off entirely.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Standardized timestamp format options
///
/// # Examples
///
/// ```
/// use context_logger::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::Iso8601;
/// let stamp = format.format(&Utc::now()).unwrap();
/// assert!(stamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 format: `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Unix timestamp in microseconds: `1736332245123456`
    UnixMicros,

    /// Custom strftime format, e.g. `"%d/%b/%Y:%H:%M:%S %z"`
    Custom(String),

    /// No timestamp on records
    Disabled,
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>`, or `None` when timestamps are disabled
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> Option<String> {
        let formatted = match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::UnixMicros => datetime.timestamp_micros().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
            TimestampFormat::Disabled => return None,
        };
        Some(formatted)
    }

    /// JSON value for structured output: numbers for Unix formats, strings otherwise
    #[must_use]
    pub fn format_json(&self, datetime: &DateTime<Utc>) -> Option<Value> {
        match self {
            TimestampFormat::Unix => Some(Value::from(datetime.timestamp())),
            TimestampFormat::UnixMillis => Some(Value::from(datetime.timestamp_millis())),
            TimestampFormat::UnixMicros => Some(Value::from(datetime.timestamp_micros())),
            other => other.format(datetime).map(Value::String),
        }
    }

    /// Check if this is a Unix-based numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TimestampFormat::Unix | TimestampFormat::UnixMillis | TimestampFormat::UnixMicros
        )
    }
}
