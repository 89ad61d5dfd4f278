//! Line rendering for records
//!
//! - Json: one JSON object per line, `level`/`time`/`pid` first, `msg` last
//! - Text: human-readable line with the record's fields appended as key=value

use super::log_level::LogLevel;
use super::log_record::LogRecord;
use super::sink::SinkConfig;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Output format for console lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Example: `{"level":"info","time":"2025-01-08T10:30:45.123Z","pid":4242,"code":"C","message":"m","data":{},"msg":"m"}`
    #[default]
    Json,

    /// Example: `[2025-01-08T10:30:45.123Z] [INFO ] C - m a=1`
    Text,
}

impl OutputFormat {
    pub fn format(
        &self,
        level: LogLevel,
        record: &LogRecord,
        primary: &str,
        config: &SinkConfig,
        now: &DateTime<Utc>,
    ) -> String {
        match self {
            OutputFormat::Json => Self::format_json(level, record, primary, config, now),
            OutputFormat::Text => Self::format_text(&format!("{:5}", level.to_str()), record, config, now),
        }
    }

    fn format_json(
        level: LogLevel,
        record: &LogRecord,
        primary: &str,
        config: &SinkConfig,
        now: &DateTime<Utc>,
    ) -> String {
        let mut obj = Map::new();
        obj.insert("level".to_string(), config.level_format.format(level));
        if let Some(time) = config.timestamp.format_json(now) {
            obj.insert("time".to_string(), time);
        }
        obj.insert("pid".to_string(), Value::from(std::process::id()));

        for (key, value) in record.to_json_map() {
            obj.insert(key, value);
        }
        obj.insert("msg".to_string(), Value::String(primary.to_string()));

        serde_json::to_string(&Value::Object(obj)).unwrap_or_default()
    }

    /// Text line with an already-rendered level column
    pub(crate) fn format_text(
        level_column: &str,
        record: &LogRecord,
        config: &SinkConfig,
        now: &DateTime<Utc>,
    ) -> String {
        let mut line = String::new();
        if let Some(time) = config.timestamp.format(now) {
            line.push_str(&format!("[{}] ", time));
        }
        line.push_str(&format!(
            "[{}] {} - {}",
            level_column,
            sanitize(&record.code),
            sanitize(&record.message)
        ));

        if !record.custom.is_empty() {
            line.push(' ');
            line.push_str(&sanitize(&record.custom.format_fields()));
        }
        if !record.data.is_empty() {
            line.push(' ');
            line.push_str(&sanitize(&record.data.format_fields()));
        }
        if let Some(ref err) = record.err {
            line.push_str(&format!(" err={}: {}", err.kind, sanitize(&err.message)));
        }

        line
    }
}

/// Escape line breaks so a value cannot forge extra log lines
fn sanitize(value: &str) -> String {
    value
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
