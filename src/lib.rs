//! # Context Logger
//!
//! A structured logging facade: a [`Logger`] wraps a pluggable [`Sink`],
//! owns a severity threshold, and enriches every record with layered data.
//!
//! ## Features
//!
//! - **Layered data**: persistent context, top-level custom fields, per-call data
//! - **Sub-loggers**: independent copies of a logger's level and data
//! - **Default instance**: process-wide logger behind the [`global`] functions
//! - **Thread Safe**: one lock per logger guards level, maps and sink handle
//! - **Pluggable sinks**: console output, in-memory recording, or your own

pub mod core;
pub mod macros;
pub mod sinks;

pub use crate::core::registry as global;

pub mod prelude {
    pub use crate::core::{
        ErrorInfo, FieldMap, LevelFormat, LogLevel, LogRecord, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, OutputFormat, Result, Sink, SinkConfig, SinkHandle,
        TimestampFormat,
    };
    pub use crate::global;
    pub use crate::sinks::{CapturedRecord, ConsoleSink, MemorySink, NullSink};
}

pub use crate::core::{
    ErrorInfo, FieldMap, LevelFormat, LogLevel, LogRecord, Logger, LoggerBuilder, LoggerConfig,
    LoggerError, OutputFormat, Result, Sink, SinkConfig, SinkHandle, TimestampFormat,
};
pub use crate::sinks::{CapturedRecord, ConsoleSink, MemorySink, NullSink};
