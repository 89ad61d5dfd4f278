//! Core logger types and traits

pub mod error;
pub mod error_info;
pub mod field_map;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod output_format;
pub mod registry;
pub mod sink;
pub mod timestamp;

pub use error::{LoggerError, Result};
pub use error_info::ErrorInfo;
pub use field_map::FieldMap;
pub use log_level::LogLevel;
pub use log_record::LogRecord;
pub use logger::{Logger, LoggerBuilder, LoggerConfig};
pub use output_format::OutputFormat;
pub use sink::{LevelFormat, Sink, SinkConfig, SinkHandle};
pub use timestamp::TimestampFormat;
