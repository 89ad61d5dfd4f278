//! Process-wide default logger and forwarding functions
//!
//! The default instance is created on first use, at level `info`, writing
//! JSON lines to the console. It lives until the process exits; [`install`]
//! swaps in a different logger. Every forwarding function acts on whatever
//! instance is current when it is called and never creates another one.
//!
//! ```
//! use context_logger::global;
//! use serde_json::json;
//!
//! global::set(json!({"component": "worker"}));
//! global::debug("JOB_START", "job started", ())?; // below `info`, dropped
//! # Ok::<(), context_logger::LoggerError>(())
//! ```

use super::{
    error::Result, error_info::ErrorInfo, field_map::FieldMap, log_level::LogLevel,
    logger::Logger,
};
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};

static DEFAULT_LOGGER: OnceLock<RwLock<Arc<Logger>>> = OnceLock::new();

fn slot() -> &'static RwLock<Arc<Logger>> {
    DEFAULT_LOGGER.get_or_init(|| RwLock::new(Arc::new(Logger::new())))
}

/// The current default instance, creating it on first access
pub fn instance() -> Arc<Logger> {
    Arc::clone(&slot().read())
}

/// Make `logger` the default instance and return the one it replaces
pub fn install(logger: Logger) -> Arc<Logger> {
    std::mem::replace(&mut *slot().write(), Arc::new(logger))
}

pub fn with_level(level: LogLevel) -> Result<Arc<Logger>> {
    let logger = instance();
    logger.with_level(level)?;
    Ok(logger)
}

pub fn with_level_name(name: &str) -> Result<Arc<Logger>> {
    let logger = instance();
    logger.with_level_name(name)?;
    Ok(logger)
}

pub fn set(patch: impl Into<FieldMap>) -> Arc<Logger> {
    let logger = instance();
    logger.set(patch);
    logger
}

pub fn custom_field(patch: impl Into<FieldMap>) -> Arc<Logger> {
    let logger = instance();
    logger.custom_field(patch);
    logger
}

pub fn sub_logger() -> Result<Logger> {
    instance().sub_logger()
}

pub fn debug(
    code: impl Into<String>,
    message: impl Into<String>,
    data: impl Into<FieldMap>,
) -> Result<()> {
    instance().debug(code, message, data)
}

pub fn trace(
    code: impl Into<String>,
    message: impl Into<String>,
    data: impl Into<FieldMap>,
) -> Result<()> {
    instance().trace(code, message, data)
}

pub fn info(
    code: impl Into<String>,
    message: impl Into<String>,
    data: impl Into<FieldMap>,
) -> Result<()> {
    instance().info(code, message, data)
}

pub fn warn(
    code: impl Into<String>,
    message: impl Into<String>,
    err: Option<ErrorInfo>,
    data: impl Into<FieldMap>,
) -> Result<()> {
    instance().warn(code, message, err, data)
}

pub fn error(
    code: impl Into<String>,
    message: impl Into<String>,
    err: Option<ErrorInfo>,
    data: impl Into<FieldMap>,
) -> Result<()> {
    instance().error(code, message, err, data)
}

pub fn fatal(
    code: impl Into<String>,
    message: impl Into<String>,
    err: Option<ErrorInfo>,
    data: impl Into<FieldMap>,
) -> Result<()> {
    instance().fatal(code, message, err, data)
}

pub fn flush() -> Result<()> {
    instance().flush()
}
