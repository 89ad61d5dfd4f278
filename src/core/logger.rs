//! Main logger implementation

use super::{
    error::{LoggerError, Result},
    error_info::ErrorInfo,
    field_map::FieldMap,
    log_level::LogLevel,
    log_record::LogRecord,
    sink::{LevelFormat, Sink, SinkConfig, SinkHandle},
    timestamp::TimestampFormat,
};
use crate::sinks::ConsoleSink;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Mutable part of a logger, swapped as one unit under the lock
struct LoggerState {
    level: LogLevel,
    context: FieldMap,
    custom_fields: FieldMap,
    handle: Arc<dyn SinkHandle>,
}

/// Structured logger with persistent context and custom fields
///
/// Every record carries a `code`, a `message`, an optional `err`, the
/// logger's custom fields spread at the top level, and a `data` object built
/// from the logger's context overlaid with the call-site data.
///
/// All methods take `&self`; a single lock guards level, maps and sink
/// handle so a logger can be shared across threads.
///
/// # Example
///
/// ```
/// use context_logger::prelude::*;
/// use serde_json::json;
///
/// let sink = MemorySink::new();
/// let logger = Logger::with_sink(sink.clone(), LogLevel::Info)?;
///
/// logger.set(json!({"request_id": "abc"})).custom_field(json!({"service": "api"}));
/// logger.info("REQ_DONE", "request finished", json!({"status": 200}))?;
///
/// let captured = sink.records();
/// assert_eq!(captured[0].record.data.get("request_id"), Some(&json!("abc")));
/// # Ok::<(), LoggerError>(())
/// ```
pub struct Logger {
    sink: Arc<dyn Sink>,
    timestamp: TimestampFormat,
    level_format: LevelFormat,
    state: RwLock<LoggerState>,
}

impl Logger {
    /// Logger at `info` writing JSON lines to the console
    #[must_use]
    pub fn new() -> Self {
        let sink = ConsoleSink::new();
        let config = SinkConfig::new(LogLevel::Info);
        let handle: Arc<dyn SinkHandle> = Arc::new(sink.handle(&config));

        Self {
            sink: Arc::new(sink),
            timestamp: config.timestamp,
            level_format: config.level_format,
            state: RwLock::new(LoggerState {
                level: config.level,
                context: FieldMap::new(),
                custom_fields: FieldMap::new(),
                handle,
            }),
        }
    }

    /// Logger at `level` over `sink`
    pub fn with_sink<S: Sink + 'static>(sink: S, level: LogLevel) -> Result<Self> {
        Self::with_shared_sink(Arc::new(sink), level)
    }

    /// Logger at `level` over a sink that may be shared with other loggers
    pub fn with_shared_sink(sink: Arc<dyn Sink>, level: LogLevel) -> Result<Self> {
        Self::from_parts(
            sink,
            LoggerConfig {
                level,
                ..LoggerConfig::default()
            },
            FieldMap::new(),
            FieldMap::new(),
        )
    }

    /// Logger built from a loaded configuration
    pub fn from_config(config: LoggerConfig, sink: Arc<dyn Sink>) -> Result<Self> {
        Self::from_parts(sink, config, FieldMap::new(), FieldMap::new())
    }

    fn from_parts(
        sink: Arc<dyn Sink>,
        config: LoggerConfig,
        context: FieldMap,
        custom_fields: FieldMap,
    ) -> Result<Self> {
        let sink_config = SinkConfig {
            level: config.level,
            timestamp: config.timestamp.clone(),
            level_format: config.level_format,
        };
        let handle = sink.configure(&sink_config)?;

        Ok(Self {
            sink,
            timestamp: config.timestamp,
            level_format: config.level_format,
            state: RwLock::new(LoggerState {
                level: config.level,
                context,
                custom_fields,
                handle,
            }),
        })
    }

    fn sink_config(&self, level: LogLevel) -> SinkConfig {
        SinkConfig {
            level,
            timestamp: self.timestamp.clone(),
            level_format: self.level_format,
        }
    }

    /// Set the active level and rebuild the sink handle for it
    ///
    /// If the sink cannot be configured the previous level and handle stay
    /// in place and the error is returned.
    pub fn with_level(&self, level: LogLevel) -> Result<&Self> {
        let mut state = self.state.write();
        let handle = self.sink.configure(&self.sink_config(level))?;
        state.level = level;
        state.handle = handle;
        Ok(self)
    }

    /// Parse `name` as a level, then behave like [`Logger::with_level`]
    pub fn with_level_name(&self, name: &str) -> Result<&Self> {
        let level = name.parse::<LogLevel>()?;
        self.with_level(level)
    }

    /// Shallow-merge `patch` into the persistent context
    pub fn set(&self, patch: impl Into<FieldMap>) -> &Self {
        let patch = patch.into();
        if !patch.is_empty() {
            self.state.write().context.merge(&patch);
        }
        self
    }

    /// Shallow-merge `patch` into the persistent custom fields
    pub fn custom_field(&self, patch: impl Into<FieldMap>) -> &Self {
        let patch = patch.into();
        if !patch.is_empty() {
            self.state.write().custom_fields.merge(&patch);
        }
        self
    }

    /// Replace the whole context
    pub fn replace_context(&self, context: impl Into<FieldMap>) -> &Self {
        self.state.write().context = context.into();
        self
    }

    /// Replace all custom fields
    pub fn replace_custom_fields(&self, custom_fields: impl Into<FieldMap>) -> &Self {
        self.state.write().custom_fields = custom_fields.into();
        self
    }

    pub fn level(&self) -> LogLevel {
        self.state.read().level
    }

    pub fn context(&self) -> FieldMap {
        self.state.read().context.clone()
    }

    pub fn custom_fields(&self) -> FieldMap {
        self.state.read().custom_fields.clone()
    }

    pub fn sink_name(&self) -> &str {
        self.sink.name()
    }

    /// Derive an independent logger
    ///
    /// The child starts with this logger's level, context and custom fields
    /// as of now, shares the sink, and gets its own handle. Later changes on
    /// either side are not seen by the other.
    pub fn sub_logger(&self) -> Result<Logger> {
        let state = self.state.read();
        let handle = self.sink.configure(&self.sink_config(state.level))?;

        Ok(Logger {
            sink: Arc::clone(&self.sink),
            timestamp: self.timestamp.clone(),
            level_format: self.level_format,
            state: RwLock::new(LoggerState {
                level: state.level,
                context: state.context.clone(),
                custom_fields: state.custom_fields.clone(),
                handle,
            }),
        })
    }

    /// Assemble a record and hand it to the sink handle
    ///
    /// The handle decides whether `level` passes; sink errors are returned.
    pub fn log(
        &self,
        level: LogLevel,
        code: impl Into<String>,
        message: impl Into<String>,
        err: Option<ErrorInfo>,
        data: impl Into<FieldMap>,
    ) -> Result<()> {
        let data = data.into();
        let (record, handle) = {
            let state = self.state.read();
            let record = LogRecord::assemble(
                code,
                message,
                err,
                &state.context,
                &state.custom_fields,
                &data,
            );
            (record, Arc::clone(&state.handle))
        };

        handle.emit(level, &record, &record.message)
    }

    #[inline]
    pub fn debug(
        &self,
        code: impl Into<String>,
        message: impl Into<String>,
        data: impl Into<FieldMap>,
    ) -> Result<()> {
        self.log(LogLevel::Debug, code, message, None, data)
    }

    #[inline]
    pub fn trace(
        &self,
        code: impl Into<String>,
        message: impl Into<String>,
        data: impl Into<FieldMap>,
    ) -> Result<()> {
        self.log(LogLevel::Trace, code, message, None, data)
    }

    #[inline]
    pub fn info(
        &self,
        code: impl Into<String>,
        message: impl Into<String>,
        data: impl Into<FieldMap>,
    ) -> Result<()> {
        self.log(LogLevel::Info, code, message, None, data)
    }

    #[inline]
    pub fn warn(
        &self,
        code: impl Into<String>,
        message: impl Into<String>,
        err: Option<ErrorInfo>,
        data: impl Into<FieldMap>,
    ) -> Result<()> {
        self.log(LogLevel::Warn, code, message, err, data)
    }

    #[inline]
    pub fn error(
        &self,
        code: impl Into<String>,
        message: impl Into<String>,
        err: Option<ErrorInfo>,
        data: impl Into<FieldMap>,
    ) -> Result<()> {
        self.log(LogLevel::Error, code, message, err, data)
    }

    #[inline]
    pub fn fatal(
        &self,
        code: impl Into<String>,
        message: impl Into<String>,
        err: Option<ErrorInfo>,
        data: impl Into<FieldMap>,
    ) -> Result<()> {
        self.log(LogLevel::Fatal, code, message, err, data)
    }

    pub fn flush(&self) -> Result<()> {
        let handle = Arc::clone(&self.state.read().handle);
        handle.flush()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use context_logger::prelude::*;
    /// use serde_json::json;
    ///
    /// let logger = Logger::builder()
    ///     .level(LogLevel::Debug)
    ///     .sink(NullSink)
    ///     .custom_fields(json!({"service": "billing"}))
    ///     .build()?;
    /// assert_eq!(logger.level(), LogLevel::Debug);
    /// # Ok::<(), LoggerError>(())
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Logger")
            .field("sink", &self.sink.name())
            .field("level", &state.level)
            .field("context", &state.context)
            .field("custom_fields", &state.custom_fields)
            .finish()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.state.get_mut().handle.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

/// Serializable logger settings
///
/// Missing keys fall back to `info`, ISO 8601 timestamps and label levels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub timestamp: TimestampFormat,
    pub level_format: LevelFormat,
}

impl LoggerConfig {
    /// Parse settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(LoggerError::from)
    }
}

/// Builder for constructing Logger with a fluent API
pub struct LoggerBuilder {
    config: LoggerConfig,
    sink: Option<Arc<dyn Sink>>,
    context: FieldMap,
    custom_fields: FieldMap,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            sink: None,
            context: FieldMap::new(),
            custom_fields: FieldMap::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn shared_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.config.timestamp = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level_format(mut self, format: LevelFormat) -> Self {
        self.config.level_format = format;
        self
    }

    /// Initial context, merged over anything set earlier on the builder
    #[must_use = "builder methods return a new value"]
    pub fn context(mut self, context: impl Into<FieldMap>) -> Self {
        self.context.merge(&context.into());
        self
    }

    /// Initial custom fields, merged over anything set earlier on the builder
    #[must_use = "builder methods return a new value"]
    pub fn custom_fields(mut self, custom_fields: impl Into<FieldMap>) -> Self {
        self.custom_fields.merge(&custom_fields.into());
        self
    }

    /// Build the Logger; without a sink it writes to the console
    pub fn build(self) -> Result<Logger> {
        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(ConsoleSink::new()) as Arc<dyn Sink>);
        Logger::from_parts(sink, self.config, self.context, self.custom_fields)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::{MemorySink, NullSink};
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn memory_logger(level: LogLevel) -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let logger = Logger::with_sink(sink.clone(), level).unwrap();
        (logger, sink)
    }

    /// Sink whose `configure` can be switched to fail
    struct FlakySink {
        inner: MemorySink,
        refuse: Arc<AtomicBool>,
    }

    impl Sink for FlakySink {
        fn configure(&self, config: &SinkConfig) -> Result<Arc<dyn SinkHandle>> {
            if self.refuse.load(Ordering::SeqCst) {
                return Err(LoggerError::sink_configuration("flaky", "refused"));
            }
            self.inner.configure(config)
        }

        fn name(&self) -> &str {
            "flaky"
        }
    }

    #[test]
    fn test_new_defaults_to_info() {
        let logger = Logger::new();
        assert_eq!(logger.level(), LogLevel::Info);
        assert_eq!(logger.sink_name(), "console");
        assert!(logger.context().is_empty());
    }

    #[test]
    fn test_set_merges_last_write_wins() {
        let (logger, _) = memory_logger(LogLevel::Info);
        logger.set(json!({"a": 1})).set(json!({"b": 2}));
        assert_eq!(logger.context(), FieldMap::from(json!({"a": 1, "b": 2})));

        logger.set(json!({"a": 3}));
        assert_eq!(logger.context(), FieldMap::from(json!({"a": 3, "b": 2})));
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let (logger, _) = memory_logger(LogLevel::Info);
        logger.set(json!({"a": 1}));
        logger.set(()).set(serde_json::Value::Null).custom_field(json!({}));
        logger
            .set(None::<serde_json::Value>)
            .custom_field(None::<FieldMap>);

        assert_eq!(logger.context(), FieldMap::from(json!({"a": 1})));
        assert!(logger.custom_fields().is_empty());

        logger.set(Some(json!({"b": 2})));
        assert_eq!(logger.context(), FieldMap::from(json!({"a": 1, "b": 2})));
    }

    #[test]
    fn test_replace_context_removes_keys() {
        let (logger, _) = memory_logger(LogLevel::Info);
        logger.set(json!({"a": 1, "b": 2}));
        logger.replace_context(json!({"c": 3}));
        assert_eq!(logger.context(), FieldMap::from(json!({"c": 3})));

        logger.custom_field(json!({"x": 1}));
        logger.replace_custom_fields(());
        assert!(logger.custom_fields().is_empty());
    }

    #[test]
    fn test_record_shape() {
        let (logger, sink) = memory_logger(LogLevel::Info);
        logger.set(json!({"a": 1})).custom_field(json!({"x": 9}));

        logger.info("CODE1", "hello", json!({"y": 1})).unwrap();

        let captured = sink.records();
        assert_eq!(captured.len(), 1);
        let entry = &captured[0];
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.primary, "hello");
        assert_eq!(entry.record.code, "CODE1");
        assert_eq!(entry.record.message, "hello");
        assert_eq!(entry.record.data, FieldMap::from(json!({"a": 1, "y": 1})));
        assert_eq!(entry.record.to_json_value()["x"], json!(9));
        assert!(entry.record.err.is_none());
    }

    #[test]
    fn test_adhoc_data_wins_over_context() {
        let (logger, sink) = memory_logger(LogLevel::Info);
        logger.set(json!({"a": 1}));
        logger.info("C", "m", json!({"a": 2})).unwrap();

        assert_eq!(sink.records()[0].record.data.get("a"), Some(&json!(2)));
        assert_eq!(logger.context().get("a"), Some(&json!(1)));
    }

    #[test]
    fn test_err_attached_for_severe_levels() {
        let (logger, sink) = memory_logger(LogLevel::Debug);
        let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "upstream slow");

        logger
            .warn("W", "warned", Some(ErrorInfo::from_error(&io_err)), ())
            .unwrap();
        logger.error("E", "failed", None, json!({"k": 1})).unwrap();
        logger
            .fatal("F", "died", Some(ErrorInfo::new("Panic", "boom")), ())
            .unwrap();

        let captured = sink.records();
        assert_eq!(captured.len(), 3);
        assert_eq!(
            captured[0].record.err.as_ref().map(|e| e.message.as_str()),
            Some("upstream slow")
        );
        assert!(captured[1].record.err.is_none());
        assert!(captured[0].record.data.is_empty());
        assert_eq!(captured[2].record.to_json_value()["err"]["type"], "Panic");
    }

    #[test]
    fn test_with_level_gates_emission() {
        let (logger, sink) = memory_logger(LogLevel::Info);
        logger.with_level(LogLevel::Warn).unwrap();

        logger.debug("D", "d", ()).unwrap();
        logger.trace("T", "t", ()).unwrap();
        logger.info("I", "i", ()).unwrap();
        assert!(sink.records().is_empty());

        logger.warn("W", "w", None, ()).unwrap();
        logger.error("E", "e", None, ()).unwrap();
        logger.fatal("F", "f", None, ()).unwrap();

        let levels: Vec<LogLevel> = sink.records().iter().map(|r| r.level).collect();
        assert_eq!(levels, vec![LogLevel::Warn, LogLevel::Error, LogLevel::Fatal]);
    }

    #[test]
    fn test_with_level_reconfigures_sink() {
        let (logger, sink) = memory_logger(LogLevel::Info);
        assert_eq!(sink.configure_count(), 1);

        logger.with_level(LogLevel::Debug).unwrap();
        assert_eq!(sink.configure_count(), 2);
        assert_eq!(logger.level(), LogLevel::Debug);

        logger.debug("D", "now visible", ()).unwrap();
        assert_eq!(sink.records().len(), 1);
    }

    #[test]
    fn test_with_level_name_rejects_unknown() {
        let (logger, sink) = memory_logger(LogLevel::Info);

        let err = logger.with_level_name("bogus-level").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel { .. }));
        assert_eq!(logger.level(), LogLevel::Info);
        assert_eq!(sink.configure_count(), 1);

        logger.with_level_name("error").unwrap();
        assert_eq!(logger.level(), LogLevel::Error);
    }

    #[test]
    fn test_failed_configure_keeps_previous_level() {
        let refuse = Arc::new(AtomicBool::new(false));
        let inner = MemorySink::new();
        let logger = Logger::with_sink(
            FlakySink {
                inner: inner.clone(),
                refuse: Arc::clone(&refuse),
            },
            LogLevel::Info,
        )
        .unwrap();

        refuse.store(true, Ordering::SeqCst);
        assert!(logger.with_level(LogLevel::Debug).is_err());
        assert_eq!(logger.level(), LogLevel::Info);

        logger.debug("D", "still hidden", ()).unwrap();
        logger.info("I", "still shown", ()).unwrap();
        assert_eq!(inner.records().len(), 1);

        assert!(logger.sub_logger().is_err());
    }

    #[test]
    fn test_sub_logger_is_independent() {
        let (parent, sink) = memory_logger(LogLevel::Warn);
        parent.set(json!({"a": 1})).custom_field(json!({"x": 9}));

        let child = parent.sub_logger().unwrap();
        assert_eq!(child.level(), LogLevel::Warn);
        assert_eq!(sink.configure_count(), 2);

        parent.set(json!({"a": 2})).custom_field(json!({"x": 10}));
        assert_eq!(child.context(), FieldMap::from(json!({"a": 1})));
        assert_eq!(child.custom_fields(), FieldMap::from(json!({"x": 9})));

        child.set(json!({"child": true}));
        assert!(!parent.context().contains_key("child"));

        child.with_level(LogLevel::Debug).unwrap();
        assert_eq!(parent.level(), LogLevel::Warn);
    }

    #[test]
    fn test_builder_seeds_maps() {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .level(LogLevel::Trace)
            .sink(sink.clone())
            .context(json!({"env": "test"}))
            .custom_fields(json!({"service": "api"}))
            .level_format(LevelFormat::Number)
            .build()
            .unwrap();

        logger.trace("T", "traced", ()).unwrap();
        let captured = sink.records();
        assert_eq!(captured[0].record.data.get("env"), Some(&json!("test")));
        assert_eq!(captured[0].record.custom.get("service"), Some(&json!("api")));
        assert_eq!(sink.last_config().map(|c| c.level_format), Some(LevelFormat::Number));
    }

    #[test]
    fn test_builder_default() {
        let logger = LoggerBuilder::default().sink(NullSink).build().unwrap();
        assert_eq!(logger.level(), LogLevel::Info);
        assert_eq!(logger.sink_name(), "null");
    }

    #[test]
    fn test_config_from_json() {
        let config =
            LoggerConfig::from_json(r#"{"level": "warn", "timestamp": "unix_millis"}"#).unwrap();
        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.timestamp, TimestampFormat::UnixMillis);
        assert_eq!(config.level_format, LevelFormat::Label);

        assert!(LoggerConfig::from_json(r#"{"level": "loud"}"#).is_err());
    }
}
