//! Recording and discarding sinks
//!
//! `MemorySink` keeps every record that passes its handle's threshold, which
//! makes it the sink of choice for tests. `NullSink` drops everything.

use crate::core::{LogLevel, LogRecord, Result, Sink, SinkConfig, SinkHandle};
use parking_lot::Mutex;
use std::sync::Arc;

/// A record as it reached a sink handle
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRecord {
    pub level: LogLevel,
    pub record: LogRecord,
    pub primary: String,
}

#[derive(Debug, Default)]
struct MemoryState {
    records: Vec<CapturedRecord>,
    configs: Vec<SinkConfig>,
}

/// Recording sink; clones share the same storage
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    state: Arc<Mutex<MemoryState>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every record emitted so far, oldest first
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.state.lock().records.clone()
    }

    /// Remove and return the recorded records
    pub fn take(&self) -> Vec<CapturedRecord> {
        std::mem::take(&mut self.state.lock().records)
    }

    pub fn len(&self) -> usize {
        self.state.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().records.is_empty()
    }

    /// How many handles have been configured from this sink
    pub fn configure_count(&self) -> usize {
        self.state.lock().configs.len()
    }

    pub fn last_config(&self) -> Option<SinkConfig> {
        self.state.lock().configs.last().cloned()
    }
}

impl Sink for MemorySink {
    fn configure(&self, config: &SinkConfig) -> Result<Arc<dyn SinkHandle>> {
        self.state.lock().configs.push(config.clone());
        Ok(Arc::new(MemoryHandle {
            config: config.clone(),
            state: Arc::clone(&self.state),
        }))
    }

    fn name(&self) -> &str {
        "memory"
    }
}

struct MemoryHandle {
    config: SinkConfig,
    state: Arc<Mutex<MemoryState>>,
}

impl SinkHandle for MemoryHandle {
    fn emit(&self, level: LogLevel, record: &LogRecord, primary: &str) -> Result<()> {
        if self.config.enabled(level) {
            self.state.lock().records.push(CapturedRecord {
                level,
                record: record.clone(),
                primary: primary.to_string(),
            });
        }
        Ok(())
    }
}

/// Sink that accepts and discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl Sink for NullSink {
    fn configure(&self, _config: &SinkConfig) -> Result<Arc<dyn SinkHandle>> {
        Ok(Arc::new(NullSink))
    }

    fn name(&self) -> &str {
        "null"
    }
}

impl SinkHandle for NullSink {
    fn emit(&self, _level: LogLevel, _record: &LogRecord, _primary: &str) -> Result<()> {
        Ok(())
    }
}
