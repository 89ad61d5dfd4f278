//! Sink implementations

pub mod console;
pub mod memory;

pub use console::{ConsoleHandle, ConsoleSink};
pub use memory::{CapturedRecord, MemorySink, NullSink};

// Re-export traits for convenience
pub use crate::core::{Sink, SinkHandle};
