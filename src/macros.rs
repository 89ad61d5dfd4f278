//! Logging macros for ergonomic message formatting.
//!
//! Each macro takes a logger, a record code, and `format!`-style message
//! arguments. The record's call-site data is left empty; use the logger
//! methods directly to pass data. `warn!`, `error!` and `fatal!` accept an
//! optional `err = <error>` before the message, captured with
//! [`ErrorInfo::from_error`](crate::ErrorInfo::from_error).
//!
//! # Examples
//!
//! ```
//! use context_logger::prelude::*;
//! use context_logger::{info, error};
//!
//! let logger = Logger::with_sink(MemorySink::new(), LogLevel::Info)?;
//!
//! let port = 8080;
//! info!(logger, "LISTEN", "Server listening on port {}", port)?;
//!
//! let err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
//! error!(logger, "BIND_FAILED", err = err, "Could not bind {}", port)?;
//! # Ok::<(), LoggerError>(())
//! ```

/// Log a formatted message at an explicit level.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $code:expr, err = $err:expr, $($arg:tt)+) => {
        $logger.log(
            $level,
            $code,
            format!($($arg)+),
            Some($crate::ErrorInfo::from_error(&$err)),
            (),
        )
    };
    ($logger:expr, $level:expr, $code:expr, $($arg:tt)+) => {
        $logger.log($level, $code, format!($($arg)+), None, ())
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $code:expr, $($arg:tt)+) => {
        $logger.log($crate::LogLevel::Debug, $code, format!($($arg)+), None, ())
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $code:expr, $($arg:tt)+) => {
        $logger.log($crate::LogLevel::Trace, $code, format!($($arg)+), None, ())
    };
}

/// Log an info-level message.
///
/// Only warn and above carry an error, so `err = ..` does not compile here:
///
/// ```compile_fail
/// # use context_logger::prelude::*;
/// # let logger = Logger::with_sink(NullSink, LogLevel::Info).unwrap();
/// use context_logger::info;
/// let e = std::io::Error::new(std::io::ErrorKind::Other, "x");
/// info!(logger, "I", err = e, "info with err").unwrap();
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $code:expr, $($arg:tt)+) => {
        $logger.log($crate::LogLevel::Info, $code, format!($($arg)+), None, ())
    };
}

/// Log a warning-level message, optionally with `err = <error>`.
///
/// ```
/// # use context_logger::prelude::*;
/// # let logger = Logger::with_sink(NullSink, LogLevel::Info)?;
/// use context_logger::warn;
/// warn!(logger, "DISK_LOW", "Only {}% left", 4)?;
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $code:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $code, $($arg)+)
    };
}

/// Log an error-level message, optionally with `err = <error>`.
#[macro_export]
macro_rules! error {
    ($logger:expr, $code:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $code, $($arg)+)
    };
}

/// Log a fatal-level message, optionally with `err = <error>`.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $code:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $code, $($arg)+)
    };
}
