//! Console sink implementation

use crate::core::{
    LogLevel, LogRecord, OutputFormat, Result, Sink, SinkConfig, SinkHandle,
};
use chrono::Utc;
use std::io::Write;
use std::sync::Arc;

/// Writes one line per record; error and fatal go to stderr, the rest to stdout
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    use_colors: bool,
    output_format: OutputFormat,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            use_colors: cfg!(feature = "console"),
            output_format: OutputFormat::default(),
        }
    }

    /// Set the output format for this sink
    ///
    /// # Example
    ///
    /// ```
    /// use context_logger::sinks::ConsoleSink;
    /// use context_logger::OutputFormat;
    ///
    /// let sink = ConsoleSink::new().with_output_format(OutputFormat::Text);
    /// ```
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Colors only apply to the text format and need the `console` feature
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Build a handle without going through the fallible trait method
    pub fn handle(&self, config: &SinkConfig) -> ConsoleHandle {
        ConsoleHandle {
            config: config.clone(),
            use_colors: self.use_colors,
            output_format: self.output_format,
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn configure(&self, config: &SinkConfig) -> Result<Arc<dyn SinkHandle>> {
        Ok(Arc::new(self.handle(config)))
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[derive(Debug, Clone)]
pub struct ConsoleHandle {
    config: SinkConfig,
    use_colors: bool,
    output_format: OutputFormat,
}

impl ConsoleHandle {
    /// Render the line for `record`, or `None` if `level` is below the threshold
    pub fn render(&self, level: LogLevel, record: &LogRecord, primary: &str) -> Option<String> {
        if !self.config.enabled(level) {
            return None;
        }

        let now = Utc::now();
        let line = match self.output_format {
            OutputFormat::Text if self.use_colors => {
                OutputFormat::format_text(&colored_level(level), record, &self.config, &now)
            }
            format => format.format(level, record, primary, &self.config, &now),
        };
        Some(line)
    }
}

impl SinkHandle for ConsoleHandle {
    fn emit(&self, level: LogLevel, record: &LogRecord, primary: &str) -> Result<()> {
        let Some(line) = self.render(level, record, primary) else {
            return Ok(());
        };

        // Route Error and Fatal levels to stderr, others to stdout
        match level {
            LogLevel::Error | LogLevel::Fatal => writeln!(std::io::stderr().lock(), "{}", line)?,
            _ => writeln!(std::io::stdout().lock(), "{}", line)?,
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }
}

#[cfg(feature = "console")]
fn colored_level(level: LogLevel) -> String {
    use colored::Colorize;
    format!("{:5}", level.to_str())
        .color(level.color_code())
        .to_string()
}

#[cfg(not(feature = "console"))]
fn colored_level(level: LogLevel) -> String {
    format!("{:5}", level.to_str())
}
