//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), with specialized
//! support for filter results.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use filterkit_core::Value;
use serde::Serialize;
use std::io::{self, Write};
use tracing::trace;

/// Trait for formatting output with specialized support for filter values
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a filter result.
    ///
    /// Human output prints strings raw and everything else as JSON; the
    /// absent value prints nothing.
    fn format_value(&self, value: &Value) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_value(&self, value: &Value) -> Result<String> {
        match (self, value) {
            (OutputFormat::Human, Value::Null) => Ok(String::new()),
            (OutputFormat::Human, Value::String(text)) => Ok(text.clone()),
            (OutputFormat::Human, Value::Number(_)) => Ok(value.coerce_string()),
            _ => self.format(value),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a section header (human format only)
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        self.emit(&formatted)
    }

    /// Write a filter result in the configured format
    pub fn value(&mut self, value: &Value) -> Result<()> {
        trace!(shape = value.type_name(), "Outputting filter result");

        if self.format == OutputFormat::Human && value.is_null() {
            return Ok(());
        }
        let formatted = self.format.format_value(value)?;
        self.emit(&formatted)
    }

    /// Write a list of names, one per line in human format
    pub fn names(&mut self, names: &[&str]) -> Result<()> {
        if self.format != OutputFormat::Human {
            return self.data(&names);
        }

        for name in names {
            if self.use_color {
                self.writeln(&name.bold().to_string())?;
            } else {
                self.writeln(name)?;
            }
        }
        Ok(())
    }

    fn emit(&mut self, formatted: &str) -> Result<()> {
        // YAML already ends in a newline
        if formatted.ends_with('\n') {
            self.write(formatted)
        } else {
            self.writeln(formatted)
        }
    }
}

/// In-memory writers for handler tests
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Writer that keeps everything written to it
    #[derive(Clone, Default)]
    pub(crate) struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    /// Uncolored, non-quiet writer plus a handle to what it writes
    pub(crate) fn writer(format: OutputFormat) -> (OutputWriter, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let output = OutputWriter::with_writer(format, false, false, Box::new(buffer.clone()));
        (output, buffer)
    }
}
