//! Console backend

use crate::core::level::{console_color, uses_error_stream, RESET_SEQUENCE};
use crate::core::{Logger, LoggerError, LoggerInfo, Result};
use std::io::{self, Write};

/// Writes messages to the process's standard streams.
///
/// Warnings and worse go to stderr, everything else to stdout. With
/// `use_colors` the foreground is switched before the message and reset
/// after it.
///
/// The standard streams are shared by the whole process, so there should be
/// one `ConsoleLogger` per process. Calls must be serialized by the caller;
/// routing them through a [`Registry`](crate::Registry) does that. Unsynchronized
/// callers can interleave color and reset sequences.
pub struct ConsoleLogger {
    info: LoggerInfo,
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
}

impl ConsoleLogger {
    /// Console logger with the standard defaults
    /// ([`DEFAULT_STD_DEBUG_LVL`](crate::core::logger_info::DEFAULT_STD_DEBUG_LVL) and friends).
    pub fn new() -> Self {
        Self::with_info(LoggerInfo::default())
    }

    pub fn with_info(info: LoggerInfo) -> Self {
        Self::with_writers(info, Box::new(io::stdout()), Box::new(io::stderr()))
    }

    /// Console logger writing to `out` and `err` instead of stdout and stderr
    pub fn with_writers(
        info: LoggerInfo,
        out: Box<dyn Write + Send>,
        err: Box<dyn Write + Send>,
    ) -> Self {
        Self { info, out, err }
    }

    fn write_colored(
        stream: &mut dyn Write,
        use_colors: bool,
        level: i32,
        msg: &str,
    ) -> io::Result<()> {
        if use_colors {
            if let Some(color) = console_color(level) {
                stream.write_all(color.escape_sequence().as_bytes())?;
            }
        }

        stream.write_all(msg.as_bytes())?;

        if use_colors {
            stream.write_all(RESET_SEQUENCE.as_bytes())?;
        }
        stream.flush()
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for ConsoleLogger {
    fn log(&mut self, level: i32, msg: &str) -> Result<()> {
        let stream: &mut dyn Write = if uses_error_stream(level) {
            &mut *self.err
        } else {
            &mut *self.out
        };

        Self::write_colored(stream, self.info.use_colors, level, msg)
            .map_err(|e| LoggerError::write_failed("console", e))
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn logger_info(&self) -> &LoggerInfo {
        &self.info
    }

    fn name(&self) -> &str {
        "console"
    }
}
