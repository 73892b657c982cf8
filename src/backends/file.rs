//! File backend

use crate::core::{Logger, LoggerError, LoggerInfo, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes messages verbatim into a file.
///
/// The file is created, or truncated if it already exists, when the backend
/// is constructed. Nothing is added to the messages: callers supply their
/// own newlines.
pub struct FileLogger {
    info: LoggerInfo,
    path: PathBuf,
    file: Option<File>,
}

impl FileLogger {
    pub fn new(info: LoggerInfo, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = File::create(&path).map_err(|e| {
            LoggerError::io_operation("creating log file", path.display().to_string(), e)
        })?;

        Ok(Self {
            info,
            path,
            file: Some(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Logger for FileLogger {
    fn log(&mut self, _level: i32, msg: &str) -> Result<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| LoggerError::closed("file"))?;

        file.write_all(msg.as_bytes())
            .map_err(|e| LoggerError::write_failed("file", e))
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }
        Ok(())
    }

    fn logger_info(&self) -> &LoggerInfo {
        &self.info
    }

    fn name(&self) -> &str {
        "file"
    }
}
