//! Logger backend contract

use super::{error::Result, logger_info::LoggerInfo};

/// A destination for log messages.
///
/// `log` writes the message it is given without looking at
/// [`LoggerInfo::debug_lvl`]; deciding whether to call it at all is the
/// registry's job (see [`LoggerInfo::admits`]). Writes are blocking and
/// unbuffered. A returned error means an accepted message was lost, which
/// the registry treats as fatal.
///
/// Implementations are driven under the registry lock, so they only need to
/// be `Send`.
pub trait Logger: Send {
    fn log(&mut self, level: i32, msg: &str) -> Result<()>;

    /// Release the sink. Later calls to `log` fail with
    /// [`LoggerError::Closed`](super::LoggerError::Closed).
    fn close(&mut self) -> Result<()>;

    fn logger_info(&self) -> &LoggerInfo;

    fn name(&self) -> &str;
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn log(&mut self, level: i32, msg: &str) -> Result<()> {
        (**self).log(level, msg)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    fn logger_info(&self) -> &LoggerInfo {
        (**self).logger_info()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
