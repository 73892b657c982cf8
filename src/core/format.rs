//! Line formatting for the convenience logging calls
//!
//! Backends write raw bytes. Callers that want a complete line (timestamp,
//! level tag, caller location, trailing newline) build it here from the
//! receiving backend's [`LoggerInfo`].

use super::level::{NamedLevel, LVL_PRINT};
use super::logger_info::LoggerInfo;
use chrono::{DateTime, Utc};
use std::fmt::Write;
use std::panic::Location;

/// Column the caller location is padded to when `padding` is on
pub const LOCATION_PADDING: usize = 40;

/// Timestamp layout used when `show_time` is on
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Short tag identifying `level` in a formatted line
pub fn level_tag(level: i32) -> String {
    match NamedLevel::from_level(level) {
        Some(named) => named.tag().to_string(),
        None if level < 0 => format!("{}!", level.unsigned_abs()),
        None => level.to_string(),
    }
}

/// `file:line` of a caller location
pub fn location_str(location: &Location<'_>) -> String {
    format!("{}:{}", location.file(), location.line())
}

/// Build the full line for `msg` as the backend configured by `info` wants it.
///
/// ```
/// use log_fanout::core::format::format_line;
/// use log_fanout::LoggerInfo;
///
/// let info = LoggerInfo::default().with_padding(false);
/// let line = format_line(&info, 2, "main.rs:7", "connected", chrono::Utc::now());
/// assert_eq!(line, "2 : main.rs:7 - connected\n");
/// ```
pub fn format_line(
    info: &LoggerInfo,
    level: i32,
    location: &str,
    msg: &str,
    now: DateTime<Utc>,
) -> String {
    let mut line = String::with_capacity(msg.len() + LOCATION_PADDING + 32);

    if info.show_time {
        let _ = write!(line, "{} ", now.format(TIME_FORMAT));
    }

    if level != LVL_PRINT {
        let tag = level_tag(level);
        if info.padding {
            let _ = write!(
                line,
                "{:<2} : {:<width$} - ",
                tag,
                location,
                width = LOCATION_PADDING
            );
        } else {
            let _ = write!(line, "{} : {} - ", tag, location);
        }
    }

    line.push_str(msg);
    if !msg.ends_with('\n') {
        line.push('\n');
    }
    line
}
