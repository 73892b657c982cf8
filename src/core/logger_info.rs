//! Per-backend logging configuration

use super::error::Result;
use serde::{Deserialize, Serialize};

/// Default verbosity threshold of the standard console logger
pub const DEFAULT_STD_DEBUG_LVL: i32 = 1;
/// Default `show_time` of the standard console logger
pub const DEFAULT_STD_SHOW_TIME: bool = false;
/// Default `use_colors` of the standard console logger
pub const DEFAULT_STD_USE_COLORS: bool = false;
/// Default `padding` of the standard console logger
pub const DEFAULT_STD_PADDING: bool = true;

/// How a backend wants its messages rendered.
///
/// Every backend owns one `LoggerInfo`. The registry reads `debug_lvl` to
/// decide whether a message reaches the backend at all; the other flags are
/// read when a line is formatted for it.
///
/// Missing fields in serialized form take the standard console defaults:
///
/// ```
/// use log_fanout::LoggerInfo;
///
/// let info = LoggerInfo::from_json(r#"{ "debug_lvl": 3, "use_colors": true }"#).unwrap();
/// assert_eq!(info.debug_lvl, 3);
/// assert!(info.use_colors);
/// assert!(info.padding);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerInfo {
    /// Messages with a level greater than this are not delivered
    pub debug_lvl: i32,
    /// Prefix formatted lines with a timestamp
    pub show_time: bool,
    /// Color console output. Conventionally implies `padding`.
    pub use_colors: bool,
    /// Pad the caller location of formatted lines to a fixed column
    pub padding: bool,
}

impl LoggerInfo {
    pub fn new(debug_lvl: i32, show_time: bool, use_colors: bool, padding: bool) -> Self {
        Self {
            debug_lvl,
            show_time,
            use_colors,
            padding,
        }
    }

    /// Load a configuration from a JSON object
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_debug_lvl(mut self, debug_lvl: i32) -> Self {
        self.debug_lvl = debug_lvl;
        self
    }

    #[must_use]
    pub fn with_show_time(mut self, show_time: bool) -> Self {
        self.show_time = show_time;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: bool) -> Self {
        self.padding = padding;
        self
    }

    /// Whether a message at `level` should be handed to the backend.
    ///
    /// This is the only verbosity filter in the crate; backends themselves
    /// write whatever they are given.
    pub fn admits(&self, level: i32) -> bool {
        level <= self.debug_lvl
    }
}

impl Default for LoggerInfo {
    fn default() -> Self {
        Self {
            debug_lvl: DEFAULT_STD_DEBUG_LVL,
            show_time: DEFAULT_STD_SHOW_TIME,
            use_colors: DEFAULT_STD_USE_COLORS,
            padding: DEFAULT_STD_PADDING,
        }
    }
}
