//! Core logger types and traits

pub mod error;
pub mod format;
pub mod level;
pub mod logger;
pub mod logger_info;
pub mod registry;

pub use error::{LoggerError, Result};
pub use level::{
    console_color, ConsoleColor, Hue, NamedLevel, LVL_ERROR, LVL_FATAL, LVL_INFO, LVL_PANIC,
    LVL_PRINT, LVL_WARNING,
};
pub use logger::Logger;
pub use logger_info::LoggerInfo;
pub use registry::{global, FatalHandler, LoggerKey, Registry, RegistryBuilder};
