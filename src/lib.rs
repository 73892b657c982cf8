//! # Log Fan-out
//!
//! Register any number of logging backends and send every message to all of
//! them at once, each backend filtering by its own verbosity.
//!
//! ## Features
//!
//! - **Multiple Backends**: File, syslog and console, plus your own through the [`Logger`] trait
//! - **Per-Backend Verbosity**: Every backend carries its own [`LoggerInfo`]
//! - **Colored Console**: Signed levels map to terminal colors and brightness
//! - **Thread Safe**: One lock serializes registration and dispatch
//!
//! ## Example
//!
//! ```no_run
//! use log_fanout::prelude::*;
//!
//! let registry = Registry::new();
//! registry.register(ConsoleLogger::with_info(LoggerInfo::default().with_colors(true)));
//! let file = FileLogger::new(LoggerInfo::default().with_debug_lvl(3), "/tmp/app.log").unwrap();
//! registry.register(file);
//!
//! registry.info("service started");
//! registry.lvl(3, "only the file sees this");
//! ```

pub mod backends;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::backends::{
        ConsoleLogger, FileLogger, SyslogConnector, SyslogFacility, SyslogLogger, SyslogPriority,
        SyslogSeverity,
    };
    pub use crate::core::{
        global, FatalHandler, Logger, LoggerError, LoggerInfo, LoggerKey, NamedLevel, Registry,
        RegistryBuilder, Result, LVL_ERROR, LVL_FATAL, LVL_INFO, LVL_PANIC, LVL_PRINT,
        LVL_WARNING,
    };
}

pub use crate::backends::{ConsoleLogger, FileLogger, SyslogLogger};
pub use crate::core::{
    global, FatalHandler, Logger, LoggerError, LoggerInfo, LoggerKey, NamedLevel, Registry,
    RegistryBuilder, Result,
};
