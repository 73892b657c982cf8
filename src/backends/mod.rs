//! Backend implementations

pub mod console;
pub mod file;
pub mod syslog;

pub use console::ConsoleLogger;
pub use file::FileLogger;
pub use syslog::{SyslogConnector, SyslogFacility, SyslogLogger, SyslogPriority, SyslogSeverity};

// Re-export the contract for convenience
pub use crate::core::Logger;
