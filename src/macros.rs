//! Logging macros for ergonomic log message formatting.
//!
//! These macros format their arguments like `format!` and hand the result to
//! [`Registry::lvl`](crate::Registry::lvl), which records the macro's call
//! site as the caller location.
//!
//! # Examples
//!
//! ```
//! use log_fanout::prelude::*;
//! use log_fanout::info;
//!
//! let registry = Registry::new();
//! registry.register(ConsoleLogger::new());
//!
//! // Basic logging
//! info!(registry, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(registry, "Server listening on port {}", port);
//! ```

/// Log a message at an arbitrary level.
///
/// # Examples
///
/// ```
/// # use log_fanout::prelude::*;
/// # let registry = Registry::new();
/// use log_fanout::lvl;
/// lvl!(registry, 2, "Cache warmed");
/// lvl!(registry, -3, "Highlighted detail: {}", 42);
/// ```
#[macro_export]
macro_rules! lvl {
    ($registry:expr, $level:expr, $($arg:tt)+) => {
        $registry.lvl($level, format!($($arg)+))
    };
}

/// Log an info-level message.
///
/// ```
/// # use log_fanout::prelude::*;
/// # let registry = Registry::new();
/// use log_fanout::info;
/// info!(registry, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($registry:expr, $($arg:tt)+) => {
        $crate::lvl!($registry, $crate::core::LVL_INFO, $($arg)+)
    };
}

/// Log a warning.
///
/// ```
/// # use log_fanout::prelude::*;
/// # let registry = Registry::new();
/// use log_fanout::warn;
/// warn!(registry, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($registry:expr, $($arg:tt)+) => {
        $crate::lvl!($registry, $crate::core::LVL_WARNING, $($arg)+)
    };
}

/// Log an error.
///
/// ```
/// # use log_fanout::prelude::*;
/// # let registry = Registry::new();
/// use log_fanout::error;
/// error!(registry, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($registry:expr, $($arg:tt)+) => {
        $crate::lvl!($registry, $crate::core::LVL_ERROR, $($arg)+)
    };
}

/// Log at the fatal level. This only logs; ending the process is up to the caller.
#[macro_export]
macro_rules! fatal {
    ($registry:expr, $($arg:tt)+) => {
        $crate::lvl!($registry, $crate::core::LVL_FATAL, $($arg)+)
    };
}
