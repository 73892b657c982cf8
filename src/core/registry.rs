//! Registry of active backends and message dispatch

use super::{
    error::LoggerError,
    format::{format_line, location_str},
    level::{LVL_ERROR, LVL_INFO, LVL_PRINT, LVL_WARNING},
    logger::Logger,
    logger_info::LoggerInfo,
};
use crate::backends::ConsoleLogger;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fmt;
use std::panic::Location;
use std::sync::{Arc, OnceLock};

/// Handle returned by [`Registry::register`].
///
/// Keys come from a counter that only moves forward, so a key is never
/// handed out twice by the same registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoggerKey(u64);

impl LoggerKey {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LoggerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Called when a backend fails to write a message it accepted.
///
/// The handler is expected to end the process. If it returns, dispatch
/// panics with the same error.
pub type FatalHandler = Arc<dyn Fn(&LoggerError) + Send + Sync>;

struct RegistryState {
    loggers: BTreeMap<LoggerKey, Box<dyn Logger>>,
    next_key: u64,
}

/// Backends that receive every dispatched message.
///
/// One lock covers the backend map, the key counter and the fan-out of each
/// message, so a backend is never closed while it is being written to and
/// console color sequences from concurrent dispatches never interleave.
///
/// # Example
///
/// ```
/// use log_fanout::{ConsoleLogger, Registry};
///
/// let registry = Registry::new();
/// let key = registry.register(ConsoleLogger::new());
/// registry.dispatch(1, "hello\n");
/// registry.unregister(key);
/// assert!(registry.is_empty());
/// ```
pub struct Registry {
    state: Mutex<RegistryState>,
    on_fatal: FatalHandler,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::with_fatal_handler(Arc::new(abort_on_write_failure))
    }

    #[must_use]
    pub fn with_fatal_handler(on_fatal: FatalHandler) -> Self {
        Self {
            state: Mutex::new(RegistryState {
                loggers: BTreeMap::new(),
                next_key: 0,
            }),
            on_fatal,
        }
    }

    /// Create a builder for configuring a registry
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Take ownership of `logger` and start delivering messages to it.
    pub fn register<L: Logger + 'static>(&self, logger: L) -> LoggerKey {
        let mut state = self.state.lock();
        let key = LoggerKey(state.next_key);
        state.loggers.insert(key, Box::new(logger));
        state.next_key += 1;
        key
    }

    /// Close and drop the backend registered under `key`.
    ///
    /// Unknown keys are ignored. A close error is reported on stderr; the
    /// backend is removed either way.
    pub fn unregister(&self, key: LoggerKey) {
        let mut state = self.state.lock();
        if let Some(mut logger) = state.loggers.remove(&key) {
            if let Err(e) = logger.close() {
                eprintln!(
                    "[LOGGER ERROR] Closing {} backend {} failed: {}",
                    logger.name(),
                    key,
                    e
                );
            }
        }
    }

    /// Deliver `msg` verbatim to every backend whose verbosity admits `level`.
    ///
    /// Returns the number of backends written to. A write failure is handed
    /// to the fatal handler.
    pub fn dispatch(&self, level: i32, msg: &str) -> usize {
        self.fan_out(level, |_| msg.to_owned())
    }

    /// Format `msg` for each backend and dispatch it, tagging it with the
    /// caller's location.
    #[track_caller]
    pub fn lvl(&self, level: i32, msg: impl AsRef<str>) -> usize {
        let location = location_str(Location::caller());
        let now = Utc::now();
        let msg = msg.as_ref();
        self.fan_out(level, |info| format_line(info, level, &location, msg, now))
    }

    #[track_caller]
    pub fn print(&self, msg: impl AsRef<str>) -> usize {
        self.lvl(LVL_PRINT, msg)
    }

    #[track_caller]
    pub fn info(&self, msg: impl AsRef<str>) -> usize {
        self.lvl(LVL_INFO, msg)
    }

    #[track_caller]
    pub fn warn(&self, msg: impl AsRef<str>) -> usize {
        self.lvl(LVL_WARNING, msg)
    }

    #[track_caller]
    pub fn error(&self, msg: impl AsRef<str>) -> usize {
        self.lvl(LVL_ERROR, msg)
    }

    fn fan_out<F>(&self, level: i32, render: F) -> usize
    where
        F: Fn(&LoggerInfo) -> String,
    {
        let mut state = self.state.lock();
        let mut delivered = 0;
        let mut failure = None;

        for (key, logger) in state.loggers.iter_mut() {
            if !logger.logger_info().admits(level) {
                continue;
            }
            let line = render(logger.logger_info());
            if let Err(e) = logger.log(level, &line) {
                failure = Some((logger.name().to_string(), *key, e));
                break;
            }
            delivered += 1;
        }

        // The fatal handler may call back into the registry.
        drop(state);

        if let Some((name, key, e)) = failure {
            eprintln!(
                "[LOGGER CRITICAL] {} backend {} failed to write: {}",
                name, key, e
            );
            (self.on_fatal)(&e);
            panic!("unrecoverable log write failure: {}", e);
        }

        delivered
    }

    pub fn len(&self) -> usize {
        self.state.lock().loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().loggers.is_empty()
    }

    pub fn contains(&self, key: LoggerKey) -> bool {
        self.state.lock().loggers.contains_key(&key)
    }

    /// Keys of the registered backends, in registration order
    pub fn keys(&self) -> Vec<LoggerKey> {
        self.state.lock().loggers.keys().copied().collect()
    }

    /// Snapshot of the configuration of the backend under `key`
    pub fn logger_info(&self, key: LoggerKey) -> Option<LoggerInfo> {
        self.state
            .lock()
            .loggers
            .get(&key)
            .map(|logger| logger.logger_info().clone())
    }

    /// Key the next call to [`register`](Self::register) will return
    pub fn next_key(&self) -> LoggerKey {
        LoggerKey(self.state.lock().next_key)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Registry")
            .field("keys", &state.loggers.keys().collect::<Vec<_>>())
            .field("next_key", &state.next_key)
            .finish()
    }
}

/// Default fatal handler: report and abort the process.
fn abort_on_write_failure(err: &LoggerError) {
    eprintln!("[LOGGER CRITICAL] Aborting after log write failure: {}", err);
    std::process::abort();
}

/// The process-wide registry.
///
/// Initialized on first use with the standard console logger under key 0.
pub fn global() -> &'static Registry {
    static GLOBAL: OnceLock<Registry> = OnceLock::new();
    GLOBAL.get_or_init(|| {
        let registry = Registry::new();
        registry.register(ConsoleLogger::new());
        registry
    })
}

/// Builder for [`Registry`]
///
/// # Example
///
/// ```
/// use log_fanout::{ConsoleLogger, LoggerError, Registry};
/// use std::sync::Arc;
///
/// let registry = Registry::builder()
///     .logger(ConsoleLogger::new())
///     .on_fatal(Arc::new(|err: &LoggerError| eprintln!("giving up: {}", err)))
///     .build();
/// assert_eq!(registry.len(), 1);
/// ```
pub struct RegistryBuilder {
    loggers: Vec<Box<dyn Logger>>,
    on_fatal: Option<FatalHandler>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            loggers: Vec::new(),
            on_fatal: None,
        }
    }

    /// Register `logger` when the registry is built. Keys follow call order.
    #[must_use]
    pub fn logger<L: Logger + 'static>(mut self, logger: L) -> Self {
        self.loggers.push(Box::new(logger));
        self
    }

    #[must_use]
    pub fn on_fatal(mut self, handler: FatalHandler) -> Self {
        self.on_fatal = Some(handler);
        self
    }

    pub fn build(self) -> Registry {
        let registry = match self.on_fatal {
            Some(handler) => Registry::with_fatal_handler(handler),
            None => Registry::new(),
        };
        for logger in self.loggers {
            registry.register(logger);
        }
        registry
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
