//! Integration tests for the logging fan-out
//!
//! These tests verify:
//! - Delivery to every registered backend
//! - Per-backend verbosity filtering
//! - File truncation and verbatim writes
//! - Close-on-unregister semantics
//! - Fatal handling of write failures
//! - Console color output through the registry

use log_fanout::backends::{
    ConsoleLogger, FileLogger, SyslogConnector, SyslogLogger, SyslogPriority,
};
use log_fanout::core::error::{LoggerError, Result};
use log_fanout::core::level::{
    ConsoleColor, Hue, LVL_ERROR, LVL_INFO, LVL_WARNING, RESET_SEQUENCE,
};
use log_fanout::core::{Logger, LoggerInfo, Registry};
use parking_lot::Mutex;
use std::fs;
use std::io::{self, Write};
use std::net::UdpSocket;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, OnceLock};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().clone()).expect("Console output is not UTF-8")
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Records every message and close call it receives
struct RecordingLogger {
    info: LoggerInfo,
    messages: Arc<Mutex<Vec<(i32, String)>>>,
    closes: Arc<AtomicUsize>,
}

impl RecordingLogger {
    fn new(debug_lvl: i32) -> Self {
        Self {
            info: LoggerInfo::default().with_debug_lvl(debug_lvl),
            messages: Arc::new(Mutex::new(Vec::new())),
            closes: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl Logger for RecordingLogger {
    fn log(&mut self, level: i32, msg: &str) -> Result<()> {
        self.messages.lock().push((level, msg.to_string()));
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn logger_info(&self) -> &LoggerInfo {
        &self.info
    }

    fn name(&self) -> &str {
        "recording"
    }
}

struct BrokenLogger {
    info: LoggerInfo,
}

impl Logger for BrokenLogger {
    fn log(&mut self, _level: i32, _msg: &str) -> Result<()> {
        Err(LoggerError::write_failed(
            "broken",
            io::Error::new(io::ErrorKind::Other, "device gone"),
        ))
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn logger_info(&self) -> &LoggerInfo {
        &self.info
    }

    fn name(&self) -> &str {
        "broken"
    }
}

#[test]
fn test_dispatch_reaches_every_backend_once() {
    let registry = Registry::new();
    let mut recorders = Vec::new();

    for _ in 0..4 {
        let logger = RecordingLogger::new(1);
        recorders.push(Arc::clone(&logger.messages));
        registry.register(logger);
    }

    assert_eq!(registry.dispatch(1, "hello\n"), 4);

    for messages in &recorders {
        let messages = messages.lock();
        assert_eq!(messages.as_slice(), &[(1, "hello\n".to_string())]);
    }
}

#[test]
fn test_multiple_file_backends() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path1 = temp_dir.path().join("multi1.log");
    let path2 = temp_dir.path().join("multi2.log");

    let registry = Registry::new();
    registry.register(
        FileLogger::new(LoggerInfo::default(), &path1).expect("Failed to create backend"),
    );
    registry.register(
        FileLogger::new(LoggerInfo::default().with_debug_lvl(3), &path2)
            .expect("Failed to create backend"),
    );

    registry.dispatch(1, "both\n");
    registry.dispatch(3, "verbose only\n");
    registry.dispatch(LVL_ERROR, "errors everywhere\n");

    assert_eq!(
        fs::read_to_string(&path1).expect("Failed to read log file"),
        "both\nerrors everywhere\n"
    );
    assert_eq!(
        fs::read_to_string(&path2).expect("Failed to read log file"),
        "both\nverbose only\nerrors everywhere\n"
    );
}

#[test]
fn test_file_backend_truncates_and_writes_verbatim() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("verbatim.log");
    fs::write(&path, "previous run\nprevious run\n").expect("Failed to seed file");

    let registry = Registry::new();
    let key = registry.register(
        FileLogger::new(LoggerInfo::default(), &path).expect("Failed to create backend"),
    );

    registry.dispatch(1, "a");
    registry.dispatch(1, "b");
    registry.dispatch(1, "\tc");
    registry.unregister(key);

    assert_eq!(fs::read_to_string(&path).expect("Failed to read log file"), "ab\tc");
}

#[test]
fn test_unregister_closes_exactly_once() {
    let registry = Registry::new();
    let logger = RecordingLogger::new(1);
    let closes = Arc::clone(&logger.closes);
    let messages = Arc::clone(&logger.messages);

    let key = registry.register(logger);
    registry.unregister(key);
    registry.unregister(key);

    assert_eq!(closes.load(Ordering::SeqCst), 1);

    registry.dispatch(1, "after\n");
    assert!(messages.lock().is_empty());
}

#[test]
fn test_keys_survive_unregistration() {
    let registry = Registry::new();

    let first = registry.register(RecordingLogger::new(1));
    let second = registry.register(RecordingLogger::new(1));
    registry.unregister(first);
    registry.unregister(first);
    let third = registry.register(RecordingLogger::new(1));

    assert!(first < second && second < third);
    assert_eq!(third.get(), 2);
    assert_eq!(registry.keys(), vec![second, third]);
}

#[test]
fn test_boxed_backends_register() {
    let registry = Registry::new();
    let boxed: Box<dyn Logger> = Box::new(RecordingLogger::new(5));
    let key = registry.register(boxed);

    assert_eq!(registry.logger_info(key).map(|info| info.debug_lvl), Some(5));
    assert_eq!(registry.dispatch(5, "x"), 1);
}

#[test]
fn test_write_failure_is_fatal() {
    let fatal_calls = Arc::new(AtomicUsize::new(0));
    let fatal_clone = Arc::clone(&fatal_calls);

    let registry = Registry::builder()
        .logger(BrokenLogger {
            info: LoggerInfo::default(),
        })
        .on_fatal(Arc::new(move |err: &LoggerError| {
            assert!(matches!(err, LoggerError::WriteFailed { .. }));
            fatal_clone.fetch_add(1, Ordering::SeqCst);
        }))
        .build();

    let result = catch_unwind(AssertUnwindSafe(|| registry.dispatch(1, "lost\n")));

    assert!(result.is_err(), "A failed write must not be swallowed");
    assert_eq!(fatal_calls.load(Ordering::SeqCst), 1);

    // The lock is released on unwind, so the registry stays usable
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_fatal_handler_can_use_registry() {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    let seen_len = Arc::new(AtomicUsize::new(0));
    let seen_clone = Arc::clone(&seen_len);

    let registry = REGISTRY.get_or_init(|| {
        Registry::with_fatal_handler(Arc::new(move |_: &LoggerError| {
            let registry = REGISTRY.get().expect("Registry not initialized");
            seen_clone.store(registry.len(), Ordering::SeqCst);
            // Drop the failing backend (registered first) before reporting
            registry.unregister(registry.keys()[0]);
            registry.dispatch(LVL_ERROR, "reported from the fatal handler\n");
        }))
    });
    let survivor = RecordingLogger::new(1);
    let survivor_messages = Arc::clone(&survivor.messages);
    registry.register(BrokenLogger {
        info: LoggerInfo::default(),
    });
    registry.register(survivor);

    let (done_tx, done_rx) = mpsc::channel();
    thread::spawn(move || {
        let result = catch_unwind(AssertUnwindSafe(|| registry.dispatch(1, "lost\n")));
        let _ = done_tx.send(result.is_err());
    });

    let panicked = done_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("Dispatch deadlocked inside the fatal handler");
    assert!(panicked, "A failed write must not be swallowed");
    assert_eq!(seen_len.load(Ordering::SeqCst), 2);
    assert_eq!(
        survivor_messages.lock().as_slice(),
        &[(LVL_ERROR, "reported from the fatal handler\n".to_string())]
    );
}

#[test]
fn test_filtered_out_broken_backend_is_untouched() {
    let registry = Registry::builder()
        .logger(BrokenLogger {
            info: LoggerInfo::default().with_debug_lvl(0),
        })
        .on_fatal(Arc::new(|_: &LoggerError| panic!("should not be called")))
        .build();

    assert_eq!(registry.dispatch(2, "too verbose\n"), 0);
}

#[test]
fn test_console_colors_through_registry() {
    let out = SharedBuf::default();
    let err = SharedBuf::default();
    let console = ConsoleLogger::with_writers(
        LoggerInfo::default().with_colors(true).with_debug_lvl(5),
        Box::new(out.clone()),
        Box::new(err.clone()),
    );

    let registry = Registry::new();
    registry.register(console);

    registry.dispatch(LVL_ERROR, "failed\n");
    registry.dispatch(-3, "bright\n");
    registry.dispatch(0, "plain\n");

    let red = ConsoleColor::normal(Hue::Red).escape_sequence();
    let bright_green = ConsoleColor::bright(Hue::Green).escape_sequence();

    assert_eq!(err.contents(), format!("{}failed\n{}", red, RESET_SEQUENCE));
    assert_eq!(
        out.contents(),
        format!("{}bright\n{}plain\n{}", bright_green, RESET_SEQUENCE, RESET_SEQUENCE)
    );
}

#[test]
fn test_formatted_lines_follow_each_backend() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let plain_path = temp_dir.path().join("plain.log");
    let timed_path = temp_dir.path().join("timed.log");

    let registry = Registry::new();
    registry.register(
        FileLogger::new(LoggerInfo::default().with_padding(false), &plain_path)
            .expect("Failed to create backend"),
    );
    registry.register(
        FileLogger::new(
            LoggerInfo::default().with_padding(false).with_show_time(true),
            &timed_path,
        )
        .expect("Failed to create backend"),
    );

    registry.warn("disk at 91%");
    registry.print("raw banner");

    let plain = fs::read_to_string(&plain_path).expect("Failed to read log file");
    let lines: Vec<&str> = plain.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("W : "));
    assert!(lines[0].contains("integration_tests.rs:"));
    assert!(lines[0].ends_with(" - disk at 91%"));
    assert_eq!(lines[1], "raw banner");

    let timed = fs::read_to_string(&timed_path).expect("Failed to read log file");
    let first = timed.lines().next().expect("Missing line");
    // "YYYY-MM-DD HH:MM:SS.mmm " prefix
    assert_eq!(&first[4..5], "-");
    assert_eq!(&first[23..28], " W : ");
}

#[test]
fn test_info_is_stdout_warning_is_stderr() {
    let out = SharedBuf::default();
    let err = SharedBuf::default();
    let registry = Registry::new();
    registry.register(ConsoleLogger::with_writers(
        LoggerInfo::default(),
        Box::new(out.clone()),
        Box::new(err.clone()),
    ));

    registry.dispatch(LVL_INFO, "info\n");
    registry.dispatch(LVL_WARNING, "warning\n");

    assert_eq!(out.contents(), "info\n");
    assert_eq!(err.contents(), "warning\n");
}

#[test]
fn test_syslog_backend_in_registry() {
    let collector = UdpSocket::bind("127.0.0.1:0").expect("Failed to bind collector");
    collector
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("Failed to set timeout");
    let addr = collector.local_addr().expect("No local address");

    let registry = Registry::new();
    let key = registry.register(
        SyslogLogger::with_connector(
            LoggerInfo::default(),
            SyslogPriority::default(),
            "integration",
            &SyslogConnector::Udp(addr),
        )
        .expect("Failed to create syslog backend"),
    );

    assert_eq!(registry.dispatch(1, "through syslog"), 1);
    registry.unregister(key);

    let mut buf = [0u8; 1024];
    let n = collector.recv(&mut buf).expect("No syslog record received");
    let record = String::from_utf8_lossy(&buf[..n]);
    assert!(record.starts_with("<14>"));
    assert!(record.contains(" integration["));
    assert!(record.ends_with("]: through syslog\n"));
}
