//! Syslog backend
//!
//! Connects to the local syslog daemon through its Unix socket, or to a
//! remote collector over UDP or TCP, and sends each message as one BSD-style
//! syslog record.

use crate::core::{Logger, LoggerError, LoggerInfo, Result};
use chrono::{Local, SecondsFormat};
use std::io::{self, Write};
use std::net::{SocketAddr, TcpStream, UdpSocket};
#[cfg(unix)]
use std::os::unix::net::{UnixDatagram, UnixStream};
#[cfg(unix)]
use std::path::{Path, PathBuf};

/// Sockets tried, in order, by [`SyslogConnector::Local`]
#[cfg(unix)]
pub const LOCAL_SOCKETS: [&str; 3] = ["/dev/log", "/var/run/syslog", "/var/run/log"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyslogFacility {
    Kern = 0,
    User = 1,
    Mail = 2,
    Daemon = 3,
    Auth = 4,
    Syslog = 5,
    Lpr = 6,
    News = 7,
    Uucp = 8,
    Cron = 9,
    AuthPriv = 10,
    Ftp = 11,
    Local0 = 16,
    Local1 = 17,
    Local2 = 18,
    Local3 = 19,
    Local4 = 20,
    Local5 = 21,
    Local6 = 22,
    Local7 = 23,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SyslogSeverity {
    Emerg = 0,
    Alert = 1,
    Crit = 2,
    Err = 3,
    Warning = 4,
    Notice = 5,
    Info = 6,
    Debug = 7,
}

/// Facility and severity stamped on every record of a [`SyslogLogger`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyslogPriority {
    pub facility: SyslogFacility,
    pub severity: SyslogSeverity,
}

impl SyslogPriority {
    pub fn new(facility: SyslogFacility, severity: SyslogSeverity) -> Self {
        Self { facility, severity }
    }

    /// The `PRI` value of the record header
    pub fn value(self) -> u8 {
        (self.facility as u8) * 8 + self.severity as u8
    }
}

impl Default for SyslogPriority {
    fn default() -> Self {
        Self::new(SyslogFacility::User, SyslogSeverity::Info)
    }
}

/// Where a [`SyslogLogger`] sends its records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyslogConnector {
    /// The local daemon, through the first reachable of [`LOCAL_SOCKETS`]
    #[cfg(unix)]
    Local,
    /// A Unix socket at an explicit path, datagram first, then stream
    #[cfg(unix)]
    Unix(PathBuf),
    Udp(SocketAddr),
    Tcp(SocketAddr),
}

enum Connection {
    #[cfg(unix)]
    UnixDatagram(UnixDatagram),
    #[cfg(unix)]
    UnixStream(UnixStream),
    Udp(UdpSocket),
    Tcp(TcpStream),
}

impl Connection {
    fn open(connector: &SyslogConnector) -> Result<Self> {
        match connector {
            #[cfg(unix)]
            SyslogConnector::Local => {
                for path in LOCAL_SOCKETS {
                    if let Ok(connection) = Self::open_unix(Path::new(path)) {
                        return Ok(connection);
                    }
                }
                Err(LoggerError::syslog_unavailable(format!(
                    "no local syslog socket reachable (tried {})",
                    LOCAL_SOCKETS.join(", ")
                )))
            }
            #[cfg(unix)]
            SyslogConnector::Unix(path) => Self::open_unix(path).map_err(|e| {
                LoggerError::syslog_unavailable(format!("{}: {}", path.display(), e))
            }),
            SyslogConnector::Udp(addr) => Self::open_udp(*addr)
                .map_err(|e| LoggerError::syslog_unavailable(format!("udp {}: {}", addr, e))),
            SyslogConnector::Tcp(addr) => TcpStream::connect(addr)
                .map(Connection::Tcp)
                .map_err(|e| LoggerError::syslog_unavailable(format!("tcp {}: {}", addr, e))),
        }
    }

    #[cfg(unix)]
    fn open_unix(path: &Path) -> io::Result<Self> {
        let socket = UnixDatagram::unbound()?;
        if socket.connect(path).is_ok() {
            return Ok(Connection::UnixDatagram(socket));
        }
        UnixStream::connect(path).map(Connection::UnixStream)
    }

    fn open_udp(addr: SocketAddr) -> io::Result<Self> {
        let local: SocketAddr = if addr.is_ipv4() {
            ([0, 0, 0, 0], 0).into()
        } else {
            ([0u16; 8], 0).into()
        };
        let socket = UdpSocket::bind(local)?;
        socket.connect(addr)?;
        Ok(Connection::Udp(socket))
    }

    fn is_local(&self) -> bool {
        match self {
            #[cfg(unix)]
            Connection::UnixDatagram(_) | Connection::UnixStream(_) => true,
            Connection::Udp(_) | Connection::Tcp(_) => false,
        }
    }

    fn send(&mut self, record: &[u8]) -> io::Result<()> {
        match self {
            #[cfg(unix)]
            Connection::UnixDatagram(socket) => socket.send(record).map(|_| ()),
            #[cfg(unix)]
            Connection::UnixStream(stream) => stream.write_all(record),
            Connection::Udp(socket) => socket.send(record).map(|_| ()),
            Connection::Tcp(stream) => stream.write_all(record),
        }
    }

    fn shutdown(self) -> io::Result<()> {
        match self {
            #[cfg(unix)]
            Connection::UnixStream(mut stream) => stream.flush(),
            Connection::Tcp(mut stream) => stream.flush(),
            _ => Ok(()),
        }
    }
}

/// Sends messages to syslog with a fixed priority and tag.
pub struct SyslogLogger {
    info: LoggerInfo,
    priority: SyslogPriority,
    tag: String,
    hostname: String,
    connection: Option<Connection>,
}

impl SyslogLogger {
    /// Connect to the local syslog daemon.
    ///
    /// An empty `tag` is replaced with the program name.
    pub fn new(info: LoggerInfo, priority: SyslogPriority, tag: &str) -> Result<Self> {
        #[cfg(unix)]
        {
            Self::with_connector(info, priority, tag, &SyslogConnector::Local)
        }
        #[cfg(not(unix))]
        {
            let _ = (info, priority, tag);
            Err(LoggerError::syslog_unavailable(
                "no local syslog on this platform; use a network connector",
            ))
        }
    }

    pub fn with_connector(
        info: LoggerInfo,
        priority: SyslogPriority,
        tag: &str,
        connector: &SyslogConnector,
    ) -> Result<Self> {
        let connection = Connection::open(connector)?;
        let tag = if tag.is_empty() {
            program_name()
        } else {
            tag.to_string()
        };

        Ok(Self {
            info,
            priority,
            tag,
            hostname: hostname(),
            connection: Some(connection),
        })
    }

    pub fn priority(&self) -> SyslogPriority {
        self.priority
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    fn record(&self, local: bool, msg: &str) -> String {
        let pid = std::process::id();
        let newline = if msg.ends_with('\n') { "" } else { "\n" };
        if local {
            let stamp = Local::now().format("%b %e %H:%M:%S");
            format!(
                "<{}>{} {}[{}]: {}{}",
                self.priority.value(),
                stamp,
                self.tag,
                pid,
                msg,
                newline
            )
        } else {
            let stamp = Local::now().to_rfc3339_opts(SecondsFormat::Secs, false);
            format!(
                "<{}>{} {} {}[{}]: {}{}",
                self.priority.value(),
                stamp,
                self.hostname,
                self.tag,
                pid,
                msg,
                newline
            )
        }
    }
}

impl Logger for SyslogLogger {
    fn log(&mut self, _level: i32, msg: &str) -> Result<()> {
        let local = match self.connection {
            Some(ref connection) => connection.is_local(),
            None => return Err(LoggerError::closed("syslog")),
        };
        let record = self.record(local, msg);

        if let Some(ref mut connection) = self.connection {
            connection
                .send(record.as_bytes())
                .map_err(|e| LoggerError::write_failed("syslog", e))?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(connection) = self.connection.take() {
            connection.shutdown()?;
        }
        Ok(())
    }

    fn logger_info(&self) -> &LoggerInfo {
        &self.info
    }

    fn name(&self) -> &str {
        "syslog"
    }
}

fn program_name() -> String {
    std::env::args_os()
        .next()
        .and_then(|arg0| {
            std::path::Path::new(&arg0)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

fn hostname() -> String {
    ["/proc/sys/kernel/hostname", "/etc/hostname"]
        .iter()
        .filter_map(|path| std::fs::read_to_string(path).ok())
        .map(|name| name.trim().to_string())
        .find(|name| !name.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}
