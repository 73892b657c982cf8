//! Severity levels and the console color policy
//!
//! A level is a plain signed integer. Positive values are debug verbosity
//! ranks (1 is the least verbose), negative values in `-5..=-1` are the same
//! ranks rendered bright, and a small ladder of named levels lives well below
//! them so that it always passes verbosity filtering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const LVL_WARNING: i32 = -20;
pub const LVL_ERROR: i32 = -19;
pub const LVL_FATAL: i32 = -18;
pub const LVL_PANIC: i32 = -17;
pub const LVL_INFO: i32 = -16;
pub const LVL_PRINT: i32 = -15;

/// The named rungs of the level ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedLevel {
    Warning,
    Error,
    Fatal,
    Panic,
    Info,
    Print,
}

impl NamedLevel {
    pub const ALL: [NamedLevel; 6] = [
        NamedLevel::Warning,
        NamedLevel::Error,
        NamedLevel::Fatal,
        NamedLevel::Panic,
        NamedLevel::Info,
        NamedLevel::Print,
    ];

    pub fn value(self) -> i32 {
        match self {
            NamedLevel::Warning => LVL_WARNING,
            NamedLevel::Error => LVL_ERROR,
            NamedLevel::Fatal => LVL_FATAL,
            NamedLevel::Panic => LVL_PANIC,
            NamedLevel::Info => LVL_INFO,
            NamedLevel::Print => LVL_PRINT,
        }
    }

    pub fn from_level(level: i32) -> Option<Self> {
        match level {
            LVL_WARNING => Some(NamedLevel::Warning),
            LVL_ERROR => Some(NamedLevel::Error),
            LVL_FATAL => Some(NamedLevel::Fatal),
            LVL_PANIC => Some(NamedLevel::Panic),
            LVL_INFO => Some(NamedLevel::Info),
            LVL_PRINT => Some(NamedLevel::Print),
            _ => None,
        }
    }

    pub fn to_str(self) -> &'static str {
        match self {
            NamedLevel::Warning => "WARNING",
            NamedLevel::Error => "ERROR",
            NamedLevel::Fatal => "FATAL",
            NamedLevel::Panic => "PANIC",
            NamedLevel::Info => "INFO",
            NamedLevel::Print => "PRINT",
        }
    }

    /// One-letter tag used in formatted lines
    pub fn tag(self) -> &'static str {
        match self {
            NamedLevel::Warning => "W",
            NamedLevel::Error => "E",
            NamedLevel::Fatal => "F",
            NamedLevel::Panic => "P",
            NamedLevel::Info | NamedLevel::Print => "I",
        }
    }

    pub fn console_color(self) -> ConsoleColor {
        match self {
            NamedLevel::Print | NamedLevel::Info => ConsoleColor::bright(Hue::White),
            NamedLevel::Warning => ConsoleColor::bright(Hue::Green),
            NamedLevel::Error => ConsoleColor::normal(Hue::Red),
            NamedLevel::Fatal | NamedLevel::Panic => ConsoleColor::bright(Hue::Red),
        }
    }
}

impl fmt::Display for NamedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for NamedLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "WARNING" | "WARN" => Ok(NamedLevel::Warning),
            "ERROR" => Ok(NamedLevel::Error),
            "FATAL" => Ok(NamedLevel::Fatal),
            "PANIC" => Ok(NamedLevel::Panic),
            "INFO" => Ok(NamedLevel::Info),
            "PRINT" => Ok(NamedLevel::Print),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hue {
    White,
    Yellow,
    Cyan,
    Green,
    Blue,
    Red,
}

/// Palette for generic debug levels, indexed by `abs(level) - 1`
pub const DEBUG_PALETTE: [Hue; 5] = [Hue::Yellow, Hue::Cyan, Hue::Green, Hue::Blue, Hue::Cyan];

/// A foreground hue plus its brightness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConsoleColor {
    pub hue: Hue,
    pub bright: bool,
}

impl ConsoleColor {
    pub const fn new(hue: Hue, bright: bool) -> Self {
        Self { hue, bright }
    }

    pub const fn normal(hue: Hue) -> Self {
        Self::new(hue, false)
    }

    pub const fn bright(hue: Hue) -> Self {
        Self::new(hue, true)
    }

    pub fn to_colored(self) -> colored::Color {
        use colored::Color::*;
        match (self.hue, self.bright) {
            (Hue::White, false) => White,
            (Hue::White, true) => BrightWhite,
            (Hue::Yellow, false) => Yellow,
            (Hue::Yellow, true) => BrightYellow,
            (Hue::Cyan, false) => Cyan,
            (Hue::Cyan, true) => BrightCyan,
            (Hue::Green, false) => Green,
            (Hue::Green, true) => BrightGreen,
            (Hue::Blue, false) => Blue,
            (Hue::Blue, true) => BrightBlue,
            (Hue::Red, false) => Red,
            (Hue::Red, true) => BrightRed,
        }
    }

    /// SGR sequence that switches the terminal foreground to this color
    pub fn escape_sequence(self) -> String {
        format!("\x1b[{}m", self.to_colored().to_fg_str())
    }
}

/// SGR sequence that restores the terminal's default attributes
pub const RESET_SEQUENCE: &str = "\x1b[0m";

/// Color the console uses for `level`, or `None` to leave the terminal as is.
pub fn console_color(level: i32) -> Option<ConsoleColor> {
    if let Some(named) = NamedLevel::from_level(level) {
        return Some(named.console_color());
    }
    if level == 0 {
        return None;
    }
    let magnitude = level.unsigned_abs() as usize;
    if magnitude > DEBUG_PALETTE.len() {
        return None;
    }
    Some(ConsoleColor::new(DEBUG_PALETTE[magnitude - 1], level < 0))
}

/// Levels below [`LVL_INFO`] (warnings and worse) belong on stderr.
pub fn uses_error_stream(level: i32) -> bool {
    level < LVL_INFO
}
