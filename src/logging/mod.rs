//! Structured JSON logging
//!
//! This module provides the [`Logger`] for controlling output verbosity and emitting
//! one JSON object per line with `timestamp` (RFC3339), `level` and `msg` fields.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::io::{self, Write};

/// Log severity, rendered upper-case in the `level` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }

    /// ERROR lines go to stderr, everything else to stdout
    pub fn uses_stderr(&self) -> bool {
        matches!(self, Level::Error)
    }
}

/// A single log line
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry<'a> {
    pub timestamp: String,
    pub level: &'static str,
    #[serde(rename = "msg")]
    pub message: &'a str,
}

impl<'a> LogEntry<'a> {
    pub fn new(level: Level, message: &'a str, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at.to_rfc3339_opts(SecondsFormat::Secs, true),
            level: level.as_str(),
            message,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Logger responsible for all user-visible output
#[derive(Debug, Clone)]
pub struct Logger {
    pub verbose: bool,
    pub quiet: bool,
}

impl Logger {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            quiet: false,
        }
    }

    /// Logger that drops everything except errors. Used by tests.
    pub fn new_quiet() -> Self {
        Self {
            verbose: false,
            quiet: true,
        }
    }

    pub fn debug(&self, message: &str) {
        if self.verbose && !self.quiet {
            self.emit(Level::Debug, message);
        }
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.emit(Level::Info, message);
        }
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            self.emit(Level::Warn, message);
        }
    }

    /// Errors always go to stderr, even in quiet mode
    pub fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }

    fn emit(&self, level: Level, message: &str) {
        let at = Utc::now();
        let result = if level.uses_stderr() {
            write_entry(&mut io::stderr().lock(), level, message, at)
        } else {
            write_entry(&mut io::stdout().lock(), level, message, at)
        };

        match result {
            Ok(()) => {}
            // Reader went away (e.g. piped into `head`)
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
            Err(e) => eprintln!("Failed to write log entry: {}", e),
        }
    }
}

/// Serialize one entry as a JSON line into `out`
pub fn write_entry<W: Write>(
    out: &mut W,
    level: Level,
    message: &str,
    at: DateTime<Utc>,
) -> io::Result<()> {
    let line = LogEntry::new(level, message, at).to_json()?;
    writeln!(out, "{}", line)
}

pub const BYTES_PER_GB: f64 = 1_073_741_824.0;

/// Format a byte count as gigabytes with two decimals
pub fn format_gb(bytes: u64) -> String {
    format!("{:.2} GB", bytes as f64 / BYTES_PER_GB)
}
