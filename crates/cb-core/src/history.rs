//! Append-only log history with `[HH:MM]` timestamps.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

/// Format a log line stamped with the wall-clock time of `at`.
pub fn stamped_line<Tz>(at: &DateTime<Tz>, text: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("[{}] {text}", at.format("%H:%M"))
}

/// Chronological record of log lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogHistory {
    lines: Vec<String>,
}

impl LogHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp `text` with the current local time, append it, and return the
    /// stored line.
    pub fn record(&mut self, text: &str) -> String {
        self.record_at(&Local::now(), text)
    }

    /// Like [`record`](Self::record) with an explicit timestamp.
    pub fn record_at<Tz>(&mut self, at: &DateTime<Tz>, text: &str) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let line = stamped_line(at, text);
        self.lines.push(line.clone());
        line
    }

    /// All lines, oldest first.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The newest `n` lines, oldest first.
    pub fn recent(&self, n: usize) -> &[String] {
        let start = self.lines.len().saturating_sub(n);
        &self.lines[start..]
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<Vec<String>> for LogHistory {
    fn from(lines: Vec<String>) -> Self {
        Self { lines }
    }
}
