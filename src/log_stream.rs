//! Running mission log
//!
//! Append-only sequence of text lines. Entry ids are the append order and
//! stay monotonic even if the stream is cleared between missions.

use std::fmt;

/// Where a log line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// Generated by the console itself (startup, decode warnings, transport)
    Console,
    /// `log` frame received from the pipeline
    Remote,
}

/// Single immutable log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Monotonic sequence number (append order)
    pub seq: u64,
    pub kind: LogKind,
    pub text: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LogKind::Console => f.write_str(&self.text),
            LogKind::Remote => write!(f, "> {}", self.text),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogStream {
    entries: Vec<LogEntry>,
    next_seq: u64,
}

impl LogStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line, returns its sequence number
    pub fn append(&mut self, kind: LogKind, text: impl Into<String>) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(LogEntry {
            seq,
            kind,
            text: text.into(),
        });
        seq
    }

    pub fn console(&mut self, text: impl Into<String>) -> u64 {
        self.append(LogKind::Console, text)
    }

    pub fn remote(&mut self, text: impl Into<String>) -> u64 {
        self.append(LogKind::Remote, text)
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries appended at or after `seq`
    pub fn since(&self, seq: u64) -> &[LogEntry] {
        let start = self.entries.partition_point(|e| e.seq < seq);
        &self.entries[start..]
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Drop every entry; sequence numbers keep counting
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }
}
