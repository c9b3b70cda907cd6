//! # Operational Domain Types
//!
//! Shared vocabulary between `ragmon-api` (parsing backend responses) and
//! `ragmon-app` (console state): log records, document listings, service
//! status, and the ring buffer backing the log tail.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Capacity of the operations log tail. Insertion beyond this evicts the
/// oldest record (FIFO).
pub const LOG_BUFFER_CAPACITY: usize = 100;

// ── LogLevel ─────────────────────────────────────────────────────────────────

/// Severity of a backend log record.
///
/// The wire format is a free-form uppercase string (Python logging levels);
/// unknown values parse as `Info` rather than failing the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Canonical uppercase label used on the wire and in the log view.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }

    /// Permissive parse: `WARN`/`WARNING` fold together, `CRITICAL` maps to
    /// `Error`, anything unrecognized maps to `Info`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" | "TRACE" => LogLevel::Debug,
            "WARN" | "WARNING" => LogLevel::Warn,
            "ERROR" | "CRITICAL" | "FATAL" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

impl From<String> for LogLevel {
    fn from(s: String) -> Self {
        LogLevel::parse(&s)
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── LogRecord ────────────────────────────────────────────────────────────────

/// A single log line pushed by the backend over the log channel.
///
/// Ordered by arrival, not necessarily by timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// ISO-8601 timestamp as supplied by the backend.
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

impl LogRecord {
    /// Create a record stamped with the current local time.
    ///
    /// Used for synthetic channel-lifecycle records; real records carry the
    /// backend's own timestamp.
    pub fn now(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            level,
            message: message.into(),
        }
    }
}

// ── SplitterMethod ───────────────────────────────────────────────────────────

/// Chunking method a document was indexed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitterMethod {
    Words,
    Sentences,
    Paragraphs,
    #[default]
    #[serde(other)]
    Unknown,
}

impl SplitterMethod {
    /// Human label for the documents table.
    pub fn label(&self) -> &'static str {
        match self {
            SplitterMethod::Words => "by words",
            SplitterMethod::Sentences => "by sentences",
            SplitterMethod::Paragraphs => "by paragraphs",
            SplitterMethod::Unknown => "unknown",
        }
    }
}

// ── FileEntry ────────────────────────────────────────────────────────────────

/// One ingested document as reported by `GET /api/files`.
///
/// `name` is the unique key. Entries are never patched in place: any mutating
/// action is followed by a full re-listing and the displayed table is rebuilt
/// from that snapshot.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FileEntry {
    pub name: String,

    /// Pre-formatted size string (e.g. "1.2 MB"). Empty when the backend
    /// omitted it.
    #[serde(default)]
    pub size: String,

    /// Pre-formatted modification date. Empty when omitted.
    #[serde(default)]
    pub modified: String,

    #[serde(default)]
    pub splitter_method: SplitterMethod,
}

// ── ServiceStatus ────────────────────────────────────────────────────────────

/// Result of `GET /api/app/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ServiceStatus {
    #[serde(default)]
    pub running: bool,
}

// ── RingBuffer<T> ────────────────────────────────────────────────────────────

/// A fixed-capacity circular buffer that overwrites the oldest entries
/// when full. Backs the log tail's bounded history.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    buf: VecDeque<T>,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    /// Create a new ring buffer with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a value, evicting the oldest if at capacity.
    pub fn push(&mut self, value: T) {
        if self.buf.len() == self.capacity {
            self.buf.pop_front();
        }
        self.buf.push_back(value);
    }

    /// Number of items currently stored.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Maximum capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate over items from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    /// Get the most recently pushed item.
    pub fn latest(&self) -> Option<&T> {
        self.buf.back()
    }

    /// Get the oldest item.
    pub fn oldest(&self) -> Option<&T> {
        self.buf.front()
    }

    /// Clear all items.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── LogLevel ────────────────────────────────────

    #[test]
    fn test_log_level_parse_known() {
        assert_eq!(LogLevel::parse("INFO"), LogLevel::Info);
        assert_eq!(LogLevel::parse("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::parse("WARNING"), LogLevel::Warn);
        assert_eq!(LogLevel::parse("WARN"), LogLevel::Warn);
        assert_eq!(LogLevel::parse("ERROR"), LogLevel::Error);
        assert_eq!(LogLevel::parse("CRITICAL"), LogLevel::Error);
    }

    #[test]
    fn test_log_level_parse_is_case_insensitive() {
        assert_eq!(LogLevel::parse("info"), LogLevel::Info);
        assert_eq!(LogLevel::parse("Warning"), LogLevel::Warn);
    }

    #[test]
    fn test_log_level_parse_unknown_maps_to_info() {
        assert_eq!(LogLevel::parse("NOTICE"), LogLevel::Info);
        assert_eq!(LogLevel::parse(""), LogLevel::Info);
    }

    #[test]
    fn test_log_record_deserializes_wire_shape() {
        let json = r#"{"timestamp":"2024-05-01 10:22:03","level":"WARNING","message":"slow query"}"#;
        let rec: LogRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.level, LogLevel::Warn);
        assert_eq!(rec.message, "slow query");
    }

    // ── SplitterMethod / FileEntry ──────────────────

    #[test]
    fn test_splitter_method_unknown_fallback() {
        let entry: FileEntry = serde_json::from_str(
            r#"{"name":"report.pdf","size":"1.2 MB","modified":"2024-05-01","splitter_method":"semantic"}"#,
        )
        .unwrap();
        assert_eq!(entry.splitter_method, SplitterMethod::Unknown);
    }

    #[test]
    fn test_file_entry_missing_fields_default() {
        let entry: FileEntry = serde_json::from_str(r#"{"name":"notes.txt"}"#).unwrap();
        assert_eq!(entry.name, "notes.txt");
        assert!(entry.size.is_empty());
        assert_eq!(entry.splitter_method, SplitterMethod::Unknown);
    }

    // ── RingBuffer ──────────────────────────────────

    #[test]
    fn test_ring_buffer_push_and_len() {
        let mut rb = RingBuffer::new(3);
        rb.push(1);
        rb.push(2);
        assert_eq!(rb.len(), 2);
        assert_eq!(rb.latest(), Some(&2));
        assert_eq!(rb.oldest(), Some(&1));
    }

    #[test]
    fn test_ring_buffer_evicts_oldest_at_capacity() {
        let mut rb = RingBuffer::new(3);
        for i in 0..5 {
            rb.push(i);
        }
        assert_eq!(rb.len(), 3);
        let items: Vec<_> = rb.iter().copied().collect();
        assert_eq!(items, vec![2, 3, 4]);
    }

    #[test]
    fn test_ring_buffer_stays_bounded_after_many_pushes() {
        let mut rb = RingBuffer::new(LOG_BUFFER_CAPACITY);
        for i in 0..250 {
            rb.push(i);
        }
        assert_eq!(rb.len(), LOG_BUFFER_CAPACITY);
        assert_eq!(rb.oldest(), Some(&150));
        assert_eq!(rb.latest(), Some(&249));
    }

    #[test]
    fn test_ring_buffer_clear() {
        let mut rb = RingBuffer::new(2);
        rb.push("a");
        rb.clear();
        assert!(rb.is_empty());
        assert_eq!(rb.capacity(), 2);
    }
}
