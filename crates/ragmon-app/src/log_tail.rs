//! Bounded live tail of the backend's operational log.
//!
//! Owns the one [`RingBuffer`] of [`LogRecord`]s (capacity
//! [`LOG_BUFFER_CAPACITY`]) and the push-channel connection state. The tail
//! only reacts to lifecycle callbacks -- reconnection and backoff live in the
//! channel task (`ragmon_api::logs`), not here.

use ragmon_core::{LogLevel, LogRecord, RingBuffer, LOG_BUFFER_CAPACITY};

/// Connection state of the log push channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelState {
    #[default]
    Connecting,
    Connected,
    Disconnected,
    Errored,
}

impl ChannelState {
    /// Short label for the header indicator.
    pub fn label(&self) -> &'static str {
        match self {
            ChannelState::Connecting => "connecting",
            ChannelState::Connected => "live",
            ChannelState::Disconnected => "disconnected",
            ChannelState::Errored => "error",
        }
    }
}

/// Bounded, arrival-ordered log tail plus channel state and scroll pinning.
#[derive(Debug)]
pub struct LogTail {
    buffer: RingBuffer<LogRecord>,
    channel: ChannelState,
    /// When set, the view follows the newest record. Any append re-pins;
    /// manual scrolling up unpins.
    stick_to_latest: bool,
    /// Lines scrolled up from the end while unpinned.
    scroll_back: usize,
}

impl Default for LogTail {
    fn default() -> Self {
        Self::new()
    }
}

impl LogTail {
    pub fn new() -> Self {
        Self {
            buffer: RingBuffer::new(LOG_BUFFER_CAPACITY),
            channel: ChannelState::Connecting,
            stick_to_latest: true,
            scroll_back: 0,
        }
    }

    pub fn channel(&self) -> ChannelState {
        self.channel
    }

    pub fn records(&self) -> impl Iterator<Item = &LogRecord> {
        self.buffer.iter()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn latest(&self) -> Option<&LogRecord> {
        self.buffer.latest()
    }

    pub fn is_pinned(&self) -> bool {
        self.stick_to_latest
    }

    pub fn scroll_back(&self) -> usize {
        self.scroll_back
    }

    // ── Channel lifecycle ──────────────────────────────────────────────────

    /// Channel established. Appends a synthetic INFO record.
    /// Returns the previous state so the caller can report transitions.
    pub fn on_open(&mut self) -> ChannelState {
        let previous = self.channel;
        self.channel = ChannelState::Connected;
        self.append(LogRecord::now(LogLevel::Info, "Log channel connected"));
        previous
    }

    /// One record pushed by the backend.
    pub fn on_message(&mut self, record: LogRecord) {
        self.append(record);
    }

    /// Channel closed. Appends a synthetic ERROR record.
    pub fn on_close(&mut self) -> ChannelState {
        let previous = self.channel;
        self.channel = ChannelState::Disconnected;
        self.append(LogRecord::now(LogLevel::Error, "Log channel disconnected"));
        previous
    }

    /// Channel failed. Appends a synthetic ERROR record carrying the detail.
    pub fn on_error(&mut self, detail: &str) -> ChannelState {
        let previous = self.channel;
        self.channel = ChannelState::Errored;
        self.append(LogRecord::now(
            LogLevel::Error,
            format!("Log channel error: {detail}"),
        ));
        previous
    }

    // ── Scrolling ──────────────────────────────────────────────────────────

    pub fn scroll_up(&mut self) {
        self.stick_to_latest = false;
        self.scroll_back = (self.scroll_back + 1).min(self.buffer.len().saturating_sub(1));
    }

    pub fn scroll_down(&mut self) {
        if self.scroll_back <= 1 {
            self.scroll_to_latest();
        } else {
            self.scroll_back -= 1;
        }
    }

    pub fn scroll_to_latest(&mut self) {
        self.stick_to_latest = true;
        self.scroll_back = 0;
    }

    /// Every append pins the view back to the newest entry.
    fn append(&mut self, record: LogRecord) {
        self.buffer.push(record);
        self.scroll_to_latest();
    }
}
