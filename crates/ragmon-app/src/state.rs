//! Application state (Model in TEA pattern)
//!
//! One explicit state struct owned by the engine and mutated only by
//! `handler::update()`. No module-level globals.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::confirm::ConfirmDialogState;
use crate::form::FormState;
use crate::log_tail::LogTail;
use crate::notify::NotificationCenter;
use ragmon_core::{FileEntry, ServiceStatus};

/// Current UI mode/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Normal dashboard with form, documents, and log panels
    #[default]
    Dashboard,

    /// Confirmation dialog for a destructive action
    ConfirmDialog,

    /// Upload path prompt
    UploadInput,
}

/// Focusable dashboard panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    ConfigForm,
    Documents,
    Logs,
}

impl Panel {
    pub fn next(self) -> Self {
        match self {
            Panel::ConfigForm => Panel::Documents,
            Panel::Documents => Panel::Logs,
            Panel::Logs => Panel::ConfigForm,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Panel::ConfigForm => Panel::Logs,
            Panel::Documents => Panel::ConfigForm,
            Panel::Logs => Panel::Documents,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pending-action guards
// ─────────────────────────────────────────────────────────────────────────────

/// Identity of a guarded control. One in-flight operation per control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    LoadConfig,
    SaveConfig,
    Optimize,
    RefreshFiles,
    DeleteFile,
    RebuildFile,
    Upload,
    RebuildAll,
    Start,
    Stop,
    Shutdown,
    Status,
}

/// Set of controls with an operation in flight.
///
/// `begin` refuses a second trigger on a busy control; `finish` is called by
/// the completion handler on every exit path, so a control can never stay
/// disabled after its operation ends.
#[derive(Debug, Default)]
pub struct PendingActions {
    in_flight: HashSet<ControlId>,
}

impl PendingActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the guard. Returns false when the control is already busy.
    pub fn begin(&mut self, control: ControlId) -> bool {
        self.in_flight.insert(control)
    }

    /// Release the guard. Idempotent.
    pub fn finish(&mut self, control: ControlId) {
        self.in_flight.remove(&control);
    }

    pub fn is_pending(&self, control: ControlId) -> bool {
        self.in_flight.contains(&control)
    }

    pub fn any(&self) -> bool {
        !self.in_flight.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Service lifecycle
// ─────────────────────────────────────────────────────────────────────────────

/// Chat-service lifecycle as seen by the console.
///
/// `Starting`/`Stopping` are optimistic transition states entered when an
/// operation is dispatched; the authoritative value is always the last
/// status poll, applied via [`ServiceState::apply_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceState {
    /// No successful poll yet (or the last poll failed).
    #[default]
    Unknown,
    Stopped,
    Starting,
    Running,
    Stopping,
}

impl ServiceState {
    /// Start is offered only when the service is not known to be running
    /// and no transition is in progress.
    pub fn can_start(&self) -> bool {
        matches!(self, ServiceState::Unknown | ServiceState::Stopped)
    }

    /// Stop/shutdown are offered only while running.
    pub fn can_stop(&self) -> bool {
        matches!(self, ServiceState::Running)
    }

    pub fn mark_starting(&mut self) {
        *self = ServiceState::Starting;
    }

    pub fn mark_stopping(&mut self) {
        *self = ServiceState::Stopping;
    }

    pub fn mark_unknown(&mut self) {
        *self = ServiceState::Unknown;
    }

    /// Apply an authoritative poll result.
    pub fn apply_status(&mut self, status: ServiceStatus) {
        *self = if status.running {
            ServiceState::Running
        } else {
            ServiceState::Stopped
        };
    }

    /// Header label.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceState::Unknown => "unknown",
            ServiceState::Stopped => "stopped",
            ServiceState::Starting => "starting…",
            ServiceState::Running => "running",
            ServiceState::Stopping => "stopping…",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Upload prompt
// ─────────────────────────────────────────────────────────────────────────────

/// Text buffer of the upload path prompt.
#[derive(Debug, Clone, Default)]
pub struct UploadInputState {
    pub buffer: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// AppState
// ─────────────────────────────────────────────────────────────────────────────

/// Complete console state (the Model).
#[derive(Debug)]
pub struct AppState {
    pub ui_mode: UiMode,
    pub focus: Panel,

    /// The configuration form (declared fields + current values).
    pub form: FormState,

    /// Last reconciled corpus listing. Replaced wholesale on every load.
    pub files: Vec<FileEntry>,
    pub file_cursor: usize,

    pub log_tail: LogTail,
    pub service: ServiceState,
    pub pending: PendingActions,
    pub notices: NotificationCenter,

    /// Present while a destructive action awaits confirmation.
    pub confirm: Option<ConfirmDialogState>,
    /// Present while the upload prompt is open.
    pub upload: Option<UploadInputState>,

    pub settings: Settings,

    /// Last issued status poll, for the periodic re-poll schedule.
    last_status_poll: Option<Instant>,

    quitting: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            ui_mode: UiMode::Dashboard,
            focus: Panel::ConfigForm,
            form: FormState::with_default_fields(),
            files: Vec::new(),
            file_cursor: 0,
            log_tail: LogTail::new(),
            service: ServiceState::Unknown,
            pending: PendingActions::new(),
            notices: NotificationCenter::new(),
            confirm: None,
            upload: None,
            settings,
            last_status_poll: None,
            quitting: false,
        }
    }

    pub fn request_quit(&mut self) {
        self.quitting = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quitting
    }

    /// File entry under the cursor.
    pub fn selected_file(&self) -> Option<&FileEntry> {
        self.files.get(self.file_cursor)
    }

    pub fn select_prev_file(&mut self) {
        if self.file_cursor > 0 {
            self.file_cursor -= 1;
        }
    }

    pub fn select_next_file(&mut self) {
        if self.file_cursor + 1 < self.files.len() {
            self.file_cursor += 1;
        }
    }

    /// Replace the listing with the latest snapshot (reconciliation: no
    /// in-place patching) and keep the cursor in range.
    pub fn reconcile_files(&mut self, files: Vec<FileEntry>) {
        self.files = files;
        if self.file_cursor >= self.files.len() {
            self.file_cursor = self.files.len().saturating_sub(1);
        }
    }

    /// Whether a periodic status poll is due at `now`. Issuing marks the
    /// schedule, so a 50 ms tick stream produces one poll per interval.
    pub fn status_poll_due(&mut self, now: Instant) -> bool {
        let interval = Duration::from_secs(self.settings.server.status_poll_secs);
        let due = match self.last_status_poll {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= interval,
        };
        if due {
            self.last_status_poll = Some(now);
        }
        due
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
