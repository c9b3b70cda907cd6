//! Message types for the application (TEA pattern)

use std::path::PathBuf;

use serde_json::Value;

use crate::input_key::InputKey;
use ragmon_core::{FileEntry, LogRecord, ServiceStatus};

/// Outcome of an accepted upload (full or partial success).
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    /// True when the backend reported `partial_success`.
    pub partial: bool,
    /// Operator-facing summary, per-file errors appended.
    pub summary: String,
}

/// All possible messages/actions in the application.
///
/// Completion messages carry `Result<_, String>` where the `Err` string is
/// the final operator-facing text (the backend's message when it sent one,
/// a generic fallback otherwise).
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates (notice expiry, status re-poll)
    Tick,

    /// Quit the console
    Quit,

    // ─────────────────────────────────────────────────────────
    // Panel Navigation
    // ─────────────────────────────────────────────────────────
    /// Focus the next dashboard panel
    NextPanel,
    /// Focus the previous dashboard panel
    PrevPanel,

    // ─────────────────────────────────────────────────────────
    // Config Form
    // ─────────────────────────────────────────────────────────
    /// Move form cursor up
    FormUp,
    /// Move form cursor down
    FormDown,
    /// Toggle checkbox / open edit buffer on the selected field
    FormActivate,
    /// Character input into the active edit buffer
    FormInput(char),
    /// Backspace in the active edit buffer
    FormBackspace,
    /// Commit the active edit buffer
    FormCommit,
    /// Discard the active edit buffer
    FormCancel,

    // ─────────────────────────────────────────────────────────
    // Documents Table
    // ─────────────────────────────────────────────────────────
    /// Move file cursor up
    FileUp,
    /// Move file cursor down
    FileDown,

    // ─────────────────────────────────────────────────────────
    // Log View
    // ─────────────────────────────────────────────────────────
    /// Scroll log view up one line (unpins from newest)
    LogScrollUp,
    /// Scroll log view down one line
    LogScrollDown,
    /// Jump back to the newest record
    LogScrollToEnd,

    // ─────────────────────────────────────────────────────────
    // Action Triggers
    // ─────────────────────────────────────────────────────────
    /// Reload the configuration from the backend
    LoadConfig,
    /// Collect the form and save it to the backend
    SaveConfig,
    /// Ask the backend to tune its own parameters
    OptimizeConfig,
    /// Re-fetch the corpus listing
    RefreshFiles,
    /// Delete the file under the cursor (confirmation-gated)
    DeleteSelectedFile,
    /// Rebuild embeddings for the file under the cursor (confirmation-gated)
    RebuildSelectedFile,
    /// Rebuild embeddings for the whole corpus (confirmation-gated)
    RebuildAll,
    /// Start the chat service (confirmation-gated)
    StartService,
    /// Stop the chat service (confirmation-gated)
    StopService,
    /// Shut down the backend process (confirmation-gated)
    ShutdownBackend,
    /// Poll `/api/app/status`
    PollStatus,

    // ─────────────────────────────────────────────────────────
    // Upload Prompt
    // ─────────────────────────────────────────────────────────
    /// Open the upload path prompt
    PromptUpload,
    /// Character input into the upload prompt
    UploadInput(char),
    /// Backspace in the upload prompt
    UploadBackspace,
    /// Submit the upload prompt (leads to the overwrite confirmation)
    UploadSubmit,
    /// Close the upload prompt without uploading
    UploadCancel,

    // ─────────────────────────────────────────────────────────
    // Confirmation Dialog
    // ─────────────────────────────────────────────────────────
    /// Operator confirmed the pending destructive action
    Confirm,
    /// Operator declined the pending destructive action
    CancelConfirm,

    // ─────────────────────────────────────────────────────────
    // Completions (one per dispatched operation, on every exit path)
    // ─────────────────────────────────────────────────────────
    ConfigLoaded {
        result: Result<Value, String>,
    },
    ConfigSaved {
        result: Result<Option<String>, String>,
    },
    ConfigOptimized {
        result: Result<Option<String>, String>,
    },
    FilesLoaded {
        result: Result<Vec<FileEntry>, String>,
    },
    FileDeleted {
        name: String,
        result: Result<Option<String>, String>,
    },
    FileRebuilt {
        name: String,
        result: Result<Option<String>, String>,
    },
    UploadFinished {
        result: Result<UploadOutcome, String>,
    },
    AllRebuilt {
        result: Result<Option<String>, String>,
    },
    ServiceStarted {
        result: Result<Option<String>, String>,
    },
    ServiceStopped {
        result: Result<Option<String>, String>,
    },
    BackendShutdown {
        result: Result<Option<String>, String>,
    },
    StatusPolled {
        result: Result<ServiceStatus, String>,
    },

    // ─────────────────────────────────────────────────────────
    // Log Push Channel
    // ─────────────────────────────────────────────────────────
    /// Channel established
    LogChannelOpened,
    /// One record pushed by the backend
    LogRecordPushed { record: LogRecord },
    /// Channel closed
    LogChannelClosed,
    /// Channel failed
    LogChannelErrored { detail: String },
}

/// Paths entered into the upload prompt, space-separated.
pub fn parse_upload_paths(buffer: &str) -> Vec<PathBuf> {
    buffer.split_whitespace().map(PathBuf::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upload_paths() {
        let paths = parse_upload_paths("  /data/a.pdf   notes.txt ");
        assert_eq!(paths, vec![PathBuf::from("/data/a.pdf"), PathBuf::from("notes.txt")]);
        assert!(parse_upload_paths("   ").is_empty());
    }
}
