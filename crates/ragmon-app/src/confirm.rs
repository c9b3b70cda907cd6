//! Confirmation gate for destructive actions.
//!
//! Data model only; the rendering widget lives in ragmon-tui. A destructive
//! trigger parks its control id and dispatch-ready action here. Confirming
//! acquires the pending guard and releases the action to the event loop;
//! declining drops it with a neutral notice and no network call.

use crate::handler::UpdateAction;
use crate::state::ControlId;

#[derive(Debug, Clone)]
pub struct ConfirmDialogState {
    pub title: String,
    pub message: String,
    /// Control to guard when the operator confirms.
    pub control: ControlId,
    /// The action to dispatch on confirmation.
    pub action: UpdateAction,
    /// Neutral notice shown when the operator declines.
    pub cancel_notice: String,
}

impl ConfirmDialogState {
    /// Create a generic confirmation dialog
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        control: ControlId,
        action: UpdateAction,
        cancel_notice: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            control,
            action,
            cancel_notice: cancel_notice.into(),
        }
    }

    pub fn delete_file(name: &str) -> Self {
        Self::new(
            "Delete file?",
            format!("Really delete \"{name}\" from the corpus?"),
            ControlId::DeleteFile,
            UpdateAction::DeleteFile {
                name: name.to_string(),
            },
            "Deletion cancelled",
        )
    }

    pub fn rebuild_file(name: &str) -> Self {
        Self::new(
            "Rebuild embeddings?",
            format!("Rebuild embeddings for \"{name}\"?"),
            ControlId::RebuildFile,
            UpdateAction::RebuildFile {
                name: name.to_string(),
            },
            "Rebuild cancelled",
        )
    }

    pub fn rebuild_all() -> Self {
        Self::new(
            "Rebuild all embeddings?",
            "Rebuild embeddings for every file? This can take a while.",
            ControlId::RebuildAll,
            UpdateAction::RebuildAll,
            "Rebuild cancelled",
        )
    }

    pub fn start_service() -> Self {
        Self::new(
            "Start service?",
            "Start the chat service?",
            ControlId::Start,
            UpdateAction::StartService,
            "Start cancelled",
        )
    }

    pub fn stop_service() -> Self {
        Self::new(
            "Stop service?",
            "Stop the chat service?",
            ControlId::Stop,
            UpdateAction::StopService,
            "Stop cancelled",
        )
    }

    pub fn shutdown_backend() -> Self {
        Self::new(
            "Shut down backend?",
            "Shut down the whole backend process?",
            ControlId::Shutdown,
            UpdateAction::ShutdownBackend,
            "Shutdown cancelled",
        )
    }

    pub fn upload_overwrite(paths: Vec<std::path::PathBuf>) -> Self {
        let count = paths.len();
        Self::new(
            "Overwrite files?",
            format!("Overwrite existing files if present? ({count} file(s) selected)"),
            ControlId::Upload,
            UpdateAction::UploadFiles {
                paths,
                overwrite: true,
            },
            "Upload cancelled",
        )
    }
}
