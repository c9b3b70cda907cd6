//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes

pub(crate) mod keys;
pub(crate) mod update;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use serde_json::Value;

// Re-export main entry point
pub use update::update;

/// Actions that the event loop should perform after update.
///
/// Each variant maps to one spawned background task that issues the backend
/// call and sends exactly one completion [`Message`](crate::message::Message)
/// on every exit path -- that message is what releases the control's pending
/// guard.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// `GET /api/config`, completes with `ConfigLoaded`
    LoadConfig,

    /// `POST /api/config`, completes with `ConfigSaved`
    SaveConfig { config: Value },

    /// `GET /api/config/optimize`, completes with `ConfigOptimized`
    OptimizeConfig,

    /// `GET /api/files`, completes with `FilesLoaded`
    FetchFiles,

    /// `DELETE /api/files/{name}`, completes with `FileDeleted`
    DeleteFile { name: String },

    /// `POST /api/files/{name}/rebuild`, completes with `FileRebuilt`
    RebuildFile { name: String },

    /// `POST /api/files/upload`, completes with `UploadFinished`
    UploadFiles { paths: Vec<PathBuf>, overwrite: bool },

    /// `POST /api/files/rebuild-all`, completes with `AllRebuilt`
    RebuildAll,

    /// `POST /api/app/start`, completes with `ServiceStarted`
    StartService,

    /// `POST /api/app/stop`, completes with `ServiceStopped`
    StopService,

    /// `POST /api/app/shutdown`, completes with `BackendShutdown`
    ShutdownBackend,

    /// `GET /api/app/status`, completes with `StatusPolled`
    PollStatus,

    /// Open the chat UI in the system browser. Fire-and-forget OS call.
    OpenChatViewer { url: String },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<crate::message::Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: crate::message::Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }

    pub fn message_and_action(msg: crate::message::Message, action: UpdateAction) -> Self {
        Self {
            message: Some(msg),
            action: Some(action),
        }
    }
}
