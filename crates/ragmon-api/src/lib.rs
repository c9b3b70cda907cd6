//! # ragmon-api - Backend Communication Layer
//!
//! Talks to the RAG backend's control surface on behalf of the console:
//!
//! - [`ControlClient`] - HTTP client for the `/api/*` control endpoints
//!   (config load/save/optimize, corpus management, service lifecycle)
//! - [`protocol`] - response envelope types and the `"success"` status
//!   sentinel handling
//! - [`logs`] - background task tailing the `/ws/logs` push channel and
//!   forwarding lifecycle events + records over an mpsc channel
//!
//! All errors map into `ragmon_core::Error`: transport failures and non-OK
//! HTTP become [`Error::Transport`], well-formed non-success envelopes become
//! [`Error::Api`] carrying the backend's message, and malformed bodies become
//! [`Error::Protocol`].
//!
//! [`Error::Transport`]: ragmon_core::Error::Transport
//! [`Error::Api`]: ragmon_core::Error::Api
//! [`Error::Protocol`]: ragmon_core::Error::Protocol

pub mod client;
pub mod logs;
pub mod protocol;

pub use client::ControlClient;
pub use logs::{spawn_log_stream, LogStreamEvent};
pub use protocol::{
    Ack, ConfigEnvelope, FilesEnvelope, UploadError, UploadReport, STATUS_PARTIAL_SUCCESS,
    STATUS_SUCCESS,
};
