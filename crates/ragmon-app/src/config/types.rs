//! Configuration types for the console
//!
//! Defines `Settings` (ragmon.toml) and its sections. Every field has a
//! serde default so a partial or missing file still yields a usable value.

use serde::{Deserialize, Serialize};

/// Console settings (`ragmon.toml`)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Where the backend lives and how often to re-poll its status.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    /// Base URL of the backend control API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// URL of the chat UI opened after a successful service start.
    #[serde(default = "default_chat_url")]
    pub chat_url: String,

    /// Seconds between periodic status polls.
    #[serde(default = "default_status_poll_secs")]
    pub status_poll_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            chat_url: default_chat_url(),
            status_poll_secs: default_status_poll_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_chat_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_status_poll_secs() -> u64 {
    15
}

/// UI behavior knobs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiSettings {
    /// When false, destructive actions skip the confirmation dialog.
    #[serde(default = "default_true")]
    pub confirm_destructive: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            confirm_destructive: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}
