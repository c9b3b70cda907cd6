//! Response envelopes for the backend control API.
//!
//! Every endpoint wraps its payload in a `status` envelope. The literal
//! [`STATUS_SUCCESS`] is the happy-path sentinel; any other value is a
//! failure, except uploads where [`STATUS_PARTIAL_SUCCESS`] reports a
//! qualified success with an itemized per-file error list.

use serde::Deserialize;
use serde_json::Value;

use ragmon_core::prelude::*;
use ragmon_core::FileEntry;

/// Sentinel status marking a well-formed success response.
pub const STATUS_SUCCESS: &str = "success";

/// Upload-only sentinel: some files processed, some failed.
pub const STATUS_PARTIAL_SUCCESS: &str = "partial_success";

// ── Ack ──────────────────────────────────────────────────────────────────────

/// Minimal envelope for endpoints that return no payload:
/// `{status, message?}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl Ack {
    /// Convert into a result, using `fallback` when a failing envelope
    /// carries no message of its own.
    ///
    /// `Ok` carries the optional backend message for the success
    /// notification.
    pub fn accept(self, fallback: &str) -> Result<Option<String>> {
        if self.status == STATUS_SUCCESS {
            Ok(self.message)
        } else {
            Err(Error::api(self.message.unwrap_or_else(|| fallback.to_string())))
        }
    }
}

// ── Config ───────────────────────────────────────────────────────────────────

/// Envelope of `GET /api/config`: `{status, config?, message?}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigEnvelope {
    pub status: String,
    #[serde(default)]
    pub config: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ConfigEnvelope {
    /// Extract the configuration tree or the backend's failure message.
    pub fn into_config(self, fallback: &str) -> Result<Value> {
        if self.status == STATUS_SUCCESS {
            self.config
                .ok_or_else(|| Error::protocol("success envelope without config payload"))
        } else {
            Err(Error::api(self.message.unwrap_or_else(|| fallback.to_string())))
        }
    }
}

// ── Files ────────────────────────────────────────────────────────────────────

/// Envelope of `GET /api/files`: `{status, files, message?}`.
#[derive(Debug, Clone, Deserialize)]
pub struct FilesEnvelope {
    pub status: String,
    #[serde(default)]
    pub files: Vec<FileEntry>,
    #[serde(default)]
    pub message: Option<String>,
}

impl FilesEnvelope {
    /// Extract the listing, dropping entries without a name (the backend
    /// skips malformed rows the same way).
    pub fn into_files(self, fallback: &str) -> Result<Vec<FileEntry>> {
        if self.status == STATUS_SUCCESS {
            Ok(self
                .files
                .into_iter()
                .filter(|f| !f.name.is_empty())
                .collect())
        } else {
            Err(Error::api(self.message.unwrap_or_else(|| fallback.to_string())))
        }
    }
}

// ── Upload ───────────────────────────────────────────────────────────────────

/// Per-file failure inside an upload report.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadError {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub error: String,
}

/// Envelope of `POST /api/files/upload`:
/// `{status: success|partial_success|error, message?, errors?}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadReport {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<UploadError>,
}

impl UploadReport {
    /// Fully successful: every file processed.
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Qualified success: some files processed, `errors` itemizes the rest.
    pub fn is_partial(&self) -> bool {
        self.status == STATUS_PARTIAL_SUCCESS
    }

    /// Either success sentinel. Anything else is a plain failure.
    pub fn is_accepted(&self) -> bool {
        self.is_success() || self.is_partial()
    }

    /// Operator-facing summary: the backend message with the per-file error
    /// list appended when present.
    pub fn summary(&self, fallback: &str) -> String {
        let mut text = self
            .message
            .clone()
            .unwrap_or_else(|| fallback.to_string());
        if !self.errors.is_empty() {
            let details: Vec<String> = self
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.filename, e.error))
                .collect();
            text.push_str(&format!(". Errors: {}", details.join(", ")));
        }
        text
    }
}
