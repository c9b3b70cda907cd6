//! HTTP client for the backend control API.
//!
//! One method per console operation. Every method returns
//! `ragmon_core::Result`: the caller never inspects HTTP status codes or
//! envelope sentinels itself.

use std::path::PathBuf;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use ragmon_core::prelude::*;
use ragmon_core::ServiceStatus;

use crate::protocol::{Ack, ConfigEnvelope, FilesEnvelope, UploadReport};

/// Characters escaped when a file name becomes a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// Request timeout for every control call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the backend's `/api/*` control endpoints.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ControlClient {
    http: reqwest::Client,
    base: Url,
}

impl ControlClient {
    /// Create a client for the given base URL (e.g. `http://127.0.0.1:5000`).
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url)
            .map_err(|e| Error::config(format!("invalid server URL '{base_url}': {e}")))?;
        // Relative joins below need a directory-style base path.
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base })
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// WebSocket URL of the log push channel (`/ws/logs`).
    pub fn logs_ws_url(&self) -> Result<Url> {
        let mut url = self.join("ws/logs")?;
        let scheme = match url.scheme() {
            "https" => "wss",
            _ => "ws",
        };
        url.set_scheme(scheme)
            .map_err(|_| Error::config(format!("cannot derive ws URL from {}", self.base)))?;
        Ok(url)
    }

    fn join(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| Error::config(format!("invalid endpoint '{path}': {e}")))
    }

    fn file_endpoint(&self, name: &str, suffix: &str) -> Result<Url> {
        let encoded = utf8_percent_encode(name, PATH_SEGMENT).to_string();
        self.join(&format!("api/files/{encoded}{suffix}"))
    }

    /// Decode a response into an envelope.
    ///
    /// A body that parses decides the outcome itself (the backend ships its
    /// failure message in the envelope even on 4xx/5xx). A body that does not
    /// parse is a transport error on non-OK status, a protocol error
    /// otherwise.
    async fn read_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;

        match serde_json::from_str::<T>(&body) {
            Ok(envelope) => Ok(envelope),
            Err(_) if !status.is_success() => Err(Error::transport(format!("HTTP {status}"))),
            Err(e) => Err(Error::protocol(format!("unexpected response body: {e}"))),
        }
    }

    async fn get_envelope<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.join(path)?;
        debug!("GET {}", url);
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        Self::read_envelope(resp).await
    }

    async fn post_envelope<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.join(path)?;
        debug!("POST {}", url);
        let resp = self
            .http
            .post(url)
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        Self::read_envelope(resp).await
    }

    // ── Configuration ──────────────────────────────────────────────────────

    /// `GET /api/config` -> the nested configuration tree.
    pub async fn fetch_config(&self) -> Result<Value> {
        let envelope: ConfigEnvelope = self.get_envelope("api/config").await?;
        envelope.into_config("Could not load configuration")
    }

    /// `POST /api/config` with the collected configuration tree.
    pub async fn save_config(&self, config: &Value) -> Result<Option<String>> {
        let url = self.join("api/config")?;
        debug!("POST {}", url);
        let resp = self
            .http
            .post(url)
            .json(config)
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        let ack: Ack = Self::read_envelope(resp).await?;
        ack.accept("Could not save configuration")
    }

    /// `GET /api/config/optimize` -- ask the backend to tune its own
    /// parameters. The caller reloads the config afterwards.
    pub async fn optimize_config(&self) -> Result<Option<String>> {
        let ack: Ack = self.get_envelope("api/config/optimize").await?;
        ack.accept("Could not optimize parameters")
    }

    // ── Corpus ─────────────────────────────────────────────────────────────

    /// `GET /api/files` -> the authoritative corpus listing.
    pub async fn list_files(&self) -> Result<Vec<ragmon_core::FileEntry>> {
        let envelope: FilesEnvelope = self.get_envelope("api/files").await?;
        envelope.into_files("Could not fetch the file list")
    }

    /// `DELETE /api/files/{name}`.
    pub async fn delete_file(&self, name: &str) -> Result<Option<String>> {
        let url = self.file_endpoint(name, "")?;
        debug!("DELETE {}", url);
        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        let ack: Ack = Self::read_envelope(resp).await?;
        ack.accept("Could not delete the file")
    }

    /// `POST /api/files/{name}/rebuild` -- re-embed one document.
    pub async fn rebuild_file(&self, name: &str) -> Result<Option<String>> {
        let url = self.file_endpoint(name, "/rebuild")?;
        debug!("POST {}", url);
        let resp = self
            .http
            .post(url)
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        let ack: Ack = Self::read_envelope(resp).await?;
        ack.accept("Could not rebuild embeddings")
    }

    /// `POST /api/files/rebuild-all` -- re-embed the whole corpus.
    pub async fn rebuild_all(&self) -> Result<Option<String>> {
        let ack: Ack = self.post_envelope("api/files/rebuild-all").await?;
        ack.accept("Could not rebuild embeddings")
    }

    /// `POST /api/files/upload` (multipart).
    ///
    /// Reads each local path and ships it as one `files` part, plus the
    /// `overwrite` form field. The returned report may be a partial success;
    /// the caller decides how to present it.
    pub async fn upload_files(&self, paths: &[PathBuf], overwrite: bool) -> Result<UploadReport> {
        let mut form = Form::new().text("overwrite", if overwrite { "true" } else { "false" });

        for path in paths {
            let bytes = tokio::fs::read(path).await?;
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unnamed")
                .to_string();
            form = form.part("files", Part::bytes(bytes).file_name(file_name));
        }

        let url = self.join("api/files/upload")?;
        debug!("POST {} ({} file(s))", url, paths.len());
        let resp = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        Self::read_envelope(resp).await
    }

    // ── Service lifecycle ──────────────────────────────────────────────────

    /// `POST /api/app/start`.
    pub async fn start_app(&self) -> Result<Option<String>> {
        let ack: Ack = self.post_envelope("api/app/start").await?;
        ack.accept("Could not start the service")
    }

    /// `POST /api/app/stop`.
    pub async fn stop_app(&self) -> Result<Option<String>> {
        let ack: Ack = self.post_envelope("api/app/stop").await?;
        ack.accept("Could not stop the service")
    }

    /// `POST /api/app/shutdown` -- terminate the whole backend process.
    pub async fn shutdown_app(&self) -> Result<Option<String>> {
        let ack: Ack = self.post_envelope("api/app/shutdown").await?;
        ack.accept("Could not shut down the backend")
    }

    /// `GET /api/app/status` -> `{running}`. No envelope on this endpoint.
    pub async fn fetch_status(&self) -> Result<ServiceStatus> {
        let url = self.join("api/app/status")?;
        debug!("GET {}", url);
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(Error::transport(format!("HTTP {}", resp.status())));
        }
        resp.json::<ServiceStatus>()
            .await
            .map_err(|e| Error::protocol(format!("unexpected status body: {e}")))
    }
}
