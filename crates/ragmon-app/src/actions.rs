//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every network action spawns one tokio task that performs the call and
//! sends exactly one completion message back into the event loop -- on the
//! success path, the application-error path, and the transport-error path
//! alike. The completion handler owns the guard release, so the release is
//! tied to the task's single exit point rather than duplicated per branch.

use std::process::Command;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::message::{Message, UploadOutcome};
use crate::UpdateAction;
use ragmon_api::ControlClient;

/// Execute an action by spawning a background task
pub fn handle_action(action: UpdateAction, client: ControlClient, msg_tx: mpsc::Sender<Message>) {
    match action {
        UpdateAction::LoadConfig => {
            tokio::spawn(async move {
                let result = client.fetch_config().await.map_err(|e| e.notice_text());
                let _ = msg_tx.send(Message::ConfigLoaded { result }).await;
            });
        }

        UpdateAction::SaveConfig { config } => {
            tokio::spawn(async move {
                let result = client
                    .save_config(&config)
                    .await
                    .map_err(|e| e.notice_text());
                let _ = msg_tx.send(Message::ConfigSaved { result }).await;
            });
        }

        UpdateAction::OptimizeConfig => {
            tokio::spawn(async move {
                let result = client.optimize_config().await.map_err(|e| e.notice_text());
                let _ = msg_tx.send(Message::ConfigOptimized { result }).await;
            });
        }

        UpdateAction::FetchFiles => {
            tokio::spawn(async move {
                let result = client.list_files().await.map_err(|e| e.notice_text());
                let _ = msg_tx.send(Message::FilesLoaded { result }).await;
            });
        }

        UpdateAction::DeleteFile { name } => {
            tokio::spawn(async move {
                let result = client
                    .delete_file(&name)
                    .await
                    .map_err(|e| e.notice_text());
                let _ = msg_tx.send(Message::FileDeleted { name, result }).await;
            });
        }

        UpdateAction::RebuildFile { name } => {
            tokio::spawn(async move {
                let result = client
                    .rebuild_file(&name)
                    .await
                    .map_err(|e| e.notice_text());
                let _ = msg_tx.send(Message::FileRebuilt { name, result }).await;
            });
        }

        UpdateAction::UploadFiles { paths, overwrite } => {
            tokio::spawn(async move {
                let result = match client.upload_files(&paths, overwrite).await {
                    Ok(report) => {
                        let summary = report.summary("Files uploaded");
                        if report.is_accepted() {
                            Ok(UploadOutcome {
                                partial: report.is_partial(),
                                summary,
                            })
                        } else {
                            Err(summary)
                        }
                    }
                    Err(e) => Err(e.notice_text()),
                };
                let _ = msg_tx.send(Message::UploadFinished { result }).await;
            });
        }

        UpdateAction::RebuildAll => {
            tokio::spawn(async move {
                let result = client.rebuild_all().await.map_err(|e| e.notice_text());
                let _ = msg_tx.send(Message::AllRebuilt { result }).await;
            });
        }

        UpdateAction::StartService => {
            tokio::spawn(async move {
                let result = client.start_app().await.map_err(|e| e.notice_text());
                let _ = msg_tx.send(Message::ServiceStarted { result }).await;
            });
        }

        UpdateAction::StopService => {
            tokio::spawn(async move {
                let result = client.stop_app().await.map_err(|e| e.notice_text());
                let _ = msg_tx.send(Message::ServiceStopped { result }).await;
            });
        }

        UpdateAction::ShutdownBackend => {
            tokio::spawn(async move {
                let result = client.shutdown_app().await.map_err(|e| e.notice_text());
                let _ = msg_tx.send(Message::BackendShutdown { result }).await;
            });
        }

        UpdateAction::PollStatus => {
            tokio::spawn(async move {
                let result = client.fetch_status().await.map_err(|e| e.notice_text());
                let _ = msg_tx.send(Message::StatusPolled { result }).await;
            });
        }

        UpdateAction::OpenChatViewer { url } => {
            // Fire-and-forget OS call; failures are logged, never surfaced.
            tokio::spawn(async move {
                if let Err(e) = open_in_browser(&url) {
                    warn!("Failed to open chat viewer {}: {}", url, e);
                } else {
                    debug!("Opened chat viewer: {}", url);
                }
            });
        }
    }
}

/// Open a URL with the platform opener.
#[cfg(target_os = "macos")]
fn open_in_browser(url: &str) -> std::io::Result<()> {
    Command::new("open").arg(url).spawn()?;
    Ok(())
}

#[cfg(target_os = "windows")]
fn open_in_browser(url: &str) -> std::io::Result<()> {
    Command::new("cmd").args(["/C", "start", url]).spawn()?;
    Ok(())
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn open_in_browser(url: &str) -> std::io::Result<()> {
    Command::new("xdg-open").arg(url).spawn()?;
    Ok(())
}
