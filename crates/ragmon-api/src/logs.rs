//! Background task tailing the backend's `/ws/logs` push channel.
//!
//! The task owns the WebSocket connection and its reconnection policy
//! (exponential backoff, no attempt cap -- the channel outlives backend
//! restarts). The console's LogTail never sees the socket: it only receives
//! [`LogStreamEvent`]s and reacts to the lifecycle callbacks.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use url::Url;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

use ragmon_core::prelude::*;
use ragmon_core::LogRecord;

/// Initial reconnection backoff duration.
const INITIAL_BACKOFF: Duration = Duration::from_secs(1);

/// Maximum reconnection backoff duration (cap).
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Lifecycle events and records forwarded to the console.
#[derive(Debug, Clone, PartialEq)]
pub enum LogStreamEvent {
    /// Channel established.
    Opened,
    /// One log record pushed by the backend.
    Record(LogRecord),
    /// Channel closed (server went away or closed cleanly).
    Closed,
    /// Channel failed with a transport-level error.
    Errored { detail: String },
}

/// Spawn the log-stream task.
///
/// Events flow through `event_tx` until `shutdown_rx` flips to `true` or the
/// receiver is dropped.
pub fn spawn_log_stream(
    url: Url,
    event_tx: mpsc::Sender<LogStreamEvent>,
    shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(run_log_stream(url, event_tx, shutdown_rx))
}

async fn run_log_stream(
    url: Url,
    event_tx: mpsc::Sender<LogStreamEvent>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut backoff = INITIAL_BACKOFF;

    loop {
        if *shutdown_rx.borrow() {
            return;
        }

        match connect_async(url.as_str()).await {
            Ok((ws_stream, _response)) => {
                info!("Log channel connected: {}", url);
                backoff = INITIAL_BACKOFF;
                if event_tx.send(LogStreamEvent::Opened).await.is_err() {
                    return;
                }

                let event = read_frames(ws_stream, &event_tx, &mut shutdown_rx).await;
                match event {
                    ReadOutcome::Shutdown | ReadOutcome::ReceiverGone => return,
                    ReadOutcome::Closed => {
                        warn!("Log channel closed");
                        if event_tx.send(LogStreamEvent::Closed).await.is_err() {
                            return;
                        }
                    }
                    ReadOutcome::Errored(detail) => {
                        warn!("Log channel error: {}", detail);
                        let errored = LogStreamEvent::Errored { detail };
                        if event_tx.send(errored).await.is_err() {
                            return;
                        }
                    }
                }
            }
            Err(e) => {
                debug!("Log channel connect failed: {}", e);
                let errored = LogStreamEvent::Errored {
                    detail: e.to_string(),
                };
                if event_tx.send(errored).await.is_err() {
                    return;
                }
            }
        }

        // Reconnect after backoff, unless shutdown arrives first. A dropped
        // shutdown sender means the engine is gone: stop too.
        tokio::select! {
            _ = tokio::time::sleep(backoff) => {}
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    return;
                }
            }
        }
        backoff = (backoff * 2).min(MAX_BACKOFF);
    }
}

enum ReadOutcome {
    Closed,
    Errored(String),
    Shutdown,
    ReceiverGone,
}

async fn read_frames(
    mut ws_stream: WsStream,
    event_tx: &mpsc::Sender<LogStreamEvent>,
    shutdown_rx: &mut watch::Receiver<bool>,
) -> ReadOutcome {
    loop {
        tokio::select! {
            frame = ws_stream.next() => {
                match frame {
                    Some(Ok(WsMessage::Text(text))) => {
                        match serde_json::from_str::<LogRecord>(text.as_str()) {
                            Ok(record) => {
                                if event_tx.send(LogStreamEvent::Record(record)).await.is_err() {
                                    return ReadOutcome::ReceiverGone;
                                }
                            }
                            Err(e) => {
                                // Malformed frames are dropped, not fatal.
                                debug!("Ignoring malformed log frame: {}", e);
                            }
                        }
                    }
                    Some(Ok(WsMessage::Ping(payload))) => {
                        let _ = ws_stream.send(WsMessage::Pong(payload)).await;
                    }
                    Some(Ok(WsMessage::Close(_))) | None => {
                        return ReadOutcome::Closed;
                    }
                    Some(Ok(_)) => {
                        // Binary/pong frames carry nothing for us.
                    }
                    Some(Err(e)) => {
                        return ReadOutcome::Errored(e.to_string());
                    }
                }
            }
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    return ReadOutcome::Shutdown;
                }
            }
        }
    }
}
