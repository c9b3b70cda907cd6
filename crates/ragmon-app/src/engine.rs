//! Engine - shared orchestration state for the console
//!
//! The Engine owns the TEA state, the message channel, the control client,
//! the shutdown signal, and the log-stream task. Frontends (the TUI runner,
//! tests) feed it messages and render from `state`.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::Settings;
use crate::message::Message;
use crate::process;
use crate::state::AppState;
use ragmon_api::{spawn_log_stream, ControlClient, LogStreamEvent};
use ragmon_core::prelude::*;

/// Capacity of the unified message channel.
const MSG_CHANNEL_CAPACITY: usize = 256;

/// Capacity of the log-stream event channel.
const LOG_EVENT_CAPACITY: usize = 64;

/// Orchestration engine for the console.
pub struct Engine {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (log stream, background tasks).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    /// The frontend event loop drains messages from here.
    msg_rx: mpsc::Receiver<Message>,

    /// Shared HTTP client for the control API.
    client: ControlClient,

    /// Sender for the shutdown signal. Send `true` to initiate shutdown.
    shutdown_tx: watch::Sender<bool>,

    /// Receiver for the shutdown signal. Cloned into background tasks.
    shutdown_rx: watch::Receiver<bool>,

    /// Log-stream task handle. None until `connect_log_stream`.
    log_stream: Option<JoinHandle<()>>,
}

impl Engine {
    /// Create a new Engine from console settings.
    ///
    /// Builds the control client for `settings.server.base_url`; nothing
    /// touches the network until messages are processed or the log stream is
    /// connected.
    pub fn new(settings: Settings) -> Result<Self> {
        let client = ControlClient::new(&settings.server.base_url)?;
        let state = AppState::with_settings(settings);
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(MSG_CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Ok(Self {
            state,
            msg_tx,
            msg_rx,
            client,
            shutdown_tx,
            shutdown_rx,
            log_stream: None,
        })
    }

    /// Connect the `/ws/logs` push channel, bridging its events to messages.
    pub fn connect_log_stream(&mut self) -> Result<()> {
        let url = self.client.logs_ws_url()?;
        info!("Connecting log channel: {}", url);

        let (event_tx, mut event_rx) = mpsc::channel::<LogStreamEvent>(LOG_EVENT_CAPACITY);
        let handle = spawn_log_stream(url, event_tx, self.shutdown_rx.clone());

        let msg_tx = self.msg_tx.clone();
        tokio::spawn(async move {
            while let Some(event) = event_rx.recv().await {
                let msg = match event {
                    LogStreamEvent::Opened => Message::LogChannelOpened,
                    LogStreamEvent::Record(record) => Message::LogRecordPushed { record },
                    LogStreamEvent::Closed => Message::LogChannelClosed,
                    LogStreamEvent::Errored { detail } => Message::LogChannelErrored { detail },
                };
                if msg_tx.send(msg).await.is_err() {
                    break;
                }
            }
        });

        self.log_stream = Some(handle);
        Ok(())
    }

    /// Startup burst: load the config, list the corpus, poll the status --
    /// the console's page-load sequence.
    pub fn bootstrap(&mut self) {
        self.process_message(Message::LoadConfig);
        self.process_message(Message::RefreshFiles);
        self.process_message(Message::PollStatus);
    }

    /// Process a single message through the TEA update cycle.
    pub fn process_message(&mut self, msg: Message) {
        process::process_message(&mut self.state, msg, &self.msg_tx, &self.client);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed. The TUI runner calls this
    /// before every render.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Initiate shutdown: signal background tasks and reap the log stream.
    pub async fn shutdown(&mut self) {
        let _ = self.shutdown_tx.send(true);

        if let Some(handle) = self.log_stream.take() {
            match tokio::time::timeout(std::time::Duration::from_secs(2), handle).await {
                Ok(Ok(())) => info!("Log stream stopped"),
                Ok(Err(e)) => warn!("Log stream task panicked: {}", e),
                Err(_) => warn!("Log stream shutdown timed out"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_key::InputKey;
    use crate::state::UiMode;

    fn engine() -> Engine {
        Engine::new(Settings::default()).unwrap()
    }

    #[tokio::test]
    async fn test_engine_new_creates_valid_state() {
        let engine = engine();
        assert!(!engine.should_quit());
        assert_eq!(engine.state.ui_mode, UiMode::Dashboard);
    }

    #[tokio::test]
    async fn test_engine_rejects_invalid_server_url() {
        let mut settings = Settings::default();
        settings.server.base_url = "definitely not a url".into();
        assert!(Engine::new(settings).is_err());
    }

    #[tokio::test]
    async fn test_engine_drain_empty_channel() {
        let mut engine = engine();
        assert_eq!(engine.drain_pending_messages(), 0);
    }

    #[tokio::test]
    async fn test_engine_process_quit_message() {
        let mut engine = engine();
        engine.process_message(Message::Quit);
        assert!(engine.should_quit());
    }

    #[tokio::test]
    async fn test_engine_key_messages_flow_through_update() {
        let mut engine = engine();
        engine.process_message(Message::Key(InputKey::Tab));
        assert_eq!(engine.state.focus, crate::state::Panel::Documents);
    }

    #[tokio::test]
    async fn test_engine_drain_processes_queued_messages() {
        let mut engine = engine();
        engine.msg_sender().try_send(Message::Key(InputKey::Tab)).unwrap();
        engine.msg_sender().try_send(Message::Quit).unwrap();
        assert_eq!(engine.drain_pending_messages(), 2);
        assert!(engine.should_quit());
    }

    #[tokio::test]
    async fn test_engine_shutdown_without_log_stream() {
        let mut engine = engine();
        // Should not hang or panic with nothing connected.
        engine.shutdown().await;
    }

    #[tokio::test]
    async fn test_engine_bootstrap_guards_controls() {
        let mut engine = engine();
        engine.bootstrap();
        // The startup burst puts all three controls in flight.
        use crate::state::ControlId;
        assert!(engine.state.pending.is_pending(ControlId::LoadConfig));
        assert!(engine.state.pending.is_pending(ControlId::RefreshFiles));
        assert!(engine.state.pending.is_pending(ControlId::Status));
        engine.shutdown().await;
    }
}
