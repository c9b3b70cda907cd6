//! Main TUI runner: terminal lifecycle plus the render/input loop.

use tracing::info;

use ragmon_app::{Engine, Settings};
use ragmon_core::prelude::*;

use crate::{event, render, terminal};

/// Run the console until the operator quits.
///
/// Owns the terminal for the whole session: initializes ratatui, connects
/// the log channel, fires the startup burst (config + files + status), then
/// alternates draining messages, rendering, and polling input.
pub async fn run(settings: Settings) -> Result<()> {
    let mut engine = Engine::new(settings)?;

    terminal::install_panic_hook();
    let mut term = ratatui::init();

    engine.connect_log_stream()?;
    engine.bootstrap();

    let result = run_loop(&mut term, &mut engine).await;

    engine.shutdown().await;
    ratatui::restore();

    info!("Console session ended");
    result
}

async fn run_loop(term: &mut ratatui::DefaultTerminal, engine: &mut Engine) -> Result<()> {
    loop {
        // Apply everything background tasks delivered since the last frame.
        engine.drain_pending_messages();

        if engine.should_quit() {
            return Ok(());
        }

        term.draw(|frame| render::view(frame, &engine.state))
            .map_err(|e| Error::terminal(e.to_string()))?;

        // Blocks up to 50ms; yields a Tick on timeout.
        if let Some(msg) = event::poll()? {
            engine.process_message(msg);
        }
    }
}
