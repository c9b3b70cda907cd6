//! ragmon - A terminal operations console for RAG chat backends
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use clap::Parser;
use ragmon_app::config::{default_settings_path, load_settings};
use ragmon_core::prelude::*;

/// ragmon - A terminal operations console for RAG chat backends
#[derive(Parser, Debug)]
#[command(name = "ragmon")]
#[command(about = "A terminal operations console for RAG chat backends", long_about = None)]
struct Args {
    /// Base URL of the backend control API (overrides the settings file)
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    /// URL of the chat UI opened after a service start (overrides the
    /// settings file)
    #[arg(long, value_name = "URL")]
    chat_url: Option<String>,

    /// Path to an alternative settings file
    #[arg(long, value_name = "PATH")]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    // File logging only: the terminal belongs to the TUI.
    if let Err(e) = ragmon_core::logging::init() {
        eprintln!("Warning: failed to initialize logging: {e}");
    }

    let settings_path = args.config.unwrap_or_else(default_settings_path);
    let mut settings = load_settings(&settings_path);

    if let Some(server) = args.server {
        settings.server.base_url = server;
    }
    if let Some(chat_url) = args.chat_url {
        settings.server.chat_url = chat_url;
    }

    info!("Connecting to backend at {}", settings.server.base_url);

    ragmon_tui::run(settings).await?;
    Ok(())
}
