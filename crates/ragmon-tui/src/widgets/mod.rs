//! Widget library for the console.

mod config_form;
mod confirm_dialog;
mod documents;
mod header;
mod log_view;
mod notices;
mod status_bar;
mod upload_prompt;

pub use config_form::ConfigFormPanel;
pub use confirm_dialog::ConfirmDialog;
pub use documents::DocumentsPanel;
pub use header::Header;
pub use log_view::LogPanel;
pub use notices::NoticeStack;
pub use status_bar::StatusBar;
pub use upload_prompt::UploadPrompt;
