//! # ragmon-app - Application State and Orchestration
//!
//! The TEA (The Elm Architecture) layer of the console:
//!
//! - [`state::AppState`] - the Model: form, corpus listing, log tail,
//!   service lifecycle, pending guards, notices
//! - [`message::Message`] - every event the loop can process
//! - [`handler::update`] - the update function: state transitions plus
//!   [`handler::UpdateAction`]s for the event loop
//! - [`actions`] - action dispatch: one spawned task per backend call, one
//!   completion message per task
//! - [`engine::Engine`] - owns the loop's moving parts (state, channels,
//!   client, log stream)
//!
//! Form mapping lives in [`form`], the bounded log tail in [`log_tail`],
//! ephemeral notices in [`notify`], and the console's own settings file in
//! [`config`].

pub mod actions;
pub mod config;
pub mod confirm;
pub mod engine;
pub mod form;
pub mod handler;
pub mod input_key;
pub mod log_tail;
pub mod message;
pub mod notify;
pub mod process;
pub mod state;

// Re-export commonly used types at crate root for convenience
pub use config::{load_settings, save_settings, Settings};
pub use engine::Engine;
pub use form::{FieldKind, FieldSpec, FormState};
pub use handler::{update, UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use log_tail::{ChannelState, LogTail};
pub use message::Message;
pub use notify::{Notice, NoticeKind, NotificationCenter};
pub use state::{AppState, ControlId, Panel, PendingActions, ServiceState, UiMode};
