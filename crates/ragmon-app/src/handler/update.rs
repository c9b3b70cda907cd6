//! Main update function - handles state transitions (TEA pattern)
//!
//! Every dispatched operation follows the same shape: an optional
//! confirmation gate for destructive actions, a pending guard acquired on
//! the triggering control, one background call, and a single completion
//! message whose handler releases the guard *before* branching on the
//! result -- so a control can never stay disabled after its operation ends.

use std::time::Instant;

use tracing::warn;

use crate::confirm::ConfirmDialogState;
use crate::message::Message;
use crate::state::{AppState, ControlId, UiMode, UploadInputState};

use super::{keys::handle_key, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Tick => {
            let now = Instant::now();
            state.notices.tick(now);

            // Periodic status re-poll; skipped while one is in flight.
            if !state.pending.is_pending(ControlId::Status) && state.status_poll_due(now) {
                return UpdateResult::message(Message::PollStatus);
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Panel Navigation
        // ─────────────────────────────────────────────────────────
        Message::NextPanel => {
            state.focus = state.focus.next();
            UpdateResult::none()
        }
        Message::PrevPanel => {
            state.focus = state.focus.prev();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Config Form
        // ─────────────────────────────────────────────────────────
        Message::FormUp => {
            state.form.select_prev();
            UpdateResult::none()
        }
        Message::FormDown => {
            state.form.select_next();
            UpdateResult::none()
        }
        Message::FormActivate => {
            state.form.activate();
            UpdateResult::none()
        }
        Message::FormInput(c) => {
            state.form.input(c);
            UpdateResult::none()
        }
        Message::FormBackspace => {
            state.form.backspace();
            UpdateResult::none()
        }
        Message::FormCommit => {
            state.form.commit_edit();
            UpdateResult::none()
        }
        Message::FormCancel => {
            state.form.cancel_edit();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Documents Table / Log View
        // ─────────────────────────────────────────────────────────
        Message::FileUp => {
            state.select_prev_file();
            UpdateResult::none()
        }
        Message::FileDown => {
            state.select_next_file();
            UpdateResult::none()
        }
        Message::LogScrollUp => {
            state.log_tail.scroll_up();
            UpdateResult::none()
        }
        Message::LogScrollDown => {
            state.log_tail.scroll_down();
            UpdateResult::none()
        }
        Message::LogScrollToEnd => {
            state.log_tail.scroll_to_latest();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Action Triggers
        // ─────────────────────────────────────────────────────────
        Message::LoadConfig => {
            if !state.pending.begin(ControlId::LoadConfig) {
                return UpdateResult::none();
            }
            UpdateResult::action(UpdateAction::LoadConfig)
        }

        Message::SaveConfig => {
            if !state.pending.begin(ControlId::SaveConfig) {
                return UpdateResult::none();
            }
            let config = state.form.collect();
            UpdateResult::action(UpdateAction::SaveConfig { config })
        }

        Message::OptimizeConfig => {
            if !state.pending.begin(ControlId::Optimize) {
                return UpdateResult::none();
            }
            UpdateResult::action(UpdateAction::OptimizeConfig)
        }

        Message::RefreshFiles => {
            if !state.pending.begin(ControlId::RefreshFiles) {
                return UpdateResult::none();
            }
            state.notices.info("Requesting file list…");
            UpdateResult::action(UpdateAction::FetchFiles)
        }

        Message::DeleteSelectedFile => {
            if state.pending.is_pending(ControlId::DeleteFile) {
                return UpdateResult::none();
            }
            let Some(file) = state.selected_file() else {
                return UpdateResult::none();
            };
            let dialog = ConfirmDialogState::delete_file(&file.name);
            gate_destructive(state, dialog)
        }

        Message::RebuildSelectedFile => {
            if state.pending.is_pending(ControlId::RebuildFile) {
                return UpdateResult::none();
            }
            let Some(file) = state.selected_file() else {
                return UpdateResult::none();
            };
            let dialog = ConfirmDialogState::rebuild_file(&file.name);
            gate_destructive(state, dialog)
        }

        Message::RebuildAll => {
            if state.pending.is_pending(ControlId::RebuildAll) {
                return UpdateResult::none();
            }
            gate_destructive(state, ConfirmDialogState::rebuild_all())
        }

        Message::StartService => {
            // Unreachable while running: the control is already disabled.
            if !state.service.can_start() || state.pending.is_pending(ControlId::Start) {
                return UpdateResult::none();
            }
            gate_destructive(state, ConfirmDialogState::start_service())
        }

        Message::StopService => {
            if !state.service.can_stop() || state.pending.is_pending(ControlId::Stop) {
                return UpdateResult::none();
            }
            gate_destructive(state, ConfirmDialogState::stop_service())
        }

        Message::ShutdownBackend => {
            if !state.service.can_stop() || state.pending.is_pending(ControlId::Shutdown) {
                return UpdateResult::none();
            }
            gate_destructive(state, ConfirmDialogState::shutdown_backend())
        }

        Message::PollStatus => {
            if !state.pending.begin(ControlId::Status) {
                return UpdateResult::none();
            }
            UpdateResult::action(UpdateAction::PollStatus)
        }

        // ─────────────────────────────────────────────────────────
        // Upload Prompt
        // ─────────────────────────────────────────────────────────
        Message::PromptUpload => {
            if state.pending.is_pending(ControlId::Upload) {
                return UpdateResult::none();
            }
            state.upload = Some(UploadInputState::default());
            state.ui_mode = UiMode::UploadInput;
            UpdateResult::none()
        }

        Message::UploadInput(c) => {
            if let Some(input) = &mut state.upload {
                input.buffer.push(c);
            }
            UpdateResult::none()
        }

        Message::UploadBackspace => {
            if let Some(input) = &mut state.upload {
                input.buffer.pop();
            }
            UpdateResult::none()
        }

        Message::UploadCancel => {
            state.upload = None;
            state.ui_mode = UiMode::Dashboard;
            state.notices.info("Upload cancelled");
            UpdateResult::none()
        }

        Message::UploadSubmit => {
            let Some(input) = state.upload.take() else {
                return UpdateResult::none();
            };
            state.ui_mode = UiMode::Dashboard;
            let paths = crate::message::parse_upload_paths(&input.buffer);
            if paths.is_empty() {
                state.notices.error("No files selected");
                return UpdateResult::none();
            }
            gate_destructive(state, ConfirmDialogState::upload_overwrite(paths))
        }

        // ─────────────────────────────────────────────────────────
        // Confirmation Dialog
        // ─────────────────────────────────────────────────────────
        Message::Confirm => {
            let Some(dialog) = state.confirm.take() else {
                return UpdateResult::none();
            };
            state.ui_mode = UiMode::Dashboard;
            dispatch_confirmed(state, dialog.control, dialog.action)
        }

        Message::CancelConfirm => {
            let Some(dialog) = state.confirm.take() else {
                return UpdateResult::none();
            };
            state.ui_mode = UiMode::Dashboard;
            state.notices.info(dialog.cancel_notice);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Completions
        //
        // Each handler releases the guard first, unconditionally, then
        // branches on the result.
        // ─────────────────────────────────────────────────────────
        Message::ConfigLoaded { result } => {
            state.pending.finish(ControlId::LoadConfig);
            match result {
                Ok(config) => {
                    state.form.fill(&config);
                    state.notices.success("Configuration loaded");
                }
                Err(msg) => state.notices.error(msg),
            }
            UpdateResult::none()
        }

        Message::ConfigSaved { result } => {
            state.pending.finish(ControlId::SaveConfig);
            match result {
                Ok(message) => state
                    .notices
                    .success(message.unwrap_or_else(|| "Configuration saved".into())),
                Err(msg) => state.notices.error(msg),
            }
            UpdateResult::none()
        }

        Message::ConfigOptimized { result } => {
            state.pending.finish(ControlId::Optimize);
            match result {
                Ok(message) => {
                    state
                        .notices
                        .success(message.unwrap_or_else(|| "Parameters optimized".into()));
                    // The tuned values live on the backend: reload them.
                    UpdateResult::message(Message::LoadConfig)
                }
                Err(msg) => {
                    state.notices.error(msg);
                    UpdateResult::none()
                }
            }
        }

        Message::FilesLoaded { result } => {
            state.pending.finish(ControlId::RefreshFiles);
            match result {
                Ok(files) => {
                    state.reconcile_files(files);
                    state.notices.success("File list updated");
                }
                Err(msg) => state.notices.error(msg),
            }
            UpdateResult::none()
        }

        Message::FileDeleted { name, result } => {
            state.pending.finish(ControlId::DeleteFile);
            match result {
                Ok(message) => {
                    state
                        .notices
                        .success(message.unwrap_or_else(|| format!("File \"{name}\" deleted")));
                    UpdateResult::message(Message::RefreshFiles)
                }
                Err(msg) => {
                    state.notices.error(msg);
                    UpdateResult::none()
                }
            }
        }

        Message::FileRebuilt { name, result } => {
            state.pending.finish(ControlId::RebuildFile);
            match result {
                Ok(message) => {
                    state.notices.success(
                        message.unwrap_or_else(|| format!("Embeddings for \"{name}\" rebuilt")),
                    );
                    UpdateResult::message(Message::RefreshFiles)
                }
                Err(msg) => {
                    state.notices.error(msg);
                    UpdateResult::none()
                }
            }
        }

        Message::UploadFinished { result } => {
            state.pending.finish(ControlId::Upload);
            match result {
                Ok(outcome) => {
                    // Partial success is still a success, qualified by the
                    // per-file error summary.
                    if outcome.partial {
                        state.notices.warning(outcome.summary);
                    } else {
                        state.notices.success(outcome.summary);
                    }
                    UpdateResult::message(Message::RefreshFiles)
                }
                Err(msg) => {
                    state.notices.error(msg);
                    UpdateResult::none()
                }
            }
        }

        Message::AllRebuilt { result } => {
            state.pending.finish(ControlId::RebuildAll);
            match result {
                Ok(message) => {
                    state
                        .notices
                        .success(message.unwrap_or_else(|| "Embeddings rebuilt".into()));
                    UpdateResult::message(Message::RefreshFiles)
                }
                Err(msg) => {
                    state.notices.error(msg);
                    UpdateResult::none()
                }
            }
        }

        Message::ServiceStarted { result } => {
            state.pending.finish(ControlId::Start);
            match result {
                Ok(message) => {
                    state
                        .notices
                        .success(message.unwrap_or_else(|| "Service started".into()));
                    // Enablement flips only once the re-poll lands; until
                    // then the service stays in Starting.
                    let url = state.settings.server.chat_url.clone();
                    UpdateResult::message_and_action(
                        Message::PollStatus,
                        UpdateAction::OpenChatViewer { url },
                    )
                }
                Err(msg) => {
                    state.notices.error(msg);
                    state.service.mark_unknown();
                    UpdateResult::message(Message::PollStatus)
                }
            }
        }

        Message::ServiceStopped { result } => {
            state.pending.finish(ControlId::Stop);
            match result {
                Ok(message) => {
                    state
                        .notices
                        .success(message.unwrap_or_else(|| "Service stopped".into()));
                }
                Err(msg) => {
                    state.notices.error(msg);
                    state.service.mark_unknown();
                }
            }
            UpdateResult::message(Message::PollStatus)
        }

        Message::BackendShutdown { result } => {
            state.pending.finish(ControlId::Shutdown);
            match result {
                Ok(message) => {
                    state
                        .notices
                        .success(message.unwrap_or_else(|| "Backend shut down".into()));
                }
                Err(msg) => {
                    state.notices.error(msg);
                    state.service.mark_unknown();
                }
            }
            UpdateResult::message(Message::PollStatus)
        }

        Message::StatusPolled { result } => {
            state.pending.finish(ControlId::Status);
            match result {
                Ok(status) => state.service.apply_status(status),
                Err(msg) => {
                    warn!("Status poll failed: {}", msg);
                    state.service.mark_unknown();
                }
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Log Push Channel
        // ─────────────────────────────────────────────────────────
        Message::LogChannelOpened => {
            use crate::log_tail::ChannelState;
            let previous = state.log_tail.on_open();
            if previous != ChannelState::Connected {
                state.notices.success("Log channel connected");
            }
            UpdateResult::none()
        }

        Message::LogRecordPushed { record } => {
            state.log_tail.on_message(record);
            UpdateResult::none()
        }

        Message::LogChannelClosed => {
            use crate::log_tail::ChannelState;
            let previous = state.log_tail.on_close();
            if previous == ChannelState::Connected {
                state.notices.warning("Log channel disconnected");
            }
            UpdateResult::none()
        }

        Message::LogChannelErrored { detail } => {
            use crate::log_tail::ChannelState;
            let previous = state.log_tail.on_error(&detail);
            if previous == ChannelState::Connected || previous == ChannelState::Connecting {
                state.notices.error(format!("Log channel error: {detail}"));
            }
            UpdateResult::none()
        }
    }
}

/// Route a destructive action through the confirmation gate.
///
/// With confirmations disabled in settings the action dispatches directly;
/// otherwise it parks in the dialog until the operator decides.
fn gate_destructive(state: &mut AppState, dialog: ConfirmDialogState) -> UpdateResult {
    if !state.settings.ui.confirm_destructive {
        return dispatch_confirmed(state, dialog.control, dialog.action);
    }
    state.confirm = Some(dialog);
    state.ui_mode = UiMode::ConfirmDialog;
    UpdateResult::none()
}

/// Acquire the guard and hand the action to the event loop, applying the
/// optimistic lifecycle transition for service operations.
fn dispatch_confirmed(
    state: &mut AppState,
    control: ControlId,
    action: UpdateAction,
) -> UpdateResult {
    if !state.pending.begin(control) {
        return UpdateResult::none();
    }
    match &action {
        UpdateAction::StartService => state.service.mark_starting(),
        UpdateAction::StopService | UpdateAction::ShutdownBackend => state.service.mark_stopping(),
        _ => {}
    }
    UpdateResult::action(action)
}
