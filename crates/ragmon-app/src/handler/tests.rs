//! Handler-level tests: drive update() with messages and assert on state
//! and dispatched actions. No network involved.

use serde_json::json;

use crate::message::{Message, UploadOutcome};
use crate::notify::NoticeKind;
use crate::state::{AppState, ControlId, Panel, ServiceState, UiMode};
use ragmon_core::{FileEntry, ServiceStatus, SplitterMethod};

use super::{update, UpdateAction};

/// Run one message plus all follow-ups, collecting dispatched actions.
fn run(state: &mut AppState, message: Message) -> Vec<UpdateAction> {
    let mut actions = Vec::new();
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = update(state, m);
        if let Some(action) = result.action {
            actions.push(action);
        }
        msg = result.message;
    }
    actions
}

fn entry(name: &str) -> FileEntry {
    FileEntry {
        name: name.to_string(),
        size: "2.0 MB".into(),
        modified: "2024-05-01".into(),
        splitter_method: SplitterMethod::Sentences,
    }
}

fn state_with_files(names: &[&str]) -> AppState {
    let mut state = AppState::new();
    state.reconcile_files(names.iter().map(|n| entry(n)).collect());
    state
}

// ─────────────────────────────────────────────────────────────
// Confirmation gating
// ─────────────────────────────────────────────────────────────

#[test]
fn test_delete_opens_confirmation_without_dispatching() {
    let mut state = state_with_files(&["report.pdf"]);
    let actions = run(&mut state, Message::DeleteSelectedFile);

    assert!(actions.is_empty());
    assert_eq!(state.ui_mode, UiMode::ConfirmDialog);
    assert!(state.confirm.is_some());
    assert!(!state.pending.is_pending(ControlId::DeleteFile));
}

#[test]
fn test_declined_delete_makes_no_call_and_keeps_files() {
    let mut state = state_with_files(&["report.pdf", "notes.txt"]);
    let before = state.files.clone();

    let actions = run(&mut state, Message::DeleteSelectedFile);
    assert!(actions.is_empty());

    let actions = run(&mut state, Message::CancelConfirm);
    assert!(actions.is_empty(), "declined confirmation must not dispatch");

    assert_eq!(state.files, before);
    assert_eq!(state.ui_mode, UiMode::Dashboard);
    assert!(!state.pending.is_pending(ControlId::DeleteFile));
    // Neutral notice, not an error.
    let notice = state.notices.latest().unwrap();
    assert_eq!(notice.kind, NoticeKind::Info);
    assert!(notice.text.contains("cancelled"));
}

#[test]
fn test_confirmed_delete_dispatches_and_guards() {
    let mut state = state_with_files(&["report.pdf"]);
    run(&mut state, Message::DeleteSelectedFile);
    let actions = run(&mut state, Message::Confirm);

    assert_eq!(
        actions,
        vec![UpdateAction::DeleteFile {
            name: "report.pdf".into()
        }]
    );
    assert!(state.pending.is_pending(ControlId::DeleteFile));

    // A second trigger on the busy control is swallowed.
    let actions = run(&mut state, Message::DeleteSelectedFile);
    assert!(actions.is_empty());
    assert!(state.confirm.is_none());
}

#[test]
fn test_confirm_skipped_when_disabled_in_settings() {
    let mut state = state_with_files(&["report.pdf"]);
    state.settings.ui.confirm_destructive = false;

    let actions = run(&mut state, Message::DeleteSelectedFile);
    assert_eq!(
        actions,
        vec![UpdateAction::DeleteFile {
            name: "report.pdf".into()
        }]
    );
    assert_eq!(state.ui_mode, UiMode::Dashboard);
}

// ─────────────────────────────────────────────────────────────
// Guard release on every exit path
// ─────────────────────────────────────────────────────────────

#[test]
fn test_save_guard_blocks_second_trigger_until_completion() {
    let mut state = AppState::new();

    let actions = run(&mut state, Message::SaveConfig);
    assert_eq!(actions.len(), 1);
    assert!(matches!(actions[0], UpdateAction::SaveConfig { .. }));

    // Disabled while in flight.
    assert!(run(&mut state, Message::SaveConfig).is_empty());

    // Error path still releases the guard.
    run(
        &mut state,
        Message::ConfigSaved {
            result: Err("backend exploded".into()),
        },
    );
    assert!(!state.pending.is_pending(ControlId::SaveConfig));
    assert_eq!(state.notices.latest().unwrap().kind, NoticeKind::Error);

    // Re-enabled.
    assert_eq!(run(&mut state, Message::SaveConfig).len(), 1);
}

#[test]
fn test_save_dispatches_collected_form() {
    let mut state = AppState::new();
    state.form.fill(&json!({"logging": {"level": "DEBUG"}}));

    let actions = run(&mut state, Message::SaveConfig);
    match &actions[0] {
        UpdateAction::SaveConfig { config } => {
            assert_eq!(config["logging"]["level"], json!("DEBUG"));
        }
        other => panic!("expected SaveConfig, got {other:?}"),
    }
}

#[test]
fn test_save_success_does_not_refresh_anything() {
    let mut state = AppState::new();
    run(&mut state, Message::SaveConfig);
    let actions = run(
        &mut state,
        Message::ConfigSaved {
            result: Ok(Some("Конфигурация сохранена".into())),
        },
    );
    assert!(actions.is_empty());
    let notice = state.notices.latest().unwrap();
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.text, "Конфигурация сохранена");
}

// ─────────────────────────────────────────────────────────────
// Refresh semantics
// ─────────────────────────────────────────────────────────────

#[test]
fn test_optimize_success_reloads_config() {
    let mut state = AppState::new();
    run(&mut state, Message::OptimizeConfig);
    let actions = run(
        &mut state,
        Message::ConfigOptimized { result: Ok(None) },
    );
    assert_eq!(actions, vec![UpdateAction::LoadConfig]);
    assert!(state.pending.is_pending(ControlId::LoadConfig));
}

#[test]
fn test_config_loaded_fills_form() {
    let mut state = AppState::new();
    run(&mut state, Message::LoadConfig);
    run(
        &mut state,
        Message::ConfigLoaded {
            result: Ok(json!({"splitter": {"method": "paragraphs"}})),
        },
    );
    let field = state
        .form
        .fields()
        .iter()
        .find(|f| f.name() == "splitter.method")
        .unwrap();
    assert_eq!(field.text, "paragraphs");
    assert!(!state.pending.is_pending(ControlId::LoadConfig));
}

#[test]
fn test_delete_success_triggers_exactly_one_relist() {
    let mut state = state_with_files(&["report.pdf"]);
    run(&mut state, Message::DeleteSelectedFile);
    run(&mut state, Message::Confirm);

    let actions = run(
        &mut state,
        Message::FileDeleted {
            name: "report.pdf".into(),
            result: Ok(None),
        },
    );
    assert_eq!(actions, vec![UpdateAction::FetchFiles]);
    assert!(!state.pending.is_pending(ControlId::DeleteFile));
    assert!(state.pending.is_pending(ControlId::RefreshFiles));
}

#[test]
fn test_files_loaded_replaces_listing_wholesale() {
    let mut state = state_with_files(&["a.pdf", "b.pdf", "c.pdf"]);
    state.file_cursor = 2;
    run(&mut state, Message::RefreshFiles);
    run(
        &mut state,
        Message::FilesLoaded {
            result: Ok(vec![entry("fresh.txt")]),
        },
    );
    assert_eq!(state.files.len(), 1);
    assert_eq!(state.files[0].name, "fresh.txt");
    assert_eq!(state.file_cursor, 0);
}

// ─────────────────────────────────────────────────────────────
// Upload
// ─────────────────────────────────────────────────────────────

#[test]
fn test_upload_prompt_flow_gates_on_overwrite_confirmation() {
    let mut state = AppState::new();
    run(&mut state, Message::PromptUpload);
    assert_eq!(state.ui_mode, UiMode::UploadInput);

    for c in "/data/a.pdf".chars() {
        run(&mut state, Message::UploadInput(c));
    }
    let actions = run(&mut state, Message::UploadSubmit);
    assert!(actions.is_empty());
    assert_eq!(state.ui_mode, UiMode::ConfirmDialog);

    let actions = run(&mut state, Message::Confirm);
    assert_eq!(actions.len(), 1);
    match &actions[0] {
        UpdateAction::UploadFiles { paths, overwrite } => {
            assert_eq!(paths.len(), 1);
            assert!(*overwrite);
        }
        other => panic!("expected UploadFiles, got {other:?}"),
    }
    assert!(state.pending.is_pending(ControlId::Upload));
}

#[test]
fn test_upload_submit_without_paths_is_an_error_notice() {
    let mut state = AppState::new();
    run(&mut state, Message::PromptUpload);
    let actions = run(&mut state, Message::UploadSubmit);
    assert!(actions.is_empty());
    assert_eq!(state.ui_mode, UiMode::Dashboard);
    assert_eq!(state.notices.latest().unwrap().kind, NoticeKind::Error);
}

#[test]
fn test_upload_partial_success_is_qualified_success_with_one_relist() {
    let mut state = AppState::new();
    // Arm the upload guard as the confirmed dispatch would.
    assert!(state.pending.begin(ControlId::Upload));

    let actions = run(
        &mut state,
        Message::UploadFinished {
            result: Ok(UploadOutcome {
                partial: true,
                summary: "Processed 2 of 3 files. Errors: bad.bin: unsupported type".into(),
            }),
        },
    );

    // Reported as success overall (warning tone), with the error summary.
    let notice = state.notices.latest().unwrap();
    assert_eq!(notice.kind, NoticeKind::Warning);
    assert!(notice.text.contains("bad.bin"));

    // Exactly one file-list reload.
    assert_eq!(actions, vec![UpdateAction::FetchFiles]);
    assert!(!state.pending.is_pending(ControlId::Upload));
}

#[test]
fn test_upload_cancel_resets_prompt_with_neutral_notice() {
    let mut state = AppState::new();
    run(&mut state, Message::PromptUpload);
    run(&mut state, Message::UploadCancel);
    assert_eq!(state.ui_mode, UiMode::Dashboard);
    assert!(state.upload.is_none());
    assert_eq!(state.notices.latest().unwrap().kind, NoticeKind::Info);
}

// ─────────────────────────────────────────────────────────────
// Service lifecycle
// ─────────────────────────────────────────────────────────────

#[test]
fn test_start_unreachable_while_running() {
    let mut state = AppState::new();
    state.service.apply_status(ServiceStatus { running: true });

    let actions = run(&mut state, Message::StartService);
    assert!(actions.is_empty());
    assert!(state.confirm.is_none());
    assert_eq!(state.ui_mode, UiMode::Dashboard);
}

#[test]
fn test_stop_unreachable_while_stopped() {
    let mut state = AppState::new();
    state.service.apply_status(ServiceStatus { running: false });

    assert!(run(&mut state, Message::StopService).is_empty());
    assert!(run(&mut state, Message::ShutdownBackend).is_empty());
    assert!(state.confirm.is_none());
}

#[test]
fn test_start_flips_enablement_only_after_poll() {
    let mut state = AppState::new();
    state.service.apply_status(ServiceStatus { running: false });

    run(&mut state, Message::StartService);
    let actions = run(&mut state, Message::Confirm);
    assert_eq!(actions, vec![UpdateAction::StartService]);
    assert_eq!(state.service, ServiceState::Starting);

    // Success response: re-poll + open the chat viewer, but do NOT assume
    // running locally.
    let actions = run(
        &mut state,
        Message::ServiceStarted { result: Ok(None) },
    );
    assert!(actions.contains(&UpdateAction::PollStatus));
    assert!(actions
        .iter()
        .any(|a| matches!(a, UpdateAction::OpenChatViewer { .. })));
    assert_eq!(state.service, ServiceState::Starting);
    assert!(!state.service.can_stop());

    // Only the authoritative poll result flips enablement.
    run(
        &mut state,
        Message::StatusPolled {
            result: Ok(ServiceStatus { running: true }),
        },
    );
    assert_eq!(state.service, ServiceState::Running);
    assert!(state.service.can_stop());
    assert!(!state.service.can_start());
}

#[test]
fn test_start_error_reverts_transition_and_repolls() {
    let mut state = AppState::new();
    state.service.apply_status(ServiceStatus { running: false });
    run(&mut state, Message::StartService);
    run(&mut state, Message::Confirm);

    let actions = run(
        &mut state,
        Message::ServiceStarted {
            result: Err("Could not start the service".into()),
        },
    );
    assert_eq!(actions, vec![UpdateAction::PollStatus]);
    assert!(!state.pending.is_pending(ControlId::Start));
    assert_eq!(state.notices.latest().unwrap().kind, NoticeKind::Error);
    // Start becomes reachable again once the poll reconciles.
    run(
        &mut state,
        Message::StatusPolled {
            result: Ok(ServiceStatus { running: false }),
        },
    );
    assert!(state.service.can_start());
}

#[test]
fn test_status_poll_failure_marks_unknown() {
    let mut state = AppState::new();
    state.service.apply_status(ServiceStatus { running: true });
    run(&mut state, Message::PollStatus);
    run(
        &mut state,
        Message::StatusPolled {
            result: Err("Transport error: HTTP 502".into()),
        },
    );
    assert_eq!(state.service, ServiceState::Unknown);
}

#[test]
fn test_tick_schedules_one_poll_per_interval() {
    let mut state = AppState::new();

    let actions = run(&mut state, Message::Tick);
    assert_eq!(actions, vec![UpdateAction::PollStatus]);

    // Immediately after: in flight and not due, so nothing.
    let actions = run(&mut state, Message::Tick);
    assert!(actions.is_empty());
}

// ─────────────────────────────────────────────────────────────
// Log channel
// ─────────────────────────────────────────────────────────────

#[test]
fn test_log_channel_lifecycle_updates_tail_and_notices() {
    let mut state = AppState::new();

    run(&mut state, Message::LogChannelOpened);
    assert_eq!(state.log_tail.len(), 1);
    assert_eq!(state.notices.latest().unwrap().kind, NoticeKind::Success);

    run(
        &mut state,
        Message::LogRecordPushed {
            record: ragmon_core::LogRecord::now(ragmon_core::LogLevel::Info, "indexing"),
        },
    );
    assert_eq!(state.log_tail.len(), 2);

    run(&mut state, Message::LogChannelClosed);
    assert_eq!(state.notices.latest().unwrap().kind, NoticeKind::Warning);

    // Repeated reconnect failures do not spam notices.
    let notices_before = state.notices.len();
    run(
        &mut state,
        Message::LogChannelErrored {
            detail: "connection refused".into(),
        },
    );
    run(
        &mut state,
        Message::LogChannelErrored {
            detail: "connection refused".into(),
        },
    );
    assert_eq!(state.notices.len(), notices_before);
    // But every failure still lands in the tail.
    assert!(state
        .log_tail
        .latest()
        .unwrap()
        .message
        .contains("connection refused"));
}

// ─────────────────────────────────────────────────────────────
// Panel navigation
// ─────────────────────────────────────────────────────────────

#[test]
fn test_panel_focus_cycles() {
    let mut state = AppState::new();
    run(&mut state, Message::NextPanel);
    assert_eq!(state.focus, Panel::Documents);
    run(&mut state, Message::NextPanel);
    assert_eq!(state.focus, Panel::Logs);
    run(&mut state, Message::PrevPanel);
    assert_eq!(state.focus, Panel::Documents);
}
