//! Key event handlers for different UI modes

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, Panel, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    match state.ui_mode {
        UiMode::ConfirmDialog => handle_key_confirm_dialog(key),
        UiMode::UploadInput => handle_key_upload_input(key),
        UiMode::Dashboard => handle_key_dashboard(state, key),
    }
}

/// Handle key events in the confirmation dialog
fn handle_key_confirm_dialog(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('y' | 'Y') | InputKey::Enter => Some(Message::Confirm),
        InputKey::Char('n' | 'N') | InputKey::Esc => Some(Message::CancelConfirm),
        // Force quit even in dialog
        InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => None,
    }
}

/// Handle key events in the upload path prompt
fn handle_key_upload_input(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::UploadCancel),
        InputKey::Enter => Some(Message::UploadSubmit),
        InputKey::Backspace => Some(Message::UploadBackspace),
        InputKey::Char(c) => Some(Message::UploadInput(c)),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => None,
    }
}

/// Handle key events on the dashboard
fn handle_key_dashboard(state: &AppState, key: InputKey) -> Option<Message> {
    // An active edit buffer captures text input first.
    if state.focus == Panel::ConfigForm && state.form.editing.is_some() {
        return match key {
            InputKey::Esc => Some(Message::FormCancel),
            InputKey::Enter => Some(Message::FormCommit),
            InputKey::Backspace => Some(Message::FormBackspace),
            InputKey::Char(c) => Some(Message::FormInput(c)),
            InputKey::CharCtrl('c') => Some(Message::Quit),
            _ => None,
        };
    }

    match key {
        InputKey::Char('q') | InputKey::Esc => Some(Message::Quit),
        InputKey::CharCtrl('c') => Some(Message::Quit),

        InputKey::Tab => Some(Message::NextPanel),
        InputKey::BackTab => Some(Message::PrevPanel),

        // ─────────────────────────────────────────────────────────
        // Global action keys
        // ─────────────────────────────────────────────────────────
        InputKey::Char('r') => Some(Message::LoadConfig),
        InputKey::Char('s') => Some(Message::SaveConfig),
        InputKey::Char('o') => Some(Message::OptimizeConfig),
        InputKey::Char('f') => Some(Message::RefreshFiles),
        InputKey::Char('u') => Some(Message::PromptUpload),
        InputKey::Char('b') => Some(Message::RebuildAll),
        InputKey::Char('g') => Some(Message::StartService),
        InputKey::Char('t') => Some(Message::StopService),
        InputKey::Char('x') => Some(Message::ShutdownBackend),

        // ─────────────────────────────────────────────────────────
        // Focused-panel keys
        // ─────────────────────────────────────────────────────────
        other => match (state.focus, other) {
            (Panel::ConfigForm, InputKey::Up) => Some(Message::FormUp),
            (Panel::ConfigForm, InputKey::Down) => Some(Message::FormDown),
            (Panel::ConfigForm, InputKey::Enter) => Some(Message::FormActivate),

            (Panel::Documents, InputKey::Up) => Some(Message::FileUp),
            (Panel::Documents, InputKey::Down) => Some(Message::FileDown),
            (Panel::Documents, InputKey::Char('d') | InputKey::Delete) => {
                Some(Message::DeleteSelectedFile)
            }
            (Panel::Documents, InputKey::Char('e')) => Some(Message::RebuildSelectedFile),

            (Panel::Logs, InputKey::Up) => Some(Message::LogScrollUp),
            (Panel::Logs, InputKey::Down) => Some(Message::LogScrollDown),
            (Panel::Logs, InputKey::End) => Some(Message::LogScrollToEnd),

            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_dialog_keys() {
        let mut state = AppState::new();
        state.ui_mode = UiMode::ConfirmDialog;
        assert!(matches!(
            handle_key(&state, InputKey::Char('y')),
            Some(Message::Confirm)
        ));
        assert!(matches!(
            handle_key(&state, InputKey::Esc),
            Some(Message::CancelConfirm)
        ));
        assert!(matches!(
            handle_key(&state, InputKey::Char('n')),
            Some(Message::CancelConfirm)
        ));
        // Unmapped keys do nothing in the dialog.
        assert!(handle_key(&state, InputKey::Char('d')).is_none());
    }

    #[test]
    fn test_dashboard_action_keys() {
        let state = AppState::new();
        assert!(matches!(
            handle_key(&state, InputKey::Char('s')),
            Some(Message::SaveConfig)
        ));
        assert!(matches!(
            handle_key(&state, InputKey::Char('g')),
            Some(Message::StartService)
        ));
        assert!(matches!(
            handle_key(&state, InputKey::Char('q')),
            Some(Message::Quit)
        ));
    }

    #[test]
    fn test_focused_panel_keys() {
        let mut state = AppState::new();
        assert!(matches!(
            handle_key(&state, InputKey::Up),
            Some(Message::FormUp)
        ));

        state.focus = Panel::Documents;
        assert!(matches!(
            handle_key(&state, InputKey::Char('d')),
            Some(Message::DeleteSelectedFile)
        ));

        state.focus = Panel::Logs;
        assert!(matches!(
            handle_key(&state, InputKey::Up),
            Some(Message::LogScrollUp)
        ));
    }

    #[test]
    fn test_edit_buffer_captures_action_keys() {
        let mut state = AppState::new();
        state.form.activate(); // opens an edit buffer on the first field
        assert!(state.form.editing.is_some());

        // 'q' types instead of quitting while editing.
        assert!(matches!(
            handle_key(&state, InputKey::Char('q')),
            Some(Message::FormInput('q'))
        ));
        assert!(matches!(
            handle_key(&state, InputKey::Enter),
            Some(Message::FormCommit)
        ));
        assert!(matches!(
            handle_key(&state, InputKey::Esc),
            Some(Message::FormCancel)
        ));
    }

    #[test]
    fn test_upload_prompt_keys() {
        let mut state = AppState::new();
        state.ui_mode = UiMode::UploadInput;
        assert!(matches!(
            handle_key(&state, InputKey::Char('/')),
            Some(Message::UploadInput('/'))
        ));
        assert!(matches!(
            handle_key(&state, InputKey::Enter),
            Some(Message::UploadSubmit)
        ));
        assert!(matches!(
            handle_key(&state, InputKey::Esc),
            Some(Message::UploadCancel)
        ));
    }
}
