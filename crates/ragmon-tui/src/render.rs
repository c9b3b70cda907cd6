//! Main render/view function (View in TEA pattern)

use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use ragmon_app::{AppState, UiMode};

use crate::layout;
use crate::theme::palette;
use crate::widgets;

/// Render the complete UI (View function in TEA)
///
/// Pure rendering: reads state, never mutates it.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Fill the terminal with the base background.
    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area);

    frame.render_widget(widgets::Header::new(state), areas.header);
    frame.render_widget(widgets::ConfigFormPanel::new(state), areas.form);
    frame.render_widget(widgets::DocumentsPanel::new(state), areas.documents);
    frame.render_widget(widgets::LogPanel::new(state), areas.logs);
    frame.render_widget(widgets::StatusBar::new(state), areas.status);

    // Modal overlays by UI mode.
    match state.ui_mode {
        UiMode::ConfirmDialog => {
            if let Some(dialog) = &state.confirm {
                frame.render_widget(widgets::ConfirmDialog::new(dialog), area);
            }
        }
        UiMode::UploadInput => {
            if let Some(input) = &state.upload {
                frame.render_widget(widgets::UploadPrompt::new(input), area);
            }
        }
        UiMode::Dashboard => {}
    }

    // Notices float above everything.
    frame.render_widget(widgets::NoticeStack::new(&state.notices), area);
}
