//! Bottom key-hint bar.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use ragmon_app::{AppState, Panel};

use crate::theme::palette;

pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn hints(&self) -> &'static str {
        match self.state.focus {
            Panel::ConfigForm => {
                "Tab panel · ↑↓ field · Enter edit · s save · r reload · o optimize · g start · t stop · q quit"
            }
            Panel::Documents => {
                "Tab panel · ↑↓ file · d delete · e rebuild · u upload · b rebuild all · f refresh · q quit"
            }
            Panel::Logs => "Tab panel · ↑↓ scroll · End follow · q quit",
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let mut spans = vec![Span::styled(
            self.hints(),
            Style::default().fg(palette::TEXT_SECONDARY),
        )];

        if self.state.pending.any() {
            spans.push(Span::styled(
                "  ⋯ working",
                Style::default().fg(palette::STATUS_YELLOW),
            ));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
