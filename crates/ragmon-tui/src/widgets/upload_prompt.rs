//! Upload path prompt: the console's stand-in for a file picker.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget},
};

use ragmon_app::state::UploadInputState;

use crate::layout::centered_rect;
use crate::theme::{palette, styles};

pub struct UploadPrompt<'a> {
    input: &'a UploadInputState,
}

impl<'a> UploadPrompt<'a> {
    pub fn new(input: &'a UploadInputState) -> Self {
        Self { input }
    }
}

impl Widget for UploadPrompt<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = area.width.saturating_mul(2) / 3;
        let rect = centered_rect(width.max(40), 6, area);

        Clear.render(rect, buf);

        let block = styles::panel_block("Upload files", true)
            .style(Style::default().bg(palette::POPUP_BG));
        let inner = block.inner(rect);
        block.render(rect, buf);

        let lines = vec![
            Line::from(Span::styled(
                "Local paths, space-separated:",
                Style::default().fg(palette::TEXT_SECONDARY),
            )),
            Line::from(vec![
                Span::styled("> ", Style::default().fg(palette::BORDER_ACTIVE)),
                Span::styled(
                    format!("{}▏", self.input.buffer),
                    Style::default().fg(palette::TEXT_PRIMARY),
                ),
            ]),
            Line::from(Span::styled(
                "Enter upload · Esc cancel",
                Style::default().fg(palette::TEXT_MUTED),
            )),
        ];

        Paragraph::new(lines).render(inner, buf);
    }
}
