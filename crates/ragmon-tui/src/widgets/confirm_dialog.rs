//! Modal confirmation dialog for destructive actions.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget, Wrap},
};

use ragmon_app::confirm::ConfirmDialogState;

use crate::layout::centered_rect;
use crate::theme::{palette, styles};

pub struct ConfirmDialog<'a> {
    dialog: &'a ConfirmDialogState,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(dialog: &'a ConfirmDialogState) -> Self {
        Self { dialog }
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let min_width = 30.min(area.width);
        let width = (self.dialog.message.chars().count() as u16 + 6).clamp(min_width, area.width);
        let rect = centered_rect(width, 7, area);

        Clear.render(rect, buf);

        let block = styles::panel_block(&self.dialog.title, true)
            .style(Style::default().bg(palette::POPUP_BG));
        let inner = block.inner(rect);
        block.render(rect, buf);

        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                self.dialog.message.clone(),
                Style::default().fg(palette::TEXT_PRIMARY),
            )),
            Line::raw(""),
            Line::from(vec![
                Span::styled(
                    "[y] confirm",
                    Style::default()
                        .fg(palette::STATUS_GREEN)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("   "),
                Span::styled(
                    "[n] cancel",
                    Style::default()
                        .fg(palette::STATUS_RED)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
