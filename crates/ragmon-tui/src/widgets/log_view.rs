//! Operations log panel: the bounded tail, newest entry pinned.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use ragmon_app::{AppState, Panel};

use crate::theme::{palette, styles};

pub struct LogPanel<'a> {
    state: &'a AppState,
}

impl<'a> LogPanel<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

impl Widget for LogPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let focused = self.state.focus == Panel::Logs;
        let tail = &self.state.log_tail;

        let title = if tail.is_pinned() {
            "Logs".to_string()
        } else {
            format!("Logs (scrolled, End to follow) -{}", tail.scroll_back())
        };
        let block = styles::panel_block(&title, focused);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let visible = inner.height as usize;
        let total = tail.len();

        // Window ends at the newest record unless scrolled back.
        let end = total.saturating_sub(tail.scroll_back());
        let start = end.saturating_sub(visible);

        let lines: Vec<Line> = tail
            .records()
            .skip(start)
            .take(end - start)
            .map(|record| {
                Line::from(vec![
                    Span::styled(
                        format!("{} ", record.timestamp),
                        Style::default().fg(palette::TEXT_MUTED),
                    ),
                    Span::styled(
                        format!("{}: ", record.level.as_str()),
                        styles::log_level(record.level),
                    ),
                    Span::styled(
                        record.message.clone(),
                        Style::default().fg(palette::LOG_INFO_MSG),
                    ),
                ])
            })
            .collect();

        if lines.is_empty() {
            buf.set_stringn(
                inner.x,
                inner.y,
                "Waiting for log records…",
                inner.width as usize,
                Style::default().fg(palette::TEXT_MUTED),
            );
            return;
        }

        Paragraph::new(lines).render(inner, buf);
    }
}
