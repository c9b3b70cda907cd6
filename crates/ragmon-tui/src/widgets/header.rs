//! Header bar: title, backend address, service status, log channel state.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use ragmon_app::AppState;

use crate::theme::{palette, styles};

pub struct Header<'a> {
    state: &'a AppState,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::panel_block("ragmon", false);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let service = self.state.service;
        let channel = self.state.log_tail.channel();

        let line = Line::from(vec![
            Span::styled(
                "RAG console ",
                Style::default()
                    .fg(palette::TEXT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                self.state.settings.server.base_url.clone(),
                Style::default().fg(palette::TEXT_SECONDARY),
            ),
            Span::raw("  "),
            Span::styled("service: ", Style::default().fg(palette::TEXT_MUTED)),
            Span::styled(service.label(), styles::service_indicator(service)),
            Span::raw("  "),
            Span::styled("logs: ", Style::default().fg(palette::TEXT_MUTED)),
            Span::styled(
                channel.label(),
                Style::default().fg(match channel {
                    ragmon_app::ChannelState::Connected => palette::STATUS_GREEN,
                    ragmon_app::ChannelState::Connecting => palette::STATUS_YELLOW,
                    _ => palette::STATUS_RED,
                }),
            ),
        ]);

        Paragraph::new(line).render(inner, buf);
    }
}
