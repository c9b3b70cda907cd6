//! Notification stack rendered over the top-right corner.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Clear, Widget},
};

use ragmon_app::NotificationCenter;

use crate::theme::styles;

/// Minimum card width so short messages still read as cards.
const MIN_WIDTH: u16 = 24;

/// Gap kept from the right screen edge.
const RIGHT_MARGIN: u16 = 2;

pub struct NoticeStack<'a> {
    notices: &'a NotificationCenter,
}

impl<'a> NoticeStack<'a> {
    pub fn new(notices: &'a NotificationCenter) -> Self {
        Self { notices }
    }
}

impl Widget for NoticeStack<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.notices.is_empty() || area.width <= MIN_WIDTH {
            return;
        }

        let max_width = (area.width / 2).max(MIN_WIDTH);
        let mut y = area.y + 1;

        for notice in self.notices.iter() {
            if y >= area.y + area.height {
                break;
            }

            let text = format!(" {} ", notice.text);
            let width = (text.chars().count() as u16).clamp(MIN_WIDTH, max_width);
            if width + RIGHT_MARGIN > area.width {
                break;
            }
            let x = area.x + area.width - width - RIGHT_MARGIN;
            let card = Rect::new(x, y, width, 1);

            Clear.render(card, buf);
            buf.set_stringn(card.x, card.y, &text, width as usize, styles::notice(notice.kind));

            y += 1;
        }
    }
}
