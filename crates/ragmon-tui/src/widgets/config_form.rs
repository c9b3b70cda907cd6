//! Configuration form panel.
//!
//! One row per declared field: label, value, and the dot-path name dimmed.
//! The row under the cursor is highlighted; an active edit buffer replaces
//! the value with the in-progress text and a cursor marker.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
};

use ragmon_app::{AppState, Panel};

use crate::theme::{palette, styles};

/// Width reserved for field labels.
const LABEL_WIDTH: usize = 22;

pub struct ConfigFormPanel<'a> {
    state: &'a AppState,
}

impl<'a> ConfigFormPanel<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

impl Widget for ConfigFormPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let focused = self.state.focus == Panel::ConfigForm;
        let block = styles::panel_block("Configuration", focused);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let form = &self.state.form;
        let visible = inner.height as usize;

        // Keep the cursor in view.
        let first = form.cursor.saturating_sub(visible.saturating_sub(1));

        for (row, (idx, field)) in form
            .fields()
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .enumerate()
        {
            let y = inner.y + row as u16;
            let selected = idx == form.cursor;

            let editing_here = form
                .editing
                .as_ref()
                .filter(|e| e.field_index == idx)
                .map(|e| format!("{}▏", e.text));
            let value = editing_here.unwrap_or_else(|| field.display_value());

            let label = format!("{:<LABEL_WIDTH$}", truncate(field.label, LABEL_WIDTH));
            let text = format!("{label} {value}");

            let style = if selected {
                styles::selected_row(focused)
            } else {
                Style::default().fg(palette::TEXT_PRIMARY)
            };
            buf.set_stringn(inner.x, y, &text, inner.width as usize, style);

            // Dot-path name, right-aligned and dimmed, when there is room.
            let name = field.name();
            let used = text.chars().count() as u16;
            let name_len = name.chars().count() as u16;
            if !selected && used + name_len + 2 <= inner.width {
                buf.set_string(
                    inner.x + inner.width - name_len,
                    y,
                    &name,
                    Style::default().fg(palette::TEXT_MUTED),
                );
            }
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
