//! Documents table: the reconciled corpus listing.
//!
//! The widget is pure: it renders whatever snapshot the state holds. Columns
//! are fixed-width except the name, which takes the remaining space.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use ragmon_app::{AppState, Panel};

use crate::theme::{palette, styles};

// ── Column widths (characters) ───────────────────────────────────────────────

/// Size column width.
const COL_SIZE: u16 = 10;

/// Modified-date column width.
const COL_MODIFIED: u16 = 12;

/// Splitter-method column width.
const COL_SPLITTER: u16 = 14;

// Name column gets the remaining space.

pub struct DocumentsPanel<'a> {
    state: &'a AppState,
}

impl<'a> DocumentsPanel<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

impl Widget for DocumentsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let focused = self.state.focus == Panel::Documents;
        let title = format!("Documents ({})", self.state.files.len());
        let block = styles::panel_block(&title, focused);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 2 || inner.width == 0 {
            return;
        }

        let name_width = inner
            .width
            .saturating_sub(COL_SIZE + COL_MODIFIED + COL_SPLITTER);

        // Header row.
        let header_style = Style::default()
            .fg(palette::TEXT_SECONDARY)
            .add_modifier(Modifier::BOLD);
        let mut x = inner.x;
        buf.set_stringn(x, inner.y, "Name", name_width as usize, header_style);
        x += name_width;
        buf.set_stringn(x, inner.y, "Size", COL_SIZE as usize, header_style);
        x += COL_SIZE;
        buf.set_stringn(x, inner.y, "Modified", COL_MODIFIED as usize, header_style);
        x += COL_MODIFIED;
        buf.set_stringn(x, inner.y, "Splitter", COL_SPLITTER as usize, header_style);

        let rows_area_height = inner.height - 1;
        let visible = rows_area_height as usize;
        let first = self
            .state
            .file_cursor
            .saturating_sub(visible.saturating_sub(1));

        if self.state.files.is_empty() {
            buf.set_stringn(
                inner.x,
                inner.y + 1,
                "No documents. Press 'u' to upload, 'f' to refresh.",
                inner.width as usize,
                Style::default().fg(palette::TEXT_MUTED),
            );
            return;
        }

        for (row, (idx, file)) in self
            .state
            .files
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .enumerate()
        {
            let y = inner.y + 1 + row as u16;
            let style = if idx == self.state.file_cursor {
                styles::selected_row(focused)
            } else {
                Style::default().fg(palette::TEXT_PRIMARY)
            };

            // Clear the full row first so the selection bar spans it.
            buf.set_stringn(
                inner.x,
                y,
                " ".repeat(inner.width as usize),
                inner.width as usize,
                style,
            );

            let mut x = inner.x;
            buf.set_stringn(x, y, &file.name, name_width.saturating_sub(1) as usize, style);
            x += name_width;
            let size = if file.size.is_empty() {
                "-"
            } else {
                file.size.as_str()
            };
            buf.set_stringn(x, y, size, COL_SIZE as usize, style);
            x += COL_SIZE;
            let modified = if file.modified.is_empty() {
                "-"
            } else {
                file.modified.as_str()
            };
            buf.set_stringn(x, y, modified, COL_MODIFIED as usize, style);
            x += COL_MODIFIED;
            buf.set_stringn(
                x,
                y,
                file.splitter_method.label(),
                COL_SPLITTER as usize,
                style,
            );
        }
    }
}
