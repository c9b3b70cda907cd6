//! Screen layout definitions for the TUI
//!
//! Header on top, config form on the left, documents and logs stacked on
//! the right, key hints at the bottom.

use ratatui::layout::{Constraint, Layout, Rect};

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Header (title + service status + channel state)
    pub header: Rect,

    /// Configuration form panel
    pub form: Rect,

    /// Documents table panel
    pub documents: Rect,

    /// Log tail panel
    pub logs: Rect,

    /// Bottom key-hint bar
    pub status: Rect,
}

/// Create the main screen layout
pub fn create(area: Rect) -> ScreenAreas {
    let rows = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(10),   // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    let columns = Layout::horizontal([
        Constraint::Percentage(42), // Config form
        Constraint::Percentage(58), // Documents + logs
    ])
    .split(rows[1]);

    let right = Layout::vertical([
        Constraint::Percentage(45), // Documents
        Constraint::Percentage(55), // Logs
    ])
    .split(columns[1]);

    ScreenAreas {
        header: rows[0],
        form: columns[0],
        documents: right[0],
        logs: right[1],
        status: rows[2],
    }
}

/// Centered rect for modal dialogs, clamped to the screen.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
