//! Shared style helpers built on the palette.

use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use ragmon_app::{NoticeKind, ServiceState};
use ragmon_core::LogLevel;

use super::palette;

/// Bordered panel block; the focused panel gets the accent border.
pub fn panel_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(palette::BORDER_ACTIVE)
    } else {
        Style::default().fg(palette::BORDER_DIM)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .title(format!(" {title} "))
}

/// Style for the selected row/field in a focused panel.
pub fn selected_row(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(palette::DEEPEST_BG)
            .bg(palette::BORDER_ACTIVE)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    }
}

/// Service lifecycle indicator style.
pub fn service_indicator(service: ServiceState) -> Style {
    let color = match service {
        ServiceState::Running => palette::STATUS_GREEN,
        ServiceState::Stopped => palette::STATUS_RED,
        ServiceState::Starting | ServiceState::Stopping => palette::STATUS_YELLOW,
        ServiceState::Unknown => palette::TEXT_MUTED,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Per-level style for a log line's level tag.
pub fn log_level(level: LogLevel) -> Style {
    let color = match level {
        LogLevel::Error => palette::LOG_ERROR,
        LogLevel::Warn => palette::LOG_WARNING,
        LogLevel::Info => palette::LOG_INFO,
        LogLevel::Debug => palette::LOG_DEBUG,
    };
    Style::default().fg(color)
}

/// Background style for a notice card.
pub fn notice(kind: NoticeKind) -> Style {
    let bg = match kind {
        NoticeKind::Info => palette::NOTICE_INFO_BG,
        NoticeKind::Success => palette::NOTICE_SUCCESS_BG,
        NoticeKind::Warning => palette::NOTICE_WARNING_BG,
        NoticeKind::Error => palette::NOTICE_ERROR_BG,
    };
    Style::default().fg(palette::TEXT_PRIMARY).bg(bg)
}
