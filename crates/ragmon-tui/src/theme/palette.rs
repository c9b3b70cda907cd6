//! Color palette for the console.

#![allow(dead_code)]

use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Black;
pub const POPUP_BG: Color = Color::DarkGray;

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = Color::Cyan;

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Green;
pub const STATUS_RED: Color = Color::Red;
pub const STATUS_YELLOW: Color = Color::Yellow;
pub const STATUS_BLUE: Color = Color::Blue;

// --- Log level colors ---
pub const LOG_ERROR: Color = Color::Red;
pub const LOG_WARNING: Color = Color::Yellow;
pub const LOG_INFO: Color = Color::Green;
pub const LOG_INFO_MSG: Color = Color::White;
pub const LOG_DEBUG: Color = Color::DarkGray;

// --- Notices ---
pub const NOTICE_INFO_BG: Color = Color::Blue;
pub const NOTICE_SUCCESS_BG: Color = Color::Green;
pub const NOTICE_WARNING_BG: Color = Color::Yellow;
pub const NOTICE_ERROR_BG: Color = Color::Red;
