//! Color palette.
//!
//! Named terminal colors only, so the UI follows the user's terminal scheme.

use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Black;
pub const POPUP_BG: Color = Color::Rgb(28, 33, 43);
pub const SELECTED_ROW_BG: Color = Color::Rgb(30, 40, 56);

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = Color::Cyan;

// --- Accent ---
pub const ACCENT: Color = Color::Cyan;
pub const ACCENT_DIM: Color = Color::DarkGray;
pub const CONTRAST_FG: Color = Color::Black;

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Green;
pub const STATUS_RED: Color = Color::Red;
pub const STATUS_YELLOW: Color = Color::Yellow;
pub const STATUS_BLUE: Color = Color::Blue;

// --- Controls ---
pub const SLIDER_FILL: Color = Color::Cyan;
pub const SLIDER_TRACK: Color = Color::DarkGray;
pub const EDIT_BG: Color = Color::Rgb(60, 60, 80);
pub const PLACEHOLDER_FG: Color = Color::Magenta;
