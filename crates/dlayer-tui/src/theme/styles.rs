//! Semantic style builders.

use dlayer_app::state::LoadState;
use dlayer_core::Compatibility;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// "Black on Cyan" - focused+selected items
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn selected_row() -> Style {
    Style::default().bg(palette::SELECTED_ROW_BG)
}

pub fn edit_buffer() -> Style {
    Style::default()
        .fg(palette::TEXT_PRIMARY)
        .bg(palette::EDIT_BG)
}

pub fn placeholder() -> Style {
    Style::default()
        .fg(palette::PLACEHOLDER_FG)
        .add_modifier(Modifier::ITALIC)
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

pub fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_active())
        .style(Style::default().bg(palette::POPUP_BG))
}

// --- Domain styles ---

/// Header color for an extension section
pub fn compatibility(compatibility: Compatibility) -> Style {
    let color = match compatibility {
        Compatibility::Supported => palette::STATUS_GREEN,
        Compatibility::Unsupported => palette::STATUS_RED,
        Compatibility::Partial => palette::STATUS_YELLOW,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Status line color for the component view's load state
pub fn load_state(load: &LoadState) -> Style {
    match load {
        LoadState::Loaded => text_secondary(),
        LoadState::Loading => Style::default().fg(palette::STATUS_BLUE),
        LoadState::Inactive { .. } => Style::default().fg(palette::STATUS_YELLOW),
        LoadState::Disabled | LoadState::Idle => text_muted(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compatibility_colors_differ() {
        let supported = compatibility(Compatibility::Supported);
        let unsupported = compatibility(Compatibility::Unsupported);
        let partial = compatibility(Compatibility::Partial);
        assert_ne!(supported.fg, unsupported.fg);
        assert_ne!(supported.fg, partial.fg);
        assert!(supported.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_glass_block_focus_changes_border() {
        assert_ne!(border_active(), border_inactive());
    }

    #[test]
    fn test_inactive_load_is_highlighted() {
        let inactive = load_state(&LoadState::Inactive { message: None });
        assert_eq!(inactive.fg, Some(palette::STATUS_YELLOW));
        assert_eq!(load_state(&LoadState::Disabled).fg, Some(palette::TEXT_MUTED));
    }
}
