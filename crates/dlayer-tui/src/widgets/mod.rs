//! Custom widget components

mod control_list;
mod extension_list;
mod help;
mod status_bar;
mod tabs;
mod values_panel;

pub use control_list::{format_number, slider_bar, ControlList};
pub use extension_list::ExtensionList;
pub use help::HelpOverlay;
pub use status_bar::StatusBar;
pub use tabs::HeaderWithTabs;
pub use values_panel::ValuesPanel;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate `text` to at most `max_width` terminal columns, ending in `…`
/// when something was cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// First row of a window of `height` rows that keeps `selected` visible
pub fn scroll_offset(selected: usize, total: usize, height: usize) -> usize {
    if height == 0 || total <= height {
        return 0;
    }
    selected
        .saturating_add(1)
        .saturating_sub(height)
        .min(total - height)
}
