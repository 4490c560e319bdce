//! Main render/view function (View in TEA pattern)

use dlayer_app::config::StartTab;
use dlayer_app::state::AppState;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::theme::palette;
use crate::{layout, widgets};

/// Render the complete UI (View function in TEA)
///
/// Pure with respect to `state`: scrolling is derived from the selection on
/// every frame.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let areas = layout::create(area);
    frame.render_widget(widgets::HeaderWithTabs::new(state), areas.header);

    match state.tab {
        StartTab::Components => {
            frame.render_widget(widgets::ControlList::new(&state.layer), areas.body);
        }
        StartTab::Extensions => {
            frame.render_widget(
                widgets::ExtensionList::new(&state.extensions, state.extensions_selected)
                    .loading(state.extensions_loading),
                areas.body,
            );
        }
        StartTab::Values => {
            frame.render_widget(widgets::ValuesPanel::new(state), areas.body);
        }
    }

    frame.render_widget(widgets::StatusBar::new(state), areas.status);

    if state.show_help {
        frame.render_widget(widgets::HelpOverlay, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::loaded_state;
    use dlayer_app::config::Settings;
    use dlayer_client::test_utils::sample_tree;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| view(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_components_tab() {
        let text = draw(&loaded_state(sample_tree()));
        assert!(text.contains("Components"));
        assert!(text.contains("Scale: 5.00"));
        assert!(text.contains("Loaded 1 extensions with 3 components"));
    }

    #[test]
    fn test_extensions_tab_replaces_body() {
        let mut state = loaded_state(sample_tree());
        state.tab = StartTab::Extensions;
        let text = draw(&state);
        assert!(!text.contains("Scale: 5.00"));
        assert!(text.contains("No extensions reported by the backend"));
    }

    #[test]
    fn test_help_overlay_drawn_on_top() {
        let mut state = AppState::new(Settings::default());
        state.show_help = true;
        let text = draw(&state);
        assert!(text.contains("expand / collapse all"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let state = loaded_state(sample_tree());
        let mut terminal = Terminal::new(TestBackend::new(10, 3)).unwrap();
        terminal.draw(|f| view(f, &state)).unwrap();
    }
}
