//! Test helpers for widget rendering

use dlayer_app::config::Settings;
use dlayer_app::state::{AppState, LayerViewState};
use dlayer_app::BuilderRegistry;
use dlayer_core::ComponentTree;
use ratatui::{backend::TestBackend, buffer::Buffer, widgets::Widget, Terminal};

/// Render a widget into a fresh `width` x `height` buffer
pub fn render_widget(widget: impl Widget, width: u16, height: u16) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|f| f.render_widget(widget, f.area()))
        .unwrap();
    terminal.backend().buffer().clone()
}

/// All cell symbols, row after row
pub fn buffer_text(buf: &Buffer) -> String {
    buf.content.iter().map(|c| c.symbol()).collect()
}

/// One string per buffer row
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let width = buf.area.width as usize;
    buf.content
        .chunks(width)
        .map(|row| row.iter().map(|c| c.symbol()).collect())
        .collect()
}

/// Component view with `tree` installed as generation 1, all sections open
pub fn loaded_layer(tree: ComponentTree) -> LayerViewState {
    let mut layer = LayerViewState::default();
    let generation = layer.begin_fetch();
    layer.install(generation, &tree, &BuilderRegistry::with_defaults());
    layer.view.set_all_expanded(true);
    layer
}

/// App state showing `tree` on the Components tab
pub fn loaded_state(tree: ComponentTree) -> AppState {
    let mut state = AppState::new(Settings::default());
    state.layer = loaded_layer(tree);
    state
}
