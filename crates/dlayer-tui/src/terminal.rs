//! Terminal lifecycle
//!
//! The terminal is switched to raw mode and the alternate screen for the whole
//! run. Both a normal exit and a panic must hand it back in a usable state.

use ratatui::DefaultTerminal;

/// Enter raw mode and the alternate screen, restoring them on panic
pub fn enter() -> DefaultTerminal {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        previous(info);
    }));
    ratatui::init()
}

/// Leave the alternate screen
pub fn leave() {
    ratatui::restore();
    tracing::debug!("Terminal restored");
}
