//! Main TUI runner - entry point and event loop

use std::sync::Arc;

use tokio::sync::mpsc;

use dlayer_app::actions::queue_startup_fetches;
use dlayer_app::config::Settings;
use dlayer_app::message::Message;
use dlayer_app::process::process_message;
use dlayer_app::state::AppState;
use dlayer_client::{TranslationLayer, TranslationLayerClient};
use dlayer_core::prelude::*;

use crate::{event, render, terminal};

/// Run the TUI against the backend described by `settings`
pub async fn run(settings: Settings) -> Result<()> {
    let config = settings
        .client_config()
        .context("Invalid backend settings")?;
    let client = TranslationLayerClient::new(config).context("Failed to create HTTP client")?;
    info!(
        "Connecting to translation layer at {} (revert on rejection: {})",
        client.base_url(),
        settings.bindings.revert_on_rejection
    );
    let layer = Arc::new(client);

    let mut state = AppState::new(settings);
    let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);

    if state.layer_enabled() {
        queue_startup_fetches(&msg_tx);
    } else {
        info!("Translation layer disabled in settings, skipping startup fetches");
    }

    let mut term = terminal::enter();
    let result = run_loop(&mut term, &mut state, msg_rx, msg_tx, &layer);
    terminal::leave();

    if let Err(ref e) = result {
        error!("TUI loop failed: {:?}", e);
    }
    result
}

/// Main event loop
fn run_loop<L>(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    mut msg_rx: mpsc::Receiver<Message>,
    msg_tx: mpsc::Sender<Message>,
    layer: &Arc<L>,
) -> Result<()>
where
    L: TranslationLayer + Sync + 'static,
{
    while !state.should_quit() {
        // Completions from backend tasks
        while let Ok(msg) = msg_rx.try_recv() {
            process_message(state, msg, &msg_tx, layer);
        }

        terminal.draw(|frame| render::view(frame, state))?;

        if let Some(message) = event::poll()? {
            process_message(state, message, &msg_tx, layer);
        }
    }

    info!("Quit requested, leaving event loop");
    Ok(())
}
