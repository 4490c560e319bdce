//! Message processing
//!
//! Runs a message through the TEA update function, dispatching each returned
//! action and following up chained messages until the chain ends.

use std::sync::Arc;

use tokio::sync::mpsc;

use dlayer_client::TranslationLayer;

use crate::actions::handle_action;
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message<L>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    layer: &Arc<L>,
) where
    L: TranslationLayer + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, Arc::clone(layer), msg_tx.clone());
        }

        // Continue with follow-up message
        msg = result.message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BindingMode, Settings};
    use crate::renderer::ControlKind;
    use crate::state::LoadState;
    use dlayer_client::test_utils::{sample_tree, FakeLayer};
    use dlayer_core::ComponentTreeResponse;
    use serde_json::json;
    use std::collections::VecDeque;

    /// Feed `message` in, then every completion it causes, until nothing is left
    async fn run(state: &mut AppState, layer: &Arc<FakeLayer>, message: Message) {
        let mut pending = VecDeque::from([message]);
        while let Some(message) = pending.pop_front() {
            let (tx, mut rx) = mpsc::channel(32);
            process_message(state, message, &tx, layer);
            drop(tx);

            // Spawned tasks hold sender clones; the channel closes once all finish
            while let Some(next) = rx.recv().await {
                pending.push_back(next);
            }
        }
    }

    #[tokio::test]
    async fn test_refresh_renders_tree() {
        let layer = Arc::new(FakeLayer::new().with_tree(sample_tree()));
        let mut state = AppState::new(Settings::default());

        run(&mut state, &layer, Message::RefreshTree).await;

        assert_eq!(state.layer.load, LoadState::Loaded);
        assert_eq!(state.layer.view.controls.len(), 3);
        assert_eq!(
            state.status_line(),
            "Loaded 1 extensions with 3 components"
        );
    }

    #[tokio::test]
    async fn test_inactive_backend_renders_nothing() {
        let layer = Arc::new(FakeLayer::new());
        layer.set_tree(ComponentTreeResponse::inactive(
            "Translation layer not initialized",
        ));
        let mut state = AppState::new(Settings::default());

        run(&mut state, &layer, Message::RefreshTree).await;

        assert_eq!(state.layer.view.controls.interactive_count(), 0);
        assert!(state.layer.view.is_empty());
        assert_eq!(state.status_line(), "Translation layer not initialized");
    }

    #[tokio::test]
    async fn test_rejected_write_reverts_in_revert_mode() {
        let layer = Arc::new(FakeLayer::new().with_tree(sample_tree()));
        let mut settings = Settings::default();
        settings.bindings.revert_on_rejection = true;
        let mut state = AppState::new(settings);
        assert_eq!(state.binding_mode(), BindingMode::RevertOnRejection);

        run(&mut state, &layer, Message::RefreshTree).await;
        state.layer.view.set_all_expanded(true);
        // rows: section, r, a, b
        state.layer.selected = 3;

        layer.reject_writes(true);
        run(&mut state, &layer, Message::Activate).await;

        let b = state.layer.view.controls.find_by_node("b").unwrap();
        assert!(matches!(
            state.layer.view.controls.get(b).unwrap().kind,
            ControlKind::Checkbox { checked: true, .. }
        ));
        assert_eq!(layer.writes(), vec![("b".to_string(), json!(false))]);
        assert_eq!(state.layer.pending_writes, 0);
        assert!(state.status_line().ends_with("Value for b rejected, reverted"));
    }

    #[tokio::test]
    async fn test_clear_refetches() {
        let layer = Arc::new(FakeLayer::new().with_tree(sample_tree()));
        let mut state = AppState::new(Settings::default());
        run(&mut state, &layer, Message::RefreshTree).await;

        run(&mut state, &layer, Message::ClearLayer).await;

        // FakeLayer empties its tree on clear; the refetch sees an empty snapshot
        assert!(state.layer.view.is_empty());
        assert_eq!(state.status_line(), "No extension components found.");
    }
}
