//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Each backend call runs in its own tokio task and reports back with a
//! [`Message`]. Calls go through the degrading [`TranslationLayer`] API, so a
//! task always produces its completion message.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use dlayer_client::TranslationLayer;

use crate::handler::UpdateAction;
use crate::message::Message;

/// Execute an action by spawning a background task
pub fn handle_action<L>(action: UpdateAction, layer: Arc<L>, msg_tx: mpsc::Sender<Message>)
where
    L: TranslationLayer + Sync + 'static,
{
    match action {
        UpdateAction::FetchTree { generation } => {
            tokio::spawn(async move {
                let response = layer.fetch_tree().await;
                send(
                    &msg_tx,
                    Message::TreeFetched {
                        generation,
                        response: Box::new(response),
                    },
                )
                .await;
            });
        }

        UpdateAction::FetchStatus => {
            tokio::spawn(async move {
                let status = layer.fetch_status().await;
                send(&msg_tx, Message::StatusFetched { status }).await;
            });
        }

        UpdateAction::FetchExtensions => {
            tokio::spawn(async move {
                let extensions = layer.fetch_extensions_with_compatibility().await;
                send(&msg_tx, Message::ExtensionsFetched { extensions }).await;
            });
        }

        UpdateAction::FetchValues => {
            tokio::spawn(async move {
                let values = layer.fetch_extension_values().await;
                send(
                    &msg_tx,
                    Message::ValuesFetched {
                        values: Box::new(values),
                    },
                )
                .await;
            });
        }

        UpdateAction::SetValue {
            generation,
            node_id,
            value,
            previous,
        } => {
            tokio::spawn(async move {
                let accepted = layer.set_value(&node_id, value.clone()).await;
                send(
                    &msg_tx,
                    Message::ValueWriteCompleted {
                        generation,
                        node_id,
                        accepted,
                        value,
                        previous,
                    },
                )
                .await;
            });
        }

        UpdateAction::TriggerEvent { node_id, event } => {
            tokio::spawn(async move {
                let accepted = layer.trigger_event(&node_id, &event, None).await;
                send(
                    &msg_tx,
                    Message::EventTriggered {
                        node_id,
                        event,
                        accepted,
                    },
                )
                .await;
            });
        }

        UpdateAction::FetchValue {
            generation,
            node_id,
        } => {
            tokio::spawn(async move {
                let value = layer.fetch_value(&node_id).await;
                send(
                    &msg_tx,
                    Message::ValueFetched {
                        generation,
                        node_id,
                        value,
                    },
                )
                .await;
            });
        }

        UpdateAction::Clear => {
            tokio::spawn(async move {
                let accepted = layer.clear().await;
                send(&msg_tx, Message::LayerCleared { accepted }).await;
            });
        }
    }
}

async fn send(msg_tx: &mpsc::Sender<Message>, message: Message) {
    if msg_tx.send(message).await.is_err() {
        // Receiver gone: the app is shutting down
        debug!("Dropping backend result, message loop closed");
    }
}

/// Queue the startup refreshes (status, tree, extensions)
pub fn queue_startup_fetches(msg_tx: &mpsc::Sender<Message>) {
    for message in [
        Message::RefreshStatus,
        Message::RefreshTree,
        Message::RefreshExtensions,
    ] {
        if let Err(e) = msg_tx.try_send(message) {
            warn!("Failed to queue startup fetch: {}", e);
        }
    }
}
