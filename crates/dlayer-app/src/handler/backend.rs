//! Handlers for backend round trips

use serde_json::Value;
use tracing::{debug, info};

use dlayer_core::{ComponentTreeResponse, ExtensionInfo};

use crate::compat::ExtensionSummary;
use crate::config::BindingMode;
use crate::message::Message;
use crate::renderer::binding::current_value;
use crate::renderer::ControlTree;
use crate::state::{AppState, LoadState};

use super::{UpdateAction, UpdateResult};

pub(crate) fn handle_refresh_tree(state: &mut AppState) -> UpdateResult {
    if !state.layer_enabled() {
        state.layer.load = LoadState::Disabled;
        return UpdateResult::none();
    }
    state.notice = None;
    let generation = state.layer.begin_fetch();
    UpdateResult::action(UpdateAction::FetchTree { generation })
}

/// Install a fetched snapshot, unless a newer fetch has been issued since
pub(crate) fn handle_tree_fetched(
    state: &mut AppState,
    generation: u64,
    response: ComponentTreeResponse,
) -> UpdateResult {
    if !state.layer.is_current_fetch(generation) {
        debug!(
            "Discarding tree from fetch {} (latest is {})",
            generation, state.layer.requested_generation
        );
        return UpdateResult::none();
    }

    if !response.active {
        info!(
            "Translation layer inactive: {}",
            response.message.as_deref().unwrap_or("no message")
        );
        state.layer.reset_view(
            LoadState::Inactive {
                message: response.message,
            },
            generation,
        );
        return UpdateResult::none();
    }

    state
        .layer
        .install(generation, &response.tree, &state.registry);
    info!("{}", state.layer.view.status_text());
    UpdateResult::none()
}

pub(crate) fn handle_extensions_fetched(
    state: &mut AppState,
    extensions: Vec<ExtensionInfo>,
) -> UpdateResult {
    state.extensions_loading = false;
    state.extensions = ExtensionSummary::from_infos(&extensions);
    state.extensions_selected = state
        .extensions_selected
        .min(state.extensions.len().saturating_sub(1));
    UpdateResult::none()
}

/// A write was answered. Rejections roll back only in revert mode, only
/// while the control tree the edit was made against is still shown, and only
/// if no later edit has replaced the rejected value.
pub(crate) fn handle_write_completed(
    state: &mut AppState,
    generation: u64,
    node_id: String,
    accepted: bool,
    value: &Value,
    previous: Value,
) -> UpdateResult {
    state.layer.pending_writes = state.layer.pending_writes.saturating_sub(1);

    if accepted {
        debug!("Backend confirmed value for {}", node_id);
        return UpdateResult::none();
    }

    let reverted = state.binding_mode() == BindingMode::RevertOnRejection
        && state.layer.is_rendered(generation)
        && holds_value(&state.layer.view.controls, &node_id, value)
        && state.layer.view.controls.apply_value(&node_id, &previous);

    state.notice = Some(if reverted {
        format!("Value for {node_id} rejected, reverted")
    } else {
        format!("Value for {node_id} not confirmed")
    });
    UpdateResult::none()
}

fn holds_value(controls: &ControlTree, node_id: &str, value: &Value) -> bool {
    controls
        .find_by_node(node_id)
        .and_then(|id| controls.get(id))
        .and_then(|control| current_value(&control.kind))
        .is_some_and(|current| current == *value)
}

pub(crate) fn handle_event_triggered(
    state: &mut AppState,
    node_id: String,
    event: String,
    accepted: bool,
) -> UpdateResult {
    state.notice = Some(if accepted {
        format!("{event} sent to {node_id}")
    } else {
        format!("{event} on {node_id} not confirmed")
    });
    UpdateResult::none()
}

pub(crate) fn handle_value_fetched(
    state: &mut AppState,
    generation: u64,
    node_id: String,
    value: Option<Value>,
) -> UpdateResult {
    if !state.layer.is_rendered(generation) {
        debug!("Ignoring value for {} from an older tree", node_id);
        return UpdateResult::none();
    }

    state.notice = Some(match value {
        Some(value) if state.layer.view.controls.apply_value(&node_id, &value) => {
            format!("Synced {node_id}")
        }
        Some(_) => format!("Value for {node_id} does not fit its control"),
        None => format!("No value for {node_id}"),
    });
    UpdateResult::none()
}

pub(crate) fn handle_layer_cleared(state: &mut AppState, accepted: bool) -> UpdateResult {
    if !accepted {
        state.notice = Some("Clear not confirmed".to_string());
        return UpdateResult::none();
    }
    info!("Backend component tree cleared");
    UpdateResult::message(Message::RefreshTree)
}
