//! Main update function - handles state transitions (TEA pattern)

use crate::config::StartTab;
use crate::message::Message;
use crate::state::{AppPhase, AppState};

use super::{backend, controls, keys::handle_key, UpdateAction, UpdateResult};

/// Rows moved by PageUp/PageDown
const PAGE_ROWS: usize = 10;

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Tick => UpdateResult::none(),

        // ─────────────────────────────────────────────────────────
        // Navigation
        // ─────────────────────────────────────────────────────────
        Message::SelectNext => move_selection(state, 1),
        Message::SelectPrevious => move_selection(state, -1),
        Message::PageDown => move_selection(state, PAGE_ROWS as isize),
        Message::PageUp => move_selection(state, -(PAGE_ROWS as isize)),
        Message::SelectFirst => move_selection(state, isize::MIN),
        Message::SelectLast => move_selection(state, isize::MAX),

        Message::NextTab => {
            let tab = state.tab.next();
            show_tab(state, tab)
        }
        Message::PreviousTab => {
            let tab = state.tab.prev();
            show_tab(state, tab)
        }
        Message::ShowTab(tab) => show_tab(state, tab),

        Message::ToggleHelp => {
            state.show_help = !state.show_help;
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Control interaction
        // ─────────────────────────────────────────────────────────
        Message::Activate => controls::handle_activate(state),
        Message::Adjust(steps) => controls::handle_adjust(state, steps),
        Message::ExpandAll => {
            state.layer.view.set_all_expanded(true);
            UpdateResult::none()
        }
        Message::CollapseAll => {
            state.layer.view.set_all_expanded(false);
            state.layer.clamp_selection();
            UpdateResult::none()
        }
        Message::EditInput { text } => {
            if let Some(edit) = state.layer.editing.as_mut() {
                edit.buffer = text;
            }
            UpdateResult::none()
        }
        Message::CommitEdit => controls::handle_commit_edit(state),
        Message::CancelEdit => {
            state.layer.editing = None;
            UpdateResult::none()
        }
        Message::SyncSelected => controls::handle_sync_selected(state),

        // ─────────────────────────────────────────────────────────
        // Backend round trips
        // ─────────────────────────────────────────────────────────
        Message::Refresh => match state.tab {
            StartTab::Components => UpdateResult::message(Message::RefreshTree),
            StartTab::Extensions => UpdateResult::message(Message::RefreshExtensions),
            StartTab::Values => UpdateResult::message(Message::RefreshValues),
        },

        Message::RefreshTree => backend::handle_refresh_tree(state),
        Message::TreeFetched {
            generation,
            response,
        } => backend::handle_tree_fetched(state, generation, *response),

        Message::RefreshStatus => UpdateResult::action(UpdateAction::FetchStatus),
        Message::StatusFetched { status } => {
            state.status = Some(status);
            UpdateResult::none()
        }

        Message::RefreshExtensions => {
            state.extensions_loading = true;
            UpdateResult::action(UpdateAction::FetchExtensions)
        }
        Message::ExtensionsFetched { extensions } => {
            backend::handle_extensions_fetched(state, extensions)
        }

        Message::RefreshValues => {
            state.values_loading = true;
            UpdateResult::action(UpdateAction::FetchValues)
        }
        Message::ValuesFetched { values } => {
            state.values_loading = false;
            state.values = Some(*values);
            state.values_scroll = 0;
            UpdateResult::none()
        }

        Message::ValueWriteCompleted {
            generation,
            node_id,
            accepted,
            value,
            previous,
        } => backend::handle_write_completed(
            state,
            generation,
            node_id,
            accepted,
            &value,
            previous,
        ),

        Message::EventTriggered {
            node_id,
            event,
            accepted,
        } => backend::handle_event_triggered(state, node_id, event, accepted),

        Message::ValueFetched {
            generation,
            node_id,
            value,
        } => backend::handle_value_fetched(state, generation, node_id, value),

        Message::ClearLayer => {
            if state.layer_enabled() {
                UpdateResult::action(UpdateAction::Clear)
            } else {
                UpdateResult::none()
            }
        }
        Message::LayerCleared { accepted } => backend::handle_layer_cleared(state, accepted),
    }
}

fn show_tab(state: &mut AppState, tab: StartTab) -> UpdateResult {
    if state.tab == tab {
        return UpdateResult::none();
    }
    state.tab = tab;
    state.layer.editing = None;

    // Fetch lazily on first visit
    match tab {
        StartTab::Extensions if state.extensions.is_empty() && !state.extensions_loading => {
            UpdateResult::message(Message::RefreshExtensions)
        }
        StartTab::Values if state.values.is_none() && !state.values_loading => {
            UpdateResult::message(Message::RefreshValues)
        }
        _ => UpdateResult::none(),
    }
}

fn move_selection(state: &mut AppState, delta: isize) -> UpdateResult {
    let (len, selected) = match state.tab {
        StartTab::Components => (state.layer.rows().len(), &mut state.layer.selected),
        StartTab::Extensions => (state.extensions.len(), &mut state.extensions_selected),
        StartTab::Values => {
            let len = state.values.as_ref().map(|v| v.values.len()).unwrap_or(0);
            (len, &mut state.values_scroll)
        }
    };

    if len == 0 {
        *selected = 0;
        return UpdateResult::none();
    }
    *selected = selected.saturating_add_signed(delta).min(len - 1);
    UpdateResult::none()
}
