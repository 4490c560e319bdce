//! Tests for the update function and key handling

use serde_json::json;

use dlayer_client::test_utils::{sample_tree, tree_with, SAMPLE_EXTENSION};
use dlayer_core::{ComponentNode, ComponentTreeResponse, ExtensionInfo};

use super::*;
use crate::config::{Settings, StartTab};
use crate::input_key::InputKey;
use crate::renderer::ControlKind;
use crate::state::{AppPhase, AppState, LoadState};

fn active(tree: dlayer_core::ComponentTree) -> Box<ComponentTreeResponse> {
    Box::new(ComponentTreeResponse {
        active: true,
        message: None,
        tree,
    })
}

/// State with `sample_tree()` rendered at generation 1 and its section expanded
fn loaded_state(settings: Settings) -> AppState {
    let mut state = AppState::new(settings);
    let result = update(&mut state, Message::RefreshTree);
    assert_eq!(
        result.action,
        Some(UpdateAction::FetchTree { generation: 1 })
    );
    update(
        &mut state,
        Message::TreeFetched {
            generation: 1,
            response: active(sample_tree()),
        },
    );
    state.layer.view.set_all_expanded(true);
    state
}

fn select_node(state: &mut AppState, node_id: &str) {
    let id = state.layer.view.controls.find_by_node(node_id).unwrap();
    state.layer.selected = state
        .layer
        .rows()
        .iter()
        .position(|row| matches!(row, crate::compat::ViewRow::Control { id: c, .. } if *c == id))
        .unwrap();
}

fn kind_of<'a>(state: &'a AppState, node_id: &str) -> &'a ControlKind {
    let id = state.layer.view.controls.find_by_node(node_id).unwrap();
    &state.layer.view.controls.get(id).unwrap().kind
}

// ─────────────────────────────────────────────────────────
// Tree fetches
// ─────────────────────────────────────────────────────────

#[test]
fn test_stale_tree_is_discarded() {
    let mut state = AppState::new(Settings::default());
    update(&mut state, Message::RefreshTree);
    update(&mut state, Message::RefreshTree);

    let other = tree_with(
        SAMPLE_EXTENSION,
        &["x"],
        vec![ComponentNode::new("x", "button")],
    );

    // Latest fetch lands first, then the older one
    update(
        &mut state,
        Message::TreeFetched {
            generation: 2,
            response: active(sample_tree()),
        },
    );
    update(
        &mut state,
        Message::TreeFetched {
            generation: 1,
            response: active(other),
        },
    );

    assert!(state.layer.view.controls.find_by_node("a").is_some());
    assert!(state.layer.view.controls.find_by_node("x").is_none());
    assert!(state.layer.is_rendered(2));
}

#[test]
fn test_inactive_response_clears_view() {
    let mut state = loaded_state(Settings::default());
    update(&mut state, Message::RefreshTree);
    update(
        &mut state,
        Message::TreeFetched {
            generation: 2,
            response: Box::new(ComponentTreeResponse::inactive("Backend restarting")),
        },
    );

    assert!(state.layer.view.controls.is_empty());
    assert_eq!(state.layer.view.controls.interactive_count(), 0);
    assert_eq!(state.status_line(), "Backend restarting");
}

#[test]
fn test_disabled_layer_skips_fetch() {
    let mut settings = Settings::default();
    settings.backend.enable_translation_layer = false;
    let mut state = AppState::new(settings);

    let result = update(&mut state, Message::RefreshTree);
    assert!(result.action.is_none());
    assert_eq!(state.layer.load, LoadState::Disabled);

    assert!(update(&mut state, Message::ClearLayer).action.is_none());
}

// ─────────────────────────────────────────────────────────
// Bindings
// ─────────────────────────────────────────────────────────

#[test]
fn test_slider_adjust_sends_value() {
    let mut state = loaded_state(Settings::default());
    select_node(&mut state, "a");

    let result = update(&mut state, Message::Adjust(2));
    assert_eq!(
        result.action,
        Some(UpdateAction::SetValue {
            generation: 1,
            node_id: "a".into(),
            value: json!(7),
            previous: json!(5),
        })
    );
    assert_eq!(state.layer.pending_writes, 1);
    assert_eq!(kind_of(&state, "a").display_label(), "Scale: 7.00");
}

#[test]
fn test_fire_and_forget_keeps_optimistic_value() {
    let mut state = loaded_state(Settings::default());
    select_node(&mut state, "b");
    update(&mut state, Message::Activate);

    update(
        &mut state,
        Message::ValueWriteCompleted {
            generation: 1,
            node_id: "b".into(),
            accepted: false,
            value: json!(false),
            previous: json!(true),
        },
    );

    assert!(matches!(
        kind_of(&state, "b"),
        ControlKind::Checkbox { checked: false, .. }
    ));
    assert!(state.status_line().ends_with("Value for b not confirmed"));
    assert_eq!(state.layer.pending_writes, 0);
}

#[test]
fn test_revert_skipped_after_rerender() {
    let mut settings = Settings::default();
    settings.bindings.revert_on_rejection = true;
    let mut state = loaded_state(settings);
    select_node(&mut state, "b");
    update(&mut state, Message::Activate);

    // A new snapshot arrives before the rejection
    update(&mut state, Message::RefreshTree);
    let mut fresh = sample_tree();
    if let Some(ext) = fresh.extensions.get_mut(SAMPLE_EXTENSION) {
        if let Some(node) = ext.components.get_mut("b") {
            node.props.insert("value".into(), json!(false));
        }
    }
    update(
        &mut state,
        Message::TreeFetched {
            generation: 2,
            response: active(fresh),
        },
    );

    update(
        &mut state,
        Message::ValueWriteCompleted {
            generation: 1,
            node_id: "b".into(),
            accepted: false,
            value: json!(false),
            previous: json!(true),
        },
    );

    assert!(matches!(
        kind_of(&state, "b"),
        ControlKind::Checkbox { checked: false, .. }
    ));
    assert!(state.status_line().ends_with("Value for b not confirmed"));
}

#[test]
fn test_rejection_superseded_by_later_edit_is_not_reverted() {
    let mut settings = Settings::default();
    settings.bindings.revert_on_rejection = true;
    let mut state = loaded_state(settings);
    select_node(&mut state, "a");
    update(&mut state, Message::Adjust(1));
    update(&mut state, Message::Adjust(1));

    // First write (5 -> 6) rejected after the second (6 -> 7) was made
    update(
        &mut state,
        Message::ValueWriteCompleted {
            generation: 1,
            node_id: "a".into(),
            accepted: false,
            value: json!(6),
            previous: json!(5),
        },
    );
    assert_eq!(kind_of(&state, "a").display_label(), "Scale: 7.00");
    assert!(state.status_line().ends_with("Value for a not confirmed"));

    update(
        &mut state,
        Message::ValueWriteCompleted {
            generation: 1,
            node_id: "a".into(),
            accepted: false,
            value: json!(7),
            previous: json!(6),
        },
    );
    assert_eq!(kind_of(&state, "a").display_label(), "Scale: 6.00");
    assert!(state.status_line().ends_with("Value for a rejected, reverted"));
    assert_eq!(state.layer.pending_writes, 0);
}

#[test]
fn test_accepted_write_leaves_no_notice() {
    let mut state = loaded_state(Settings::default());
    update(
        &mut state,
        Message::ValueWriteCompleted {
            generation: 1,
            node_id: "a".into(),
            accepted: true,
            value: json!(7),
            previous: json!(5),
        },
    );
    assert!(state.notice.is_none());
}

#[test]
fn test_button_triggers_click() {
    let tree = tree_with(
        SAMPLE_EXTENSION,
        &["go"],
        vec![ComponentNode::new("go", "button").with_prop("value", "Generate")],
    );
    let mut state = AppState::new(Settings::default());
    update(&mut state, Message::RefreshTree);
    update(
        &mut state,
        Message::TreeFetched {
            generation: 1,
            response: active(tree),
        },
    );
    state.layer.view.set_all_expanded(true);
    select_node(&mut state, "go");

    let result = update(&mut state, Message::Activate);
    assert_eq!(
        result.action,
        Some(UpdateAction::TriggerEvent {
            node_id: "go".into(),
            event: "click".into(),
        })
    );

    update(
        &mut state,
        Message::EventTriggered {
            node_id: "go".into(),
            event: "click".into(),
            accepted: true,
        },
    );
    assert!(state.status_line().ends_with("click sent to go"));
}

#[test]
fn test_sync_selected_applies_value() {
    let mut state = loaded_state(Settings::default());
    select_node(&mut state, "a");

    let result = update(&mut state, Message::SyncSelected);
    assert_eq!(
        result.action,
        Some(UpdateAction::FetchValue {
            generation: 1,
            node_id: "a".into(),
        })
    );

    update(
        &mut state,
        Message::ValueFetched {
            generation: 1,
            node_id: "a".into(),
            value: Some(json!(9)),
        },
    );
    assert_eq!(kind_of(&state, "a").display_label(), "Scale: 9.00");
}

// ─────────────────────────────────────────────────────────
// Sections and editing
// ─────────────────────────────────────────────────────────

#[test]
fn test_activate_on_section_toggles_it() {
    let mut state = loaded_state(Settings::default());
    state.layer.selected = 0;

    update(&mut state, Message::Activate);
    assert!(!state.layer.view.sections[0].expanded);
    assert_eq!(state.layer.rows().len(), 1);

    update(&mut state, Message::Adjust(1));
    assert!(state.layer.view.sections[0].expanded);
}

#[test]
fn test_number_edit_flow() {
    let tree = tree_with(
        SAMPLE_EXTENSION,
        &["seed"],
        vec![ComponentNode::new("seed", "number")
            .with_prop("label", "Seed")
            .with_prop("value", -1)],
    );
    let mut state = AppState::new(Settings::default());
    update(&mut state, Message::RefreshTree);
    update(
        &mut state,
        Message::TreeFetched {
            generation: 1,
            response: active(tree),
        },
    );
    state.layer.view.set_all_expanded(true);
    select_node(&mut state, "seed");

    update(&mut state, Message::Activate);
    assert_eq!(state.layer.editing.as_ref().unwrap().buffer, "-1");
    assert!(state.is_editing());

    // Keys go to the buffer while editing
    assert!(matches!(
        handle_key(&state, InputKey::Char('q')),
        Some(Message::EditInput { ref text }) if text == "-1q"
    ));

    update(
        &mut state,
        Message::EditInput {
            text: "forty".into(),
        },
    );
    assert!(update(&mut state, Message::CommitEdit).action.is_none());
    assert!(state.is_editing());
    assert!(state.status_line().ends_with("Not a number: forty"));

    update(&mut state, Message::EditInput { text: "42".into() });
    let result = update(&mut state, Message::CommitEdit);
    assert_eq!(
        result.action,
        Some(UpdateAction::SetValue {
            generation: 1,
            node_id: "seed".into(),
            value: json!(42),
            previous: json!(-1),
        })
    );
    assert!(!state.is_editing());
}

#[test]
fn test_cancel_edit_keeps_value() {
    let tree = tree_with(
        SAMPLE_EXTENSION,
        &["p"],
        vec![ComponentNode::new("p", "textbox").with_prop("value", "a cat")],
    );
    let mut state = AppState::new(Settings::default());
    update(&mut state, Message::RefreshTree);
    update(
        &mut state,
        Message::TreeFetched {
            generation: 1,
            response: active(tree),
        },
    );
    state.layer.view.set_all_expanded(true);
    select_node(&mut state, "p");

    update(&mut state, Message::Activate);
    update(&mut state, Message::EditInput { text: "a dog".into() });
    assert!(matches!(
        handle_key(&state, InputKey::Esc),
        Some(Message::CancelEdit)
    ));
    update(&mut state, Message::CancelEdit);

    assert!(matches!(
        kind_of(&state, "p"),
        ControlKind::TextBox { text, .. } if text == "a cat"
    ));
}

// ─────────────────────────────────────────────────────────
// Keys and tabs
// ─────────────────────────────────────────────────────────

#[test]
fn test_quit_keys() {
    let mut state = AppState::new(Settings::default());
    assert!(matches!(
        handle_key(&state, InputKey::Char('q')),
        Some(Message::Quit)
    ));
    assert!(matches!(
        handle_key(&state, InputKey::CharCtrl('c')),
        Some(Message::Quit)
    ));

    let result = update(&mut state, Message::Key(InputKey::Esc));
    update(&mut state, result.message.unwrap());
    assert_eq!(state.phase, AppPhase::Quitting);
    assert!(state.should_quit());
}

#[test]
fn test_component_keys_only_on_components_tab() {
    let mut state = AppState::new(Settings::default());
    assert!(matches!(
        handle_key(&state, InputKey::Char('X')),
        Some(Message::ClearLayer)
    ));

    state.tab = StartTab::Values;
    assert!(handle_key(&state, InputKey::Char('X')).is_none());
    assert!(matches!(
        handle_key(&state, InputKey::Char('r')),
        Some(Message::Refresh)
    ));
}

#[test]
fn test_first_visit_fetches_tab_data() {
    let mut state = AppState::new(Settings::default());

    let result = update(&mut state, Message::ShowTab(StartTab::Extensions));
    assert!(matches!(result.message, Some(Message::RefreshExtensions)));

    let result = update(&mut state, Message::RefreshExtensions);
    assert_eq!(result.action, Some(UpdateAction::FetchExtensions));
    assert_eq!(state.status_line(), "Loading...");

    update(
        &mut state,
        Message::ExtensionsFetched {
            extensions: vec![ExtensionInfo {
                name: "sd-webui-controlnet".into(),
                enabled: true,
                ..Default::default()
            }],
        },
    );
    assert_eq!(state.status_line(), "1 extensions installed");
    assert!(state.enabled_extensions().contains("sd-webui-controlnet"));

    // Second visit uses the cached list
    update(&mut state, Message::ShowTab(StartTab::Components));
    let result = update(&mut state, Message::ShowTab(StartTab::Extensions));
    assert!(result.message.is_none());
}

#[test]
fn test_selection_clamped_to_rows() {
    let mut state = loaded_state(Settings::default());
    update(&mut state, Message::SelectLast);
    assert_eq!(state.layer.selected, 3);
    update(&mut state, Message::SelectNext);
    assert_eq!(state.layer.selected, 3);
    update(&mut state, Message::SelectFirst);
    assert_eq!(state.layer.selected, 0);
    update(&mut state, Message::SelectPrevious);
    assert_eq!(state.layer.selected, 0);
}
