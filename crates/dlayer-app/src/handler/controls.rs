//! Control interaction handlers
//!
//! Every edit goes through the [`ControlTree`](crate::renderer::ControlTree)
//! edit methods, which change the control optimistically and hand back a
//! [`Binding`]. The binding becomes an [`UpdateAction`] here.

use crate::compat::ViewRow;
use crate::config::StartTab;
use crate::renderer::{number_value, Binding, ControlId, ControlKind};
use crate::state::{AppState, TextEdit};

use super::{UpdateAction, UpdateResult};

/// Turn a binding into the backend call that carries it
pub(crate) fn dispatch_binding(state: &mut AppState, binding: Option<Binding>) -> UpdateResult {
    match binding {
        Some(Binding::SetValue {
            node_id,
            value,
            previous,
        }) => {
            state.layer.pending_writes += 1;
            UpdateResult::action(UpdateAction::SetValue {
                generation: state.layer.rendered_generation,
                node_id,
                value,
                previous,
            })
        }
        Some(Binding::TriggerEvent { node_id, event }) => {
            UpdateResult::action(UpdateAction::TriggerEvent { node_id, event })
        }
        None => UpdateResult::none(),
    }
}

/// Enter/Space on the selected row
pub(crate) fn handle_activate(state: &mut AppState) -> UpdateResult {
    if state.tab != StartTab::Components || state.layer.editing.is_some() {
        return UpdateResult::none();
    }

    let id = match state.layer.selected_row() {
        Some(ViewRow::Section(index)) => {
            state.layer.view.toggle_section(index);
            state.layer.clamp_selection();
            return UpdateResult::none();
        }
        Some(ViewRow::Control { id, .. }) => id,
        None => return UpdateResult::none(),
    };

    let Some(kind) = kind_of(state, id) else {
        return UpdateResult::none();
    };

    let controls = &mut state.layer.view.controls;
    let binding = match kind {
        ControlKind::Accordion { .. }
        | ControlKind::Checkbox { .. }
        | ControlKind::InputAccordion { .. } => controls.toggle(id),
        ControlKind::Button { .. } => controls.click(id),
        ControlKind::Dropdown { .. } => controls.cycle_choice(id, 1),
        ControlKind::Slider { .. } => controls.step_slider(id, 1),
        ControlKind::TextBox { text, .. } => return start_edit(state, id, text),
        ControlKind::Number { value, .. } => {
            return start_edit(state, id, number_value(value).to_string())
        }
        _ => None,
    };

    state.layer.clamp_selection();
    dispatch_binding(state, binding)
}

fn kind_of(state: &AppState, id: ControlId) -> Option<ControlKind> {
    state.layer.view.controls.get(id).map(|c| c.kind.clone())
}

fn start_edit(state: &mut AppState, control: ControlId, buffer: String) -> UpdateResult {
    let editable = state
        .layer
        .view
        .controls
        .get(control)
        .is_some_and(|c| c.enabled && c.node_id.is_some());
    if editable {
        state.layer.editing = Some(TextEdit { control, buffer });
    }
    UpdateResult::none()
}

/// Left/Right on the selected row
pub(crate) fn handle_adjust(state: &mut AppState, steps: i32) -> UpdateResult {
    if state.tab != StartTab::Components || steps == 0 || state.layer.editing.is_some() {
        return UpdateResult::none();
    }

    let id = match state.layer.selected_row() {
        Some(ViewRow::Section(index)) => {
            if let Some(section) = state.layer.view.sections.get_mut(index) {
                section.expanded = steps > 0;
            }
            state.layer.clamp_selection();
            return UpdateResult::none();
        }
        Some(ViewRow::Control { id, .. }) => id,
        None => return UpdateResult::none(),
    };

    let kind = kind_of(state, id);
    let controls = &mut state.layer.view.controls;
    let binding = match kind {
        Some(ControlKind::Slider { .. }) => controls.step_slider(id, steps),
        Some(ControlKind::Number { .. }) => controls.step_number(id, f64::from(steps)),
        Some(ControlKind::Dropdown { .. }) => controls.cycle_choice(id, steps),
        Some(ControlKind::Accordion { expanded, .. }) if expanded != (steps > 0) => {
            controls.toggle(id)
        }
        _ => None,
    };

    state.layer.clamp_selection();
    dispatch_binding(state, binding)
}

/// Apply the edit buffer to its text box or number control
pub(crate) fn handle_commit_edit(state: &mut AppState) -> UpdateResult {
    let Some(edit) = state.layer.editing.take() else {
        return UpdateResult::none();
    };

    let kind = kind_of(state, edit.control);
    let controls = &mut state.layer.view.controls;
    let binding = match kind {
        Some(ControlKind::TextBox { .. }) => controls.set_text(edit.control, edit.buffer),
        Some(ControlKind::Number { .. }) => match edit.buffer.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => controls.set_number(edit.control, value),
            _ => {
                state.notice = Some(format!("Not a number: {}", edit.buffer.trim()));
                state.layer.editing = Some(edit);
                return UpdateResult::none();
            }
        },
        _ => None,
    };

    dispatch_binding(state, binding)
}

/// Ask the backend for the selected control's current value
pub(crate) fn handle_sync_selected(state: &mut AppState) -> UpdateResult {
    if state.tab != StartTab::Components {
        return UpdateResult::none();
    }
    let node_id = state
        .layer
        .selected_control()
        .and_then(|id| state.layer.view.controls.get(id))
        .and_then(|c| c.node_id.clone());

    match node_id {
        Some(node_id) => UpdateResult::action(UpdateAction::FetchValue {
            generation: state.layer.rendered_generation,
            node_id,
        }),
        None => UpdateResult::none(),
    }
}
