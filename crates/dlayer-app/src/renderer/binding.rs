//! Two-way bindings between controls and backend nodes
//!
//! Edits are optimistic: the control changes immediately and the returned
//! [`Binding`] describes the backend call to make. Nothing here waits for the
//! backend. A rejected write can be rolled back with
//! [`ControlTree::apply_value`] using the `previous` value the binding carried.

use serde_json::Value;

use super::control::{ControlId, ControlKind, ControlTree};

/// Backend call produced by a local edit
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// `POST component/{node_id}/value`
    SetValue {
        node_id: String,
        value: Value,
        /// Value before the edit, for rollback
        previous: Value,
    },
    /// `POST component/{node_id}/event/{event}`
    TriggerEvent { node_id: String, event: String },
}

impl Binding {
    pub fn node_id(&self) -> &str {
        match self {
            Binding::SetValue { node_id, .. } | Binding::TriggerEvent { node_id, .. } => node_id,
        }
    }
}

/// JSON number for a control value; whole numbers are sent as integers
pub fn number_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

/// Clamp into `[minimum, maximum]` and snap to the step grid anchored at `minimum`
fn snap(value: f64, minimum: f64, maximum: f64, step: f64) -> f64 {
    let clamped = value.clamp(minimum, maximum);
    let steps = ((clamped - minimum) / step).round();
    let snapped = (minimum + steps * step).min(maximum);
    // Trim float noise from repeated step arithmetic (0.1 + 0.2 ...)
    (snapped * 1e9).round() / 1e9
}

/// Current value of a control as JSON, if it carries one
pub fn current_value(kind: &ControlKind) -> Option<Value> {
    match kind {
        ControlKind::InputAccordion { checked, .. } | ControlKind::Checkbox { checked, .. } => {
            Some(Value::Bool(*checked))
        }
        ControlKind::TextBox { text, .. } => Some(Value::String(text.clone())),
        ControlKind::Slider { value, .. } | ControlKind::Number { value, .. } => {
            Some(number_value(*value))
        }
        ControlKind::Dropdown {
            choices, selected, ..
        } => selected
            .and_then(|i| choices.get(i))
            .map(|c| c.value.clone()),
        _ => None,
    }
}

impl ControlTree {
    fn editable(&mut self, id: ControlId) -> Option<(&str, &mut ControlKind)> {
        let control = self.get_mut(id)?;
        if !control.enabled {
            return None;
        }
        let node_id = control.node_id.as_deref()?;
        Some((node_id, &mut control.kind))
    }

    /// Move a slider to `value` (clamped and snapped)
    pub fn set_slider(&mut self, id: ControlId, value: f64) -> Option<Binding> {
        let (node_id, kind) = self.editable(id)?;
        let ControlKind::Slider {
            minimum,
            maximum,
            step,
            value: current,
            ..
        } = kind
        else {
            return None;
        };

        let next = snap(value, *minimum, *maximum, *step);
        if next == *current {
            return None;
        }
        let previous = number_value(*current);
        *current = next;

        Some(Binding::SetValue {
            node_id: node_id.to_string(),
            value: number_value(next),
            previous,
        })
    }

    /// Move a slider by whole steps
    pub fn step_slider(&mut self, id: ControlId, steps: i32) -> Option<Binding> {
        let target = match &self.get(id)?.kind {
            ControlKind::Slider { value, step, .. } => value + f64::from(steps) * step,
            _ => return None,
        };
        self.set_slider(id, target)
    }

    /// Flip a checkbox, input accordion or accordion.
    ///
    /// Accordions only expand/collapse locally. An input accordion also shows
    /// or hides its content panel here, without any backend call for the
    /// visibility itself.
    pub fn toggle(&mut self, id: ControlId) -> Option<Binding> {
        if let Some(ControlKind::Accordion { expanded, .. }) =
            self.get_mut(id).map(|c| &mut c.kind)
        {
            *expanded = !*expanded;
            return None;
        }

        let (node_id, kind) = self.editable(id)?;
        let node_id = node_id.to_string();
        let (checked, gates_panel) = match kind {
            ControlKind::Checkbox { checked, .. } => (checked, false),
            ControlKind::InputAccordion { checked, .. } => (checked, true),
            _ => return None,
        };
        *checked = !*checked;
        let now = *checked;

        if gates_panel {
            self.set_panel_visibility(id, now);
        }

        Some(Binding::SetValue {
            node_id,
            value: Value::Bool(now),
            previous: Value::Bool(!now),
        })
    }

    /// Select dropdown choice `index`
    pub fn select(&mut self, id: ControlId, index: usize) -> Option<Binding> {
        let (node_id, kind) = self.editable(id)?;
        let ControlKind::Dropdown {
            choices, selected, ..
        } = kind
        else {
            return None;
        };

        let value = choices.get(index)?.value.clone();
        if *selected == Some(index) {
            return None;
        }
        let previous = selected
            .and_then(|i| choices.get(i))
            .map(|c| c.value.clone())
            .unwrap_or(Value::Null);
        *selected = Some(index);

        Some(Binding::SetValue {
            node_id: node_id.to_string(),
            value,
            previous,
        })
    }

    /// Select the next/previous dropdown choice, wrapping around
    pub fn cycle_choice(&mut self, id: ControlId, delta: i32) -> Option<Binding> {
        let (len, current) = match &self.get(id)?.kind {
            ControlKind::Dropdown {
                choices, selected, ..
            } if !choices.is_empty() => (choices.len() as i64, selected.unwrap_or(0) as i64),
            _ => return None,
        };
        let next = (current + i64::from(delta)).rem_euclid(len) as usize;
        self.select(id, next)
    }

    /// Replace a text box's content
    pub fn set_text(&mut self, id: ControlId, text: impl Into<String>) -> Option<Binding> {
        let (node_id, kind) = self.editable(id)?;
        let ControlKind::TextBox { text: current, .. } = kind else {
            return None;
        };

        let text = text.into();
        if *current == text {
            return None;
        }
        let previous = Value::String(std::mem::replace(current, text.clone()));

        Some(Binding::SetValue {
            node_id: node_id.to_string(),
            value: Value::String(text),
            previous,
        })
    }

    /// Set a number spinner (unbounded)
    pub fn set_number(&mut self, id: ControlId, value: f64) -> Option<Binding> {
        if !value.is_finite() {
            return None;
        }
        let (node_id, kind) = self.editable(id)?;
        let ControlKind::Number { value: current, .. } = kind else {
            return None;
        };
        if *current == value {
            return None;
        }
        let previous = number_value(*current);
        *current = value;

        Some(Binding::SetValue {
            node_id: node_id.to_string(),
            value: number_value(value),
            previous,
        })
    }

    /// Nudge a number spinner by `delta`
    pub fn step_number(&mut self, id: ControlId, delta: f64) -> Option<Binding> {
        let current = match &self.get(id)?.kind {
            ControlKind::Number { value, .. } => *value,
            _ => return None,
        };
        self.set_number(id, current + delta)
    }

    /// Press a button
    pub fn click(&mut self, id: ControlId) -> Option<Binding> {
        let (node_id, kind) = self.editable(id)?;
        if !matches!(kind, ControlKind::Button { .. }) {
            return None;
        }
        Some(Binding::TriggerEvent {
            node_id: node_id.to_string(),
            event: "click".to_string(),
        })
    }

    /// Overwrite the control bound to `node_id` with a backend value.
    ///
    /// Used for rollback and for authoritative values fetched later. Returns
    /// `false` when no control is bound or the value doesn't fit its kind.
    pub fn apply_value(&mut self, node_id: &str, value: &Value) -> bool {
        let Some(id) = self.find_by_node(node_id) else {
            return false;
        };
        let Some(control) = self.get_mut(id) else {
            return false;
        };

        let gates_panel = matches!(control.kind, ControlKind::InputAccordion { .. });

        let applied = match (&mut control.kind, value) {
            (ControlKind::Checkbox { checked, .. }, Value::Bool(b))
            | (ControlKind::InputAccordion { checked, .. }, Value::Bool(b)) => {
                *checked = *b;
                true
            }
            (ControlKind::TextBox { text, .. }, Value::String(s)) => {
                *text = s.clone();
                true
            }
            (ControlKind::Slider { value: v, .. }, Value::Number(n))
            | (ControlKind::Number { value: v, .. }, Value::Number(n)) => match n.as_f64() {
                Some(f) => {
                    *v = f;
                    true
                }
                None => false,
            },
            (ControlKind::Dropdown { selected, .. }, Value::Null) => {
                *selected = None;
                true
            }
            (ControlKind::Dropdown { choices, selected, .. }, v) => {
                match choices.iter().position(|c| c.matches(v)) {
                    Some(i) => {
                        *selected = Some(i);
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        };

        if applied && gates_panel {
            if let Value::Bool(visible) = value {
                self.set_panel_visibility(id, *visible);
            }
        }
        applied
    }

    fn set_panel_visibility(&mut self, owner: ControlId, visible: bool) {
        let panels: Vec<ControlId> = self
            .children(owner)
            .iter()
            .copied()
            .filter(|&c| matches!(self.get(c).map(|c| &c.kind), Some(ControlKind::Panel { .. })))
            .collect();

        for panel in panels {
            if let Some(ControlKind::Panel { visible: v }) =
                self.get_mut(panel).map(|c| &mut c.kind)
            {
                *v = visible;
            }
        }
    }
}
