//! Rendered control tree
//!
//! Controls live in a flat arena ([`ControlTree`]) and refer to each other by
//! [`ControlId`]. A control remembers the remote node id it is bound to, never
//! the node itself, so the fetched snapshot can be dropped once rendering is
//! done.

use dlayer_core::Choice;

/// Index of a control inside its [`ControlTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// Concrete shape of a rendered control
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    /// Ordered container (`blocks`, `row`, `column`)
    Container { orientation: Orientation },

    /// Bordered container
    Group,

    /// Collapsible container; children are hidden while collapsed
    Accordion { label: String, expanded: bool },

    /// Boolean toggle gating the visibility of its content [`ControlKind::Panel`]
    InputAccordion { label: String, checked: bool },

    /// Synthetic content panel owned by an input accordion
    Panel { visible: bool },

    Button {
        label: String,
    },

    TextBox {
        label: Option<String>,
        placeholder: Option<String>,
        text: String,
        multiline: bool,
    },

    Slider {
        label: String,
        minimum: f64,
        maximum: f64,
        step: f64,
        value: f64,
    },

    Checkbox {
        label: String,
        checked: bool,
    },

    Dropdown {
        label: String,
        choices: Vec<Choice>,
        selected: Option<usize>,
    },

    Number {
        label: String,
        value: f64,
    },

    /// Bordered stand-in for unsupported types and nodes that failed to build
    Placeholder {
        type_tag: String,
        reason: Option<String>,
    },
}

impl ControlKind {
    /// Whether the user can change this control's value or fire it
    pub fn is_interactive(&self) -> bool {
        matches!(
            self,
            ControlKind::InputAccordion { .. }
                | ControlKind::Button { .. }
                | ControlKind::TextBox { .. }
                | ControlKind::Slider { .. }
                | ControlKind::Checkbox { .. }
                | ControlKind::Dropdown { .. }
                | ControlKind::Number { .. }
        )
    }

    /// Whether children of this control are currently shown
    pub fn shows_children(&self) -> bool {
        match self {
            ControlKind::Accordion { expanded, .. } => *expanded,
            ControlKind::Panel { visible } => *visible,
            _ => true,
        }
    }

    /// Short text shown for the control in lists and status lines
    pub fn display_label(&self) -> String {
        match self {
            ControlKind::Container {
                orientation: Orientation::Horizontal,
            } => "Row".to_string(),
            ControlKind::Container {
                orientation: Orientation::Vertical,
            } => "Column".to_string(),
            ControlKind::Group => "Group".to_string(),
            ControlKind::Accordion { label, .. } => label.clone(),
            ControlKind::InputAccordion { label, .. } => label.clone(),
            ControlKind::Panel { .. } => String::new(),
            ControlKind::Button { label } => label.clone(),
            ControlKind::TextBox { label, .. } => label.clone().unwrap_or_default(),
            ControlKind::Slider { label, value, .. } => slider_text(label, *value),
            ControlKind::Checkbox { label, .. } => label.clone(),
            ControlKind::Dropdown { label, .. } => label.clone(),
            ControlKind::Number { label, .. } => label.clone(),
            ControlKind::Placeholder { type_tag, .. } => placeholder_text(type_tag),
        }
    }
}

/// Slider caption, value to two decimals
pub fn slider_text(label: &str, value: f64) -> String {
    format!("{label}: {value:.2}")
}

/// Placeholder caption for an unimplemented type
pub fn placeholder_text(type_tag: &str) -> String {
    format!("[{type_tag} - Not Implemented]")
}

/// One rendered control
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    /// Remote node this control is bound to; `None` for synthetic panels
    pub node_id: Option<String>,
    pub kind: ControlKind,
    /// `false` when the backend marked the node non-interactive
    pub enabled: bool,
    pub parent: Option<ControlId>,
    pub children: Vec<ControlId>,
}

// ============================================================================
// ControlTree
// ============================================================================

/// Arena of rendered controls. Insertion order is pre-order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlTree {
    controls: Vec<Control>,
    roots: Vec<ControlId>,
}

impl ControlTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a control under `parent` (or as a root) and return its id
    pub fn push(
        &mut self,
        node_id: Option<String>,
        kind: ControlKind,
        enabled: bool,
        parent: Option<ControlId>,
    ) -> ControlId {
        let id = ControlId(self.controls.len());
        self.controls.push(Control {
            node_id,
            kind,
            enabled,
            parent,
            children: Vec::new(),
        });

        match parent.and_then(|p| self.controls.get_mut(p.0)) {
            Some(parent) => parent.children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn get(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(id.0)
    }

    pub fn get_mut(&mut self, id: ControlId) -> Option<&mut Control> {
        self.controls.get_mut(id.0)
    }

    pub fn roots(&self) -> &[ControlId] {
        &self.roots
    }

    pub fn children(&self, id: ControlId) -> &[ControlId] {
        self.get(id).map(|c| c.children.as_slice()).unwrap_or(&[])
    }

    /// Control bound to the given remote node id
    pub fn find_by_node(&self, node_id: &str) -> Option<ControlId> {
        self.controls
            .iter()
            .position(|c| c.node_id.as_deref() == Some(node_id))
            .map(ControlId)
    }

    /// Every control bound to `node_id`; more than one means a duplicate render
    pub fn count_for_node(&self, node_id: &str) -> usize {
        self.controls
            .iter()
            .filter(|c| c.node_id.as_deref() == Some(node_id))
            .count()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn interactive_count(&self) -> usize {
        self.controls
            .iter()
            .filter(|c| c.kind.is_interactive())
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ControlId, &Control)> {
        self.controls
            .iter()
            .enumerate()
            .map(|(i, c)| (ControlId(i), c))
    }

    pub fn clear(&mut self) {
        self.controls.clear();
        self.roots.clear();
    }

    /// Pre-order list of controls under `roots` that are currently visible,
    /// with their depth. Collapsed accordions and hidden panels prune their
    /// subtree; panels themselves are never listed.
    pub fn visible_from(&self, roots: &[ControlId]) -> Vec<(ControlId, usize)> {
        let mut out = Vec::new();
        let mut stack: Vec<(ControlId, usize)> = roots.iter().rev().map(|&r| (r, 0)).collect();

        while let Some((id, depth)) = stack.pop() {
            let Some(control) = self.get(id) else {
                continue;
            };

            let child_depth = if matches!(control.kind, ControlKind::Panel { .. }) {
                depth
            } else {
                out.push((id, depth));
                depth + 1
            };

            if control.kind.shows_children() {
                for &child in control.children.iter().rev() {
                    stack.push((child, child_depth));
                }
            }
        }
        out
    }

    /// [`Self::visible_from`] over all roots
    pub fn visible(&self) -> Vec<(ControlId, usize)> {
        self.visible_from(&self.roots)
    }
}
