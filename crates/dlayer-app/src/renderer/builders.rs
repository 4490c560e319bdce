//! Type-tag to control builders
//!
//! The backend can introduce component types before this client knows about
//! them, so dispatch is a runtime table keyed by the node's type tag with one
//! fallback. Registering a builder never touches the traversal.

use std::collections::HashMap;

use dlayer_core::prelude::*;
use dlayer_core::ComponentNode;

use super::control::{ControlKind, Orientation};

/// Where a node's children go once its control exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildSlot {
    /// Children nest inside the control
    Inline,
    /// Children nest inside a synthetic content panel with the given visibility
    Panel { visible: bool },
    /// Leaf control; stray children are rendered next to it under the same parent
    Sibling,
}

/// Output of a builder for a single node
#[derive(Debug, Clone, PartialEq)]
pub struct Built {
    pub kind: ControlKind,
    pub slot: ChildSlot,
}

impl Built {
    fn inline(kind: ControlKind) -> Self {
        Self {
            kind,
            slot: ChildSlot::Inline,
        }
    }

    fn leaf(kind: ControlKind) -> Self {
        Self {
            kind,
            slot: ChildSlot::Sibling,
        }
    }
}

/// Turns one node into a control shape. Errors become placeholders.
pub type BuilderFn = fn(&ComponentNode) -> Result<Built>;

/// Runtime dispatch table from type tag to builder
#[derive(Clone)]
pub struct BuilderRegistry {
    builders: HashMap<String, BuilderFn>,
    fallback: BuilderFn,
}

impl std::fmt::Debug for BuilderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuilderRegistry")
            .field("tags", &self.tags())
            .finish_non_exhaustive()
    }
}

impl Default for BuilderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl BuilderRegistry {
    /// Registry with only the placeholder fallback
    pub fn empty() -> Self {
        Self {
            builders: HashMap::new(),
            fallback: build_placeholder,
        }
    }

    /// Registry covering every type the backend translates
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register("blocks", build_vertical);
        registry.register("column", build_vertical);
        registry.register("formcolumn", build_vertical);
        registry.register("row", build_horizontal);
        registry.register("formrow", build_horizontal);
        registry.register("group", build_group);
        registry.register("accordion", build_accordion);
        registry.register("input-accordion", build_input_accordion);
        registry.register("inputaccordionimpl", build_input_accordion);
        registry.register("button", build_button);
        registry.register("textbox", build_textbox);
        registry.register("slider", build_slider);
        registry.register("checkbox", build_checkbox);
        registry.register("dropdown", build_dropdown);
        registry.register("number", build_number);
        registry
    }

    /// Add or replace the builder for `tag` (matched case-insensitively)
    pub fn register(&mut self, tag: &str, builder: BuilderFn) {
        self.builders.insert(tag.to_ascii_lowercase(), builder);
    }

    pub fn set_fallback(&mut self, builder: BuilderFn) {
        self.fallback = builder;
    }

    pub fn is_registered(&self, tag: &str) -> bool {
        self.builders.contains_key(&tag.to_ascii_lowercase())
    }

    /// Registered tags, sorted
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.builders.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Build a node. A failing builder yields a placeholder that keeps the
    /// node's children so nested controls are still rendered.
    pub fn build(&self, node: &ComponentNode) -> Built {
        let builder = self
            .builders
            .get(&node.node_type.to_ascii_lowercase())
            .copied()
            .unwrap_or(self.fallback);

        match builder(node) {
            Ok(built) => built,
            Err(e) => {
                warn!("Rendering {} ({}) as placeholder: {}", node.id, node.node_type, e);
                Built::inline(ControlKind::Placeholder {
                    type_tag: node.node_type.clone(),
                    reason: Some(e.to_string()),
                })
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Containers
// ─────────────────────────────────────────────────────────────────

fn build_vertical(_node: &ComponentNode) -> Result<Built> {
    Ok(Built::inline(ControlKind::Container {
        orientation: Orientation::Vertical,
    }))
}

fn build_horizontal(_node: &ComponentNode) -> Result<Built> {
    Ok(Built::inline(ControlKind::Container {
        orientation: Orientation::Horizontal,
    }))
}

fn build_group(_node: &ComponentNode) -> Result<Built> {
    Ok(Built::inline(ControlKind::Group))
}

fn build_accordion(node: &ComponentNode) -> Result<Built> {
    Ok(Built::inline(ControlKind::Accordion {
        label: node.label().unwrap_or_else(|| "Accordion".to_string()),
        expanded: node.prop_bool("open")?.unwrap_or(false),
    }))
}

fn build_input_accordion(node: &ComponentNode) -> Result<Built> {
    let checked = node.prop_bool("value")?.unwrap_or(false);
    Ok(Built {
        kind: ControlKind::InputAccordion {
            label: node.label().unwrap_or_else(|| "Enable".to_string()),
            checked,
        },
        slot: ChildSlot::Panel { visible: checked },
    })
}

fn build_placeholder(node: &ComponentNode) -> Result<Built> {
    Ok(Built::inline(ControlKind::Placeholder {
        type_tag: node.node_type.clone(),
        reason: None,
    }))
}

// ─────────────────────────────────────────────────────────────────
// Leaf controls
// ─────────────────────────────────────────────────────────────────

fn build_button(node: &ComponentNode) -> Result<Built> {
    Ok(Built::leaf(ControlKind::Button {
        label: node.label().unwrap_or_else(|| "Button".to_string()),
    }))
}

fn build_textbox(node: &ComponentNode) -> Result<Built> {
    let text = match node.prop("value") {
        None => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(_) => {
            return Err(Error::malformed(&node.id, "textbox value should be text"));
        }
    };

    Ok(Built::leaf(ControlKind::TextBox {
        label: node.label(),
        placeholder: node.prop_str("placeholder")?.map(str::to_string),
        text,
        multiline: node.prop_u64("lines")?.unwrap_or(1) > 1,
    }))
}

fn build_slider(node: &ComponentNode) -> Result<Built> {
    let minimum = node.prop_f64("minimum")?.unwrap_or(0.0);
    let maximum = node.prop_f64("maximum")?.unwrap_or(100.0);
    let step = node.prop_f64("step")?.unwrap_or(1.0);
    let value = node.prop_f64("value")?.unwrap_or(minimum);

    if maximum < minimum {
        return Err(Error::malformed(
            &node.id,
            format!("slider range is inverted ({minimum} > {maximum})"),
        ));
    }
    if step <= 0.0 || !step.is_finite() {
        return Err(Error::malformed(&node.id, format!("slider step {step} is not positive")));
    }

    Ok(Built::leaf(ControlKind::Slider {
        label: node.label().unwrap_or_else(|| "Slider".to_string()),
        minimum,
        maximum,
        step,
        value,
    }))
}

fn build_checkbox(node: &ComponentNode) -> Result<Built> {
    Ok(Built::leaf(ControlKind::Checkbox {
        label: node.label().unwrap_or_else(|| "Checkbox".to_string()),
        checked: node.prop_bool("value")?.unwrap_or(false),
    }))
}

fn build_dropdown(node: &ComponentNode) -> Result<Built> {
    let choices = node.prop_choices()?;

    let selected = node
        .prop("value")
        .and_then(|value| choices.iter().position(|c| c.matches(value)))
        .or(if choices.is_empty() { None } else { Some(0) });

    Ok(Built::leaf(ControlKind::Dropdown {
        label: node.label().unwrap_or_else(|| "Dropdown".to_string()),
        choices,
        selected,
    }))
}

fn build_number(node: &ComponentNode) -> Result<Built> {
    Ok(Built::leaf(ControlKind::Number {
        label: node.label().unwrap_or_else(|| "Number".to_string()),
        value: node.prop_f64("value")?.unwrap_or(0.0),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build(node: ComponentNode) -> Built {
        BuilderRegistry::with_defaults().build(&node)
    }

    #[test]
    fn test_container_orientation() {
        for (tag, orientation) in [
            ("blocks", Orientation::Vertical),
            ("column", Orientation::Vertical),
            ("row", Orientation::Horizontal),
            ("formrow", Orientation::Horizontal),
        ] {
            let built = build(ComponentNode::new("c", tag));
            assert_eq!(built.kind, ControlKind::Container { orientation }, "{tag}");
            assert_eq!(built.slot, ChildSlot::Inline);
        }
    }

    #[test]
    fn test_accordion_defaults() {
        let built = build(ComponentNode::new("acc", "accordion"));
        assert_eq!(
            built.kind,
            ControlKind::Accordion {
                label: "Accordion".into(),
                expanded: false
            }
        );

        let built = build(
            ComponentNode::new("acc", "accordion")
                .with_prop("label", "Hires. fix")
                .with_prop("open", true),
        );
        assert_eq!(
            built.kind,
            ControlKind::Accordion {
                label: "Hires. fix".into(),
                expanded: true
            }
        );
    }

    #[test]
    fn test_input_accordion_panel_mirrors_value() {
        let built = build(ComponentNode::new("ia", "input-accordion").with_prop("value", true));
        assert_eq!(built.slot, ChildSlot::Panel { visible: true });

        let built = build(ComponentNode::new("ia", "inputaccordionimpl"));
        assert_eq!(built.slot, ChildSlot::Panel { visible: false });
        assert!(matches!(
            built.kind,
            ControlKind::InputAccordion { ref label, checked: false } if label == "Enable"
        ));
    }

    #[test]
    fn test_slider_defaults() {
        let built = build(ComponentNode::new("s", "slider"));
        assert_eq!(
            built.kind,
            ControlKind::Slider {
                label: "Slider".into(),
                minimum: 0.0,
                maximum: 100.0,
                step: 1.0,
                value: 0.0,
            }
        );
    }

    #[test]
    fn test_slider_value_defaults_to_minimum() {
        let built = build(ComponentNode::new("s", "slider").with_prop("minimum", 4));
        assert!(matches!(built.kind, ControlKind::Slider { value, .. } if value == 4.0));
    }

    #[test]
    fn test_textbox_multiline_by_lines() {
        let built = build(
            ComponentNode::new("t", "textbox")
                .with_prop("lines", 3)
                .with_prop("placeholder", "Prompt")
                .with_prop("value", "a cat"),
        );
        assert_eq!(
            built.kind,
            ControlKind::TextBox {
                label: None,
                placeholder: Some("Prompt".into()),
                text: "a cat".into(),
                multiline: true,
            }
        );

        let built = build(ComponentNode::new("t", "textbox"));
        assert!(matches!(
            built.kind,
            ControlKind::TextBox { multiline: false, .. }
        ));
    }

    #[test]
    fn test_dropdown_uses_value_when_it_is_a_choice() {
        let built = build(
            ComponentNode::new("d", "dropdown")
                .with_prop("choices", json!(["Euler", "DPM++"]))
                .with_prop("value", "DPM++"),
        );
        assert!(matches!(built.kind, ControlKind::Dropdown { selected: Some(1), .. }));
    }

    #[test]
    fn test_dropdown_matches_value_of_label_value_pairs() {
        let built = build(
            ComponentNode::new("d", "dropdown")
                .with_prop(
                    "choices",
                    json!([["DPM++ 2M", "dpmpp_2m"], ["Euler a", "euler_a"]]),
                )
                .with_prop("value", "euler_a"),
        );
        assert!(matches!(built.kind, ControlKind::Dropdown { selected: Some(1), .. }));
    }

    #[test]
    fn test_dropdown_unknown_value_falls_back_to_first() {
        let built = build(
            ComponentNode::new("d", "dropdown")
                .with_prop("choices", json!(["Euler", "DPM++"]))
                .with_prop("value", "LMS"),
        );
        assert!(matches!(built.kind, ControlKind::Dropdown { selected: Some(0), .. }));
    }

    #[test]
    fn test_dropdown_without_choices_selects_nothing() {
        let built = build(ComponentNode::new("d", "dropdown"));
        assert!(matches!(built.kind, ControlKind::Dropdown { selected: None, .. }));
    }

    #[test]
    fn test_number_defaults() {
        let built = build(ComponentNode::new("n", "number"));
        assert_eq!(
            built.kind,
            ControlKind::Number {
                label: "Number".into(),
                value: 0.0
            }
        );
    }

    #[test]
    fn test_leaves_put_stray_children_beside_them() {
        for tag in ["button", "textbox", "slider", "checkbox", "dropdown", "number"] {
            assert_eq!(build(ComponentNode::new("x", tag)).slot, ChildSlot::Sibling, "{tag}");
        }
    }

    #[test]
    fn test_unknown_type_is_placeholder_that_recurses() {
        let built = build(ComponentNode::new("g", "gallery"));
        assert_eq!(
            built.kind,
            ControlKind::Placeholder {
                type_tag: "gallery".into(),
                reason: None
            }
        );
        assert_eq!(built.slot, ChildSlot::Inline);
    }

    #[test]
    fn test_malformed_node_becomes_placeholder_with_reason() {
        let built = build(ComponentNode::new("s", "slider").with_prop("maximum", "lots"));
        match built.kind {
            ControlKind::Placeholder { type_tag, reason } => {
                assert_eq!(type_tag, "slider");
                assert!(reason.unwrap().contains("maximum"));
            }
            other => panic!("expected placeholder, got {other:?}"),
        }
        assert_eq!(built.slot, ChildSlot::Inline);
    }

    #[test]
    fn test_inverted_slider_range_is_malformed() {
        let built = build(
            ComponentNode::new("s", "slider")
                .with_prop("minimum", 10)
                .with_prop("maximum", 1),
        );
        assert!(matches!(built.kind, ControlKind::Placeholder { .. }));
    }

    #[test]
    fn test_type_tags_match_case_insensitively() {
        let built = build(ComponentNode::new("b", "Button"));
        assert!(matches!(built.kind, ControlKind::Button { .. }));
    }

    #[test]
    fn test_register_new_type_without_touching_traversal() {
        fn build_html(_node: &ComponentNode) -> Result<Built> {
            Ok(Built {
                kind: ControlKind::Group,
                slot: ChildSlot::Inline,
            })
        }

        let mut registry = BuilderRegistry::with_defaults();
        assert!(!registry.is_registered("html"));
        registry.register("html", build_html);
        assert!(registry.is_registered("HTML"));
        assert_eq!(
            registry.build(&ComponentNode::new("h", "html")).kind,
            ControlKind::Group
        );
    }

    #[test]
    fn test_default_tags() {
        let registry = BuilderRegistry::with_defaults();
        for tag in [
            "blocks",
            "row",
            "column",
            "group",
            "accordion",
            "input-accordion",
            "button",
            "textbox",
            "slider",
            "checkbox",
            "dropdown",
            "number",
        ] {
            assert!(registry.is_registered(tag), "{tag}");
        }
    }
}
