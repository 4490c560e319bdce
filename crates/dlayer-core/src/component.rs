//! Remote component tree model
//!
//! Data structures for the component tree the backend's translation layer
//! reports for extension UI panels. A [`ComponentTree`] is a fresh snapshot
//! per fetch: node ids are only meaningful within the snapshot they came from.
//!
//! The backend emits snake_case JSON. Every field also accepts the camelCase
//! and PascalCase spellings so responses from other backend builds decode too.
//! Other casings (`ROOT_NODES`, `rootnodes`) are not recognised and leave the
//! field at its default. Keys are not rewritten before decoding because
//! extension names and prop keys are data, not field names.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Loosely-typed property bag attached to a node
pub type Props = Map<String, Value>;

/// One dropdown option: the text shown and the value the backend stores
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub label: String,
    pub value: Value,
}

impl Choice {
    /// A choice whose label is its own value
    pub fn plain(value: impl Into<Value>) -> Self {
        let value = value.into();
        let label = match &value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        Self { label, value }
    }

    pub fn pair(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Whether a backend value selects this choice.
    ///
    /// Scalars compare by text so `"7"` selects the choice `7`.
    pub fn matches(&self, value: &Value) -> bool {
        if self.value == *value {
            return true;
        }
        match (scalar_text(&self.value), scalar_text(value)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Treat an explicit JSON `null` the same as an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_true() -> bool {
    true
}

// ============================================================================
// ComponentNode
// ============================================================================

/// One typed, property-bearing unit in the remote UI tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentNode {
    #[serde(alias = "Id")]
    pub id: String,

    /// Type tag (`slider`, `row`, ...). Unknown tags are legal.
    #[serde(rename = "type", alias = "Type")]
    pub node_type: String,

    #[serde(default, alias = "Props", deserialize_with = "null_as_default")]
    pub props: Props,

    /// Event name to opaque metadata; only `click` is exercised.
    #[serde(default, alias = "Events", deserialize_with = "null_as_default")]
    pub events: Props,

    /// Back-reference for lookups only, never ownership.
    #[serde(default, alias = "parentId", alias = "ParentId")]
    pub parent_id: Option<String>,

    /// Child ids in render order.
    #[serde(default, alias = "Children", deserialize_with = "null_as_default")]
    pub children: Vec<String>,

    #[serde(default = "default_true", alias = "Supported")]
    pub supported: bool,
}

impl ComponentNode {
    /// Create a bare node with no props or children
    pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            props: Props::new(),
            events: Props::new(),
            parent_id: None,
            children: Vec::new(),
            supported: true,
        }
    }

    /// Builder-style prop setter, mostly for tests and fixtures
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Builder-style children setter
    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    /// Raw prop value. `null` reads as absent.
    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key).filter(|v| !v.is_null())
    }

    /// Display label. Scalars of any kind are accepted and rendered as text.
    pub fn label(&self) -> Option<String> {
        match self.prop("label")? {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// String prop; any other JSON kind is a malformed node.
    pub fn prop_str(&self, key: &str) -> Result<Option<&str>> {
        match self.prop(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(self.mistyped(key, "a string", other)),
        }
    }

    /// Boolean prop.
    pub fn prop_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.prop(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(self.mistyped(key, "a boolean", other)),
        }
    }

    /// Numeric prop. Numeric strings such as `"0.5"` are accepted.
    pub fn prop_f64(&self, key: &str) -> Result<Option<f64>> {
        match self.prop(key) {
            None => Ok(None),
            Some(Value::Number(n)) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| Error::malformed(&self.id, format!("{key} is out of range"))),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| Error::malformed(&self.id, format!("{key} is not numeric: {s:?}"))),
            Some(other) => Err(self.mistyped(key, "a number", other)),
        }
    }

    /// Non-negative integer prop (e.g. `lines`). Whole floats are accepted.
    pub fn prop_u64(&self, key: &str) -> Result<Option<u64>> {
        match self.prop_f64(key)? {
            None => Ok(None),
            Some(f) if f >= 0.0 && f.fract() == 0.0 => Ok(Some(f as u64)),
            Some(f) => Err(Error::malformed(
                &self.id,
                format!("{key} must be a non-negative integer, got {f}"),
            )),
        }
    }

    /// `choices` as [`Choice`]s.
    ///
    /// Plain strings and numbers are their own label. `[label, value]` pairs
    /// keep both halves; a pair without a value uses the label. Anything else
    /// is malformed.
    pub fn prop_choices(&self) -> Result<Vec<Choice>> {
        let Some(value) = self.prop("choices") else {
            return Ok(Vec::new());
        };
        let Value::Array(items) = value else {
            return Err(self.mistyped("choices", "an array", value));
        };

        items
            .iter()
            .map(|item| match item {
                Value::String(_) | Value::Number(_) => Ok(Choice::plain(item.clone())),
                Value::Array(pair) => {
                    let label = match pair.first() {
                        Some(Value::String(s)) => s.clone(),
                        Some(Value::Number(n)) => n.to_string(),
                        _ => {
                            return Err(Error::malformed(
                                &self.id,
                                "choice pair has no string label",
                            ))
                        }
                    };
                    let value = pair
                        .get(1)
                        .cloned()
                        .unwrap_or_else(|| Value::String(label.clone()));
                    Ok(Choice { label, value })
                }
                other => Err(self.mistyped("choices[]", "a string", other)),
            })
            .collect()
    }

    /// Whether the backend advertises the named event on this node
    pub fn has_event(&self, name: &str) -> bool {
        self.events.contains_key(name)
    }

    /// `interactive: false` marks a read-only control.
    pub fn is_interactive(&self) -> bool {
        !matches!(self.prop("interactive"), Some(Value::Bool(false)))
    }

    fn mistyped(&self, key: &str, expected: &str, got: &Value) -> Error {
        Error::malformed(
            &self.id,
            format!("{key} should be {expected}, got {}", json_kind(got)),
        )
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// Compatibility
// ============================================================================

/// Backend-reported support level of an extension.
///
/// Derived from the backend's tri-state flag; never recomputed locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compatibility {
    Supported,
    Unsupported,
    Partial,
}

impl Compatibility {
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Self::Supported,
            Some(false) => Self::Unsupported,
            None => Self::Partial,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Supported => "Supported",
            Self::Unsupported => "Unsupported",
            Self::Partial => "Partially Supported",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Supported => "✓",
            Self::Unsupported => "✗",
            Self::Partial => "⚠",
        }
    }
}

impl std::fmt::Display for Compatibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// ExtensionTree
// ============================================================================

/// The subset of nodes contributed by one extension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtensionTree {
    #[serde(
        default,
        alias = "rootNodes",
        alias = "RootNodes",
        deserialize_with = "null_as_default"
    )]
    pub root_nodes: Vec<String>,

    #[serde(default, alias = "Components", deserialize_with = "null_as_default")]
    pub components: HashMap<String, ComponentNode>,

    /// `None` when the backend could not decide.
    #[serde(default, alias = "Supported")]
    pub supported: Option<bool>,

    #[serde(
        default,
        alias = "componentCount",
        alias = "ComponentCount",
        deserialize_with = "null_as_default"
    )]
    pub component_count: usize,

    #[serde(
        default,
        alias = "componentTypes",
        alias = "ComponentTypes",
        deserialize_with = "null_as_default"
    )]
    pub component_types: Vec<String>,

    #[serde(
        default,
        alias = "unsupportedTypes",
        alias = "UnsupportedTypes",
        deserialize_with = "null_as_default"
    )]
    pub unsupported_types: Vec<String>,
}

impl ExtensionTree {
    /// Look up a node by id
    pub fn node(&self, id: &str) -> Result<&ComponentNode> {
        self.components.get(id).ok_or_else(|| Error::not_found(id))
    }

    pub fn compatibility(&self) -> Compatibility {
        Compatibility::from_flag(self.supported)
    }

    /// Insert a node, appending it to `root_nodes` when it has no parent.
    pub fn insert(&mut self, node: ComponentNode) {
        if node.parent_id.is_none() && !self.root_nodes.contains(&node.id) {
            self.root_nodes.push(node.id.clone());
        }
        self.components.insert(node.id.clone(), node);
        self.component_count = self.components.len();
    }
}

// ============================================================================
// ComponentTree
// ============================================================================

/// Aggregate tree across all extensions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentTree {
    #[serde(default, alias = "Extensions", deserialize_with = "null_as_default")]
    pub extensions: HashMap<String, ExtensionTree>,

    #[serde(
        default,
        alias = "supportedTypes",
        alias = "SupportedTypes",
        deserialize_with = "null_as_default"
    )]
    pub supported_types: Vec<String>,

    #[serde(
        default,
        alias = "totalExtensions",
        alias = "TotalExtensions",
        deserialize_with = "null_as_default"
    )]
    pub total_extensions: usize,
}

impl ComponentTree {
    /// Look up an extension by name
    pub fn extension(&self, name: &str) -> Result<&ExtensionTree> {
        self.extensions
            .get(name)
            .ok_or_else(|| Error::unknown_extension(name))
    }

    /// Find a node in whichever extension owns it
    pub fn node(&self, id: &str) -> Result<&ComponentNode> {
        self.extensions
            .values()
            .find_map(|ext| ext.components.get(id))
            .ok_or_else(|| Error::not_found(id))
    }

    /// Extensions sorted alphabetically by name
    pub fn sorted_extensions(&self) -> Vec<(&str, &ExtensionTree)> {
        let mut list: Vec<_> = self
            .extensions
            .iter()
            .map(|(name, ext)| (name.as_str(), ext))
            .collect();
        list.sort_by(|a, b| a.0.cmp(b.0));
        list
    }

    /// Sum of the per-extension component counts
    pub fn total_components(&self) -> usize {
        self.extensions.values().map(|e| e.component_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}
