//! Translation layer response bodies
//!
//! One struct per endpoint under `/translation-layer/`. Decoding is lenient:
//! missing fields default and every key accepts snake_case, camelCase and
//! PascalCase spellings.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::component::{null_as_default, Compatibility, ComponentNode, ComponentTree};

/// Pseudo-extension the backend uses for the host UI's own components
pub const BASE_APP_EXTENSION: &str = "_base_app";

// ============================================================================
// Status / capabilities
// ============================================================================

/// `GET /translation-layer/status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerStatus {
    #[serde(default, alias = "Active")]
    pub active: bool,

    #[serde(
        default,
        alias = "componentCount",
        alias = "ComponentCount",
        deserialize_with = "null_as_default"
    )]
    pub component_count: usize,

    /// Number of root nodes (the backend sends a count, not ids)
    #[serde(
        default,
        alias = "rootNodes",
        alias = "RootNodes",
        deserialize_with = "null_as_default"
    )]
    pub root_nodes: usize,
}

/// `GET /translation-layer/supported-types`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportedTypes {
    #[serde(
        default,
        alias = "supportedTypes",
        alias = "SupportedTypes",
        deserialize_with = "null_as_default"
    )]
    pub supported_types: Vec<String>,

    #[serde(
        default,
        alias = "encounteredTypes",
        alias = "EncounteredTypes",
        deserialize_with = "null_as_default"
    )]
    pub encountered_types: Vec<String>,

    #[serde(
        default,
        alias = "unsupportedTypes",
        alias = "UnsupportedTypes",
        deserialize_with = "null_as_default"
    )]
    pub unsupported_types: Vec<String>,
}

// ============================================================================
// Tree / nodes / values
// ============================================================================

/// `GET /translation-layer/component-tree`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentTreeResponse {
    #[serde(default, alias = "Active")]
    pub active: bool,

    /// User-facing explanation, shown verbatim when inactive
    #[serde(default, alias = "Message")]
    pub message: Option<String>,

    #[serde(default, alias = "Tree", deserialize_with = "null_as_default")]
    pub tree: ComponentTree,
}

impl ComponentTreeResponse {
    /// An inactive response carrying only a message
    pub fn inactive(message: impl Into<String>) -> Self {
        Self {
            active: false,
            message: Some(message.into()),
            tree: ComponentTree::default(),
        }
    }
}

/// `GET /translation-layer/component/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeResponse {
    #[serde(alias = "Node")]
    pub node: ComponentNode,

    #[serde(default, alias = "Value")]
    pub value: Option<Value>,
}

/// `GET /translation-layer/component/{id}/value`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueResponse {
    #[serde(default, alias = "nodeId", alias = "NodeId")]
    pub node_id: Option<String>,

    #[serde(default, alias = "Value")]
    pub value: Option<Value>,
}

/// `POST /translation-layer/component/{id}/value` and the event endpoint.
///
/// Both reply with a `success` flag; a 2xx without one counts as success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AckResponse {
    #[serde(default = "default_success", alias = "Success")]
    pub success: bool,

    #[serde(default, alias = "Message")]
    pub message: Option<String>,

    #[serde(default, alias = "Error")]
    pub error: Option<String>,

    #[serde(default, alias = "Value")]
    pub value: Option<Value>,
}

impl AckResponse {
    /// Acknowledgement for a 2xx that carried no ack body
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: None,
            error: None,
            value: None,
        }
    }
}

fn default_success() -> bool {
    true
}

// ============================================================================
// Extensions
// ============================================================================

/// Translation-layer view of one extension's components
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityInfo {
    #[serde(default, alias = "Supported")]
    pub supported: Option<bool>,

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

    #[serde(
        default,
        alias = "componentCount",
        alias = "ComponentCount",
        deserialize_with = "null_as_default"
    )]
    pub component_count: usize,
}

impl CompatibilityInfo {
    pub fn compatibility(&self) -> Compatibility {
        Compatibility::from_flag(self.supported)
    }
}

/// One entry of `GET /translation-layer/extensions`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtensionInfo {
    #[serde(default, alias = "Name")]
    pub name: String,

    #[serde(default, alias = "Remote")]
    pub remote: String,

    #[serde(default, alias = "Branch")]
    pub branch: String,

    #[serde(default, alias = "commitHash", alias = "CommitHash")]
    pub commit_hash: String,

    /// Unix timestamp (seconds); 0 when unknown
    #[serde(
        default,
        alias = "commitDate",
        alias = "CommitDate",
        deserialize_with = "null_as_default"
    )]
    pub commit_date: i64,

    #[serde(default, alias = "Version")]
    pub version: String,

    #[serde(default, alias = "Enabled")]
    pub enabled: bool,

    #[serde(
        default,
        alias = "translationLayer",
        alias = "TranslationLayer",
        deserialize_with = "null_as_default"
    )]
    pub translation_layer: CompatibilityInfo,
}

impl ExtensionInfo {
    /// Commit date as a UTC timestamp, if the backend knew it
    pub fn commit_time(&self) -> Option<DateTime<Utc>> {
        if self.commit_date <= 0 {
            return None;
        }
        DateTime::from_timestamp(self.commit_date, 0)
    }

    /// First eight characters of the commit hash
    pub fn short_hash(&self) -> &str {
        let end = self
            .commit_hash
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.commit_hash.len());
        &self.commit_hash[..end]
    }
}

/// `GET /translation-layer/extensions/{name}/compatibility`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtensionCompatibility {
    #[serde(default, alias = "extensionName", alias = "ExtensionName")]
    pub extension_name: String,

    #[serde(flatten)]
    pub info: CompatibilityInfo,
}

// ============================================================================
// Extension values (alwayson_scripts)
// ============================================================================

/// Argument list for one extension, in the backend's invocation order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtensionArgs {
    #[serde(default, alias = "Args", deserialize_with = "null_as_default")]
    pub args: Vec<Value>,
}

/// `GET /translation-layer/extension-values`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtensionValues {
    #[serde(default, alias = "Active")]
    pub active: bool,

    #[serde(default, alias = "Message")]
    pub message: Option<String>,

    /// Sorted by extension name so output is deterministic
    #[serde(default, alias = "Values", deserialize_with = "null_as_default")]
    pub values: BTreeMap<String, ExtensionArgs>,
}

impl ExtensionValues {
    pub fn inactive(message: impl Into<String>) -> Self {
        Self {
            active: false,
            message: Some(message.into()),
            values: BTreeMap::new(),
        }
    }

    /// Build the `alwayson_scripts` object for an image-generation request.
    ///
    /// Only extensions named in `enabled` are included; the host app's
    /// pseudo-extension never is. Extensions without args are skipped.
    pub fn alwayson_scripts(&self, enabled: &HashSet<String>) -> Map<String, Value> {
        self.values
            .iter()
            .filter(|(name, args)| {
                name.as_str() != BASE_APP_EXTENSION
                    && enabled.contains(name.as_str())
                    && !args.args.is_empty()
            })
            .map(|(name, args)| {
                let mut entry = Map::new();
                entry.insert("args".to_string(), Value::Array(args.args.clone()));
                (name.clone(), Value::Object(entry))
            })
            .collect()
    }
}
