//! Backend abstraction used by the application layer
//!
//! Every method degrades instead of failing: transport errors and non-2xx
//! replies come back as empty/false/`None` results so callers only ever deal
//! with "inactive" or "not confirmed" states.

use serde_json::Value;

use dlayer_core::{
    ComponentNode, ComponentTreeResponse, ExtensionCompatibility, ExtensionInfo, ExtensionValues,
    LayerStatus, SupportedTypes,
};

/// Asynchronous access to a translation layer backend.
///
/// `TranslationLayer` is the `Send` variant spawned tasks require;
/// implement that one.
#[trait_variant::make(TranslationLayer: Send)]
pub trait LocalTranslationLayer {
    /// Cheap liveness probe
    async fn fetch_status(&self) -> LayerStatus;

    /// Capability listing, for diagnostics only
    async fn fetch_supported_types(&self) -> SupportedTypes;

    /// Full snapshot of every extension's component tree
    async fn fetch_tree(&self) -> ComponentTreeResponse;

    async fn fetch_extensions_with_compatibility(&self) -> Vec<ExtensionInfo>;

    async fn fetch_extension_compatibility(&self, name: &str) -> Option<ExtensionCompatibility>;

    async fn fetch_node(&self, id: &str) -> Option<ComponentNode>;

    async fn fetch_value(&self, id: &str) -> Option<Value>;

    /// `true` only when the backend confirmed the write
    async fn set_value(&self, id: &str, value: Value) -> bool;

    async fn trigger_event(&self, id: &str, event: &str, data: Option<Value>) -> bool;

    async fn fetch_extension_values(&self) -> ExtensionValues;

    /// Drop the backend's recorded component tree
    async fn clear(&self) -> bool;
}
