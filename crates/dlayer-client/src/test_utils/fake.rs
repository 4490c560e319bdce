//! In-memory [`TranslationLayer`] that records every call

use std::sync::{Arc, Mutex};

use serde_json::Value;

use dlayer_core::{
    ComponentNode, ComponentTree, ComponentTreeResponse, ExtensionCompatibility, ExtensionInfo,
    ExtensionValues, LayerStatus, SupportedTypes,
};

use crate::layer::TranslationLayer;

/// One call observed by [`FakeLayer`]
#[derive(Debug, Clone, PartialEq)]
pub enum FakeCall {
    FetchStatus,
    FetchSupportedTypes,
    FetchTree,
    FetchExtensions,
    FetchExtensionCompatibility(String),
    FetchNode(String),
    FetchValue(String),
    SetValue(String, Value),
    TriggerEvent(String, String, Option<Value>),
    FetchExtensionValues,
    Clear,
}

#[derive(Debug, Default)]
struct FakeState {
    tree: ComponentTreeResponse,
    status: LayerStatus,
    supported_types: SupportedTypes,
    extensions: Vec<ExtensionInfo>,
    values: ExtensionValues,
    reject_writes: bool,
    calls: Vec<FakeCall>,
}

/// Scriptable backend double. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct FakeLayer {
    state: Arc<Mutex<FakeState>>,
}

impl FakeLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `tree` as an active snapshot
    pub fn with_tree(self, tree: ComponentTree) -> Self {
        self.set_tree(ComponentTreeResponse {
            active: true,
            message: None,
            tree,
        });
        self
    }

    pub fn set_tree(&self, response: ComponentTreeResponse) {
        self.state.lock().unwrap().tree = response;
    }

    pub fn set_status(&self, status: LayerStatus) {
        self.state.lock().unwrap().status = status;
    }

    pub fn set_extensions(&self, extensions: Vec<ExtensionInfo>) {
        self.state.lock().unwrap().extensions = extensions;
    }

    pub fn set_values(&self, values: ExtensionValues) {
        self.state.lock().unwrap().values = values;
    }

    /// Make `set_value` and `trigger_event` report failure
    pub fn reject_writes(&self, reject: bool) {
        self.state.lock().unwrap().reject_writes = reject;
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Only the `SetValue` calls, as `(id, value)`
    pub fn writes(&self) -> Vec<(String, Value)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                FakeCall::SetValue(id, value) => Some((id, value)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: FakeCall) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn node(&self, id: &str) -> Option<ComponentNode> {
        self.state.lock().unwrap().tree.tree.node(id).ok().cloned()
    }
}

impl TranslationLayer for FakeLayer {
    async fn fetch_status(&self) -> LayerStatus {
        self.record(FakeCall::FetchStatus);
        self.state.lock().unwrap().status.clone()
    }

    async fn fetch_supported_types(&self) -> SupportedTypes {
        self.record(FakeCall::FetchSupportedTypes);
        self.state.lock().unwrap().supported_types.clone()
    }

    async fn fetch_tree(&self) -> ComponentTreeResponse {
        self.record(FakeCall::FetchTree);
        self.state.lock().unwrap().tree.clone()
    }

    async fn fetch_extensions_with_compatibility(&self) -> Vec<ExtensionInfo> {
        self.record(FakeCall::FetchExtensions);
        self.state.lock().unwrap().extensions.clone()
    }

    async fn fetch_extension_compatibility(&self, name: &str) -> Option<ExtensionCompatibility> {
        self.record(FakeCall::FetchExtensionCompatibility(name.to_string()));
        let state = self.state.lock().unwrap();
        let ext = state.tree.tree.extension(name).ok()?;
        Some(ExtensionCompatibility {
            extension_name: name.to_string(),
            info: dlayer_core::CompatibilityInfo {
                supported: ext.supported,
                component_types: ext.component_types.clone(),
                unsupported_types: ext.unsupported_types.clone(),
                component_count: ext.component_count,
            },
        })
    }

    async fn fetch_node(&self, id: &str) -> Option<ComponentNode> {
        self.record(FakeCall::FetchNode(id.to_string()));
        self.node(id)
    }

    async fn fetch_value(&self, id: &str) -> Option<Value> {
        self.record(FakeCall::FetchValue(id.to_string()));
        self.node(id).and_then(|n| n.prop("value").cloned())
    }

    async fn set_value(&self, id: &str, value: Value) -> bool {
        self.record(FakeCall::SetValue(id.to_string(), value));
        !self.state.lock().unwrap().reject_writes
    }

    async fn trigger_event(&self, id: &str, event: &str, data: Option<Value>) -> bool {
        self.record(FakeCall::TriggerEvent(
            id.to_string(),
            event.to_string(),
            data,
        ));
        !self.state.lock().unwrap().reject_writes
    }

    async fn fetch_extension_values(&self) -> ExtensionValues {
        self.record(FakeCall::FetchExtensionValues);
        self.state.lock().unwrap().values.clone()
    }

    async fn clear(&self) -> bool {
        self.record(FakeCall::Clear);
        let mut state = self.state.lock().unwrap();
        state.tree.tree = ComponentTree::default();
        true
    }
}
