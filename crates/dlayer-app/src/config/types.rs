//! Configuration types for dlayer
//!
//! Defines:
//! - `Settings` - Global application settings (`config.toml`)
//! - `BindingMode` - What happens to a control when the backend rejects a write
//! - `StartTab` - Tab shown on startup

use std::time::Duration;

use serde::{Deserialize, Serialize};

use dlayer_client::{ClientConfig, DEFAULT_BASE_URL};
use dlayer_core::prelude::*;

/// Global settings from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub bindings: BindingSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

impl Settings {
    /// Client settings for the configured backend
    pub fn client_config(&self) -> Result<ClientConfig> {
        Ok(ClientConfig::new(&self.backend.base_url)?.with_timeout(self.backend.request_timeout()))
    }

    pub fn binding_mode(&self) -> BindingMode {
        if self.bindings.revert_on_rejection {
            BindingMode::RevertOnRejection
        } else {
            BindingMode::FireAndForget
        }
    }
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BackendSettings {
    /// WebUI API address, e.g. `http://127.0.0.1:7861`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Mirrors the backend's startup toggle; when off the component view
    /// shows a notice instead of fetching
    #[serde(default = "default_true")]
    pub enable_translation_layer: bool,
}

impl BackendSettings {
    /// Timeout as a [`Duration`], never below one second
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            enable_translation_layer: true,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

/// Two-way binding settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BindingSettings {
    /// Restore a control's previous value when the backend rejects a write
    #[serde(default)]
    pub revert_on_rejection: bool,
}

/// Handling of rejected writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingMode {
    /// Keep the optimistic value and report "not confirmed"
    #[default]
    FireAndForget,
    /// Roll the control back to the value it had before the edit
    RevertOnRejection,
}

/// UI settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    #[serde(default)]
    pub start_tab: StartTab,
}

/// Top-level tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StartTab {
    #[default]
    Components,
    Extensions,
    Values,
}

impl StartTab {
    pub fn label(&self) -> &'static str {
        match self {
            StartTab::Components => "Components",
            StartTab::Extensions => "Extensions",
            StartTab::Values => "Values",
        }
    }

    pub fn all() -> [StartTab; 3] {
        [StartTab::Components, StartTab::Extensions, StartTab::Values]
    }

    pub fn next(self) -> Self {
        match self {
            StartTab::Components => StartTab::Extensions,
            StartTab::Extensions => StartTab::Values,
            StartTab::Values => StartTab::Components,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            StartTab::Components => StartTab::Values,
            StartTab::Extensions => StartTab::Components,
            StartTab::Values => StartTab::Extensions,
        }
    }
}
