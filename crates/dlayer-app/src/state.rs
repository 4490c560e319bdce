//! Application state (Model in TEA pattern)

use std::collections::HashSet;

use dlayer_core::{ComponentTree, ExtensionValues, LayerStatus};

use crate::compat::{
    CompatibilityView, ExtensionSummary, ViewRow, STATUS_DISABLED, STATUS_INACTIVE, STATUS_LOADING,
};
use crate::config::{BindingMode, Settings, StartTab};
use crate::renderer::{BuilderRegistry, ControlId, ControlKind};

/// Lifecycle phase of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Where the component view's data came from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing requested yet
    #[default]
    Idle,
    Loading,
    Loaded,
    /// Backend answered `active=false`, or the fetch failed outright
    Inactive { message: Option<String> },
    /// Turned off in settings; never fetched
    Disabled,
}

/// In-progress edit of a text box or number control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub control: ControlId,
    pub buffer: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Components tab
// ─────────────────────────────────────────────────────────────────────────────

/// Rendered component tree plus everything needed to keep it in sync
#[derive(Debug, Clone, Default)]
pub struct LayerViewState {
    pub view: CompatibilityView,

    pub load: LoadState,

    /// Generation of the most recently issued tree fetch
    pub requested_generation: u64,

    /// Generation of the tree currently rendered into `view`
    pub rendered_generation: u64,

    /// Selected row in [`CompatibilityView::rows`]
    pub selected: usize,

    pub editing: Option<TextEdit>,

    /// Writes sent and not yet answered
    pub pending_writes: usize,
}

impl LayerViewState {
    /// Start a new fetch and return its generation
    pub fn begin_fetch(&mut self) -> u64 {
        self.requested_generation += 1;
        self.load = LoadState::Loading;
        self.requested_generation
    }

    /// Whether `generation` is the latest fetch issued
    pub fn is_current_fetch(&self, generation: u64) -> bool {
        generation == self.requested_generation
    }

    /// Whether a completion for `generation` still refers to the rendered controls
    pub fn is_rendered(&self, generation: u64) -> bool {
        generation == self.rendered_generation
    }

    /// Replace the rendered tree with a fresh snapshot
    pub fn install(&mut self, generation: u64, tree: &ComponentTree, registry: &BuilderRegistry) {
        let expanded: HashSet<String> = self
            .view
            .sections
            .iter()
            .filter(|s| s.expanded)
            .map(|s| s.name.clone())
            .collect();

        self.view = CompatibilityView::build(tree, registry);
        for section in &mut self.view.sections {
            section.expanded = expanded.contains(&section.name);
        }

        self.rendered_generation = generation;
        self.load = LoadState::Loaded;
        self.editing = None;
        self.clamp_selection();
    }

    /// Drop the rendered tree, keeping generation counters
    pub fn reset_view(&mut self, load: LoadState, generation: u64) {
        self.view = CompatibilityView::default();
        self.rendered_generation = generation;
        self.load = load;
        self.editing = None;
        self.selected = 0;
    }

    pub fn rows(&self) -> Vec<ViewRow> {
        self.view.rows()
    }

    pub fn selected_row(&self) -> Option<ViewRow> {
        self.rows().get(self.selected).copied()
    }

    /// Selected control, if the selection is on a control row
    pub fn selected_control(&self) -> Option<ControlId> {
        match self.selected_row()? {
            ViewRow::Control { id, .. } => Some(id),
            ViewRow::Section(_) => None,
        }
    }

    pub fn selected_kind(&self) -> Option<&ControlKind> {
        let id = self.selected_control()?;
        self.view.controls.get(id).map(|c| &c.kind)
    }

    pub fn clamp_selection(&mut self) {
        let len = self.rows().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Single status line for the component view
    pub fn status_line(&self) -> String {
        match &self.load {
            LoadState::Idle => String::new(),
            LoadState::Loading => STATUS_LOADING.to_string(),
            LoadState::Loaded => self.view.status_text(),
            LoadState::Inactive { message } => message
                .clone()
                .unwrap_or_else(|| STATUS_INACTIVE.to_string()),
            LoadState::Disabled => STATUS_DISABLED.to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AppState
// ─────────────────────────────────────────────────────────────────────────────

/// Complete application state (the Model in TEA)
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,

    pub settings: Settings,

    pub registry: BuilderRegistry,

    pub tab: StartTab,

    pub layer: LayerViewState,

    /// Last liveness probe
    pub status: Option<LayerStatus>,

    /// Extensions tab
    pub extensions: Vec<ExtensionSummary>,
    pub extensions_loading: bool,
    pub extensions_selected: usize,

    /// Values tab
    pub values: Option<ExtensionValues>,
    pub values_loading: bool,
    pub values_scroll: usize,

    /// Transient feedback (write results, clear), shown after the status line
    pub notice: Option<String>,

    pub show_help: bool,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self::with_registry(settings, BuilderRegistry::with_defaults())
    }

    pub fn with_registry(settings: Settings, registry: BuilderRegistry) -> Self {
        let mut layer = LayerViewState::default();
        if !settings.backend.enable_translation_layer {
            layer.load = LoadState::Disabled;
        }

        Self {
            phase: AppPhase::Running,
            tab: settings.ui.start_tab,
            settings,
            registry,
            layer,
            status: None,
            extensions: Vec::new(),
            extensions_loading: false,
            extensions_selected: 0,
            values: None,
            values_loading: false,
            values_scroll: 0,
            notice: None,
            show_help: false,
        }
    }

    pub fn binding_mode(&self) -> BindingMode {
        self.settings.binding_mode()
    }

    pub fn layer_enabled(&self) -> bool {
        self.settings.backend.enable_translation_layer
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    /// Whether key presses go to the edit buffer
    pub fn is_editing(&self) -> bool {
        self.tab == StartTab::Components && self.layer.editing.is_some()
    }

    /// Status line for the current tab, with any notice appended
    pub fn status_line(&self) -> String {
        let base = match self.tab {
            StartTab::Components => self.layer.status_line(),
            StartTab::Extensions if self.extensions_loading => STATUS_LOADING.to_string(),
            StartTab::Extensions => format!("{} extensions installed", self.extensions.len()),
            StartTab::Values if self.values_loading => STATUS_LOADING.to_string(),
            StartTab::Values => match &self.values {
                Some(values) if !values.active => values
                    .message
                    .clone()
                    .unwrap_or_else(|| STATUS_INACTIVE.to_string()),
                Some(values) => format!("{} extensions with values", values.values.len()),
                None => String::new(),
            },
        };

        match &self.notice {
            Some(notice) if !base.is_empty() => format!("{base} | {notice}"),
            Some(notice) => notice.clone(),
            None => base,
        }
    }

    /// Names of enabled extensions, for building `alwayson_scripts`
    pub fn enabled_extensions(&self) -> HashSet<String> {
        self.extensions
            .iter()
            .filter(|e| e.enabled)
            .map(|e| e.name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dlayer_client::test_utils::sample_tree;

    #[test]
    fn test_disabled_layer_never_loads() {
        let mut settings = Settings::default();
        settings.backend.enable_translation_layer = false;
        let state = AppState::new(settings);

        assert_eq!(state.layer.load, LoadState::Disabled);
        assert_eq!(
            state.status_line(),
            "Translation Layer is disabled in startup settings."
        );
    }

    #[test]
    fn test_begin_fetch_bumps_generation() {
        let mut layer = LayerViewState::default();
        assert_eq!(layer.begin_fetch(), 1);
        assert_eq!(layer.begin_fetch(), 2);
        assert!(!layer.is_current_fetch(1));
        assert!(layer.is_current_fetch(2));
        assert_eq!(layer.status_line(), "Loading...");
    }

    #[test]
    fn test_install_keeps_expanded_sections() {
        let registry = BuilderRegistry::default();
        let mut layer = LayerViewState::default();
        layer.install(1, &sample_tree(), &registry);
        layer.view.toggle_section(0);
        layer.selected = 3;

        layer.install(2, &sample_tree(), &registry);
        assert!(layer.view.sections[0].expanded);
        assert_eq!(layer.selected, 3);
        assert!(layer.is_rendered(2));
    }

    #[test]
    fn test_install_clamps_selection() {
        let mut layer = LayerViewState {
            selected: 10,
            ..Default::default()
        };
        layer.install(1, &sample_tree(), &BuilderRegistry::default());
        assert_eq!(layer.selected, 0);
        assert_eq!(layer.selected_row(), Some(ViewRow::Section(0)));
        assert_eq!(layer.selected_control(), None);
    }

    #[test]
    fn test_inactive_status_line() {
        let mut layer = LayerViewState::default();
        layer.reset_view(LoadState::Inactive { message: None }, 1);
        assert_eq!(layer.status_line(), "Translation layer not active");

        layer.reset_view(
            LoadState::Inactive {
                message: Some("Backend starting".into()),
            },
            2,
        );
        assert_eq!(layer.status_line(), "Backend starting");
    }

    #[test]
    fn test_notice_appended() {
        let mut state = AppState::new(Settings::default());
        state.layer.load = LoadState::Loading;
        state.notice = Some("Value for a not confirmed".into());
        assert_eq!(state.status_line(), "Loading... | Value for a not confirmed");
    }
}
