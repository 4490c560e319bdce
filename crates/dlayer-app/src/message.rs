//! Message types for the application (TEA pattern)

use serde_json::Value;

use crate::config::StartTab;
use crate::input_key::InputKey;
use dlayer_core::{ComponentTreeResponse, ExtensionInfo, ExtensionValues, LayerStatus};

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates
    Tick,

    /// Leave the application
    Quit,

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    SelectNext,
    SelectPrevious,
    SelectFirst,
    SelectLast,
    PageDown,
    PageUp,
    NextTab,
    PreviousTab,
    ShowTab(StartTab),
    ToggleHelp,

    // ─────────────────────────────────────────────────────────
    // Control interaction (Components tab)
    // ─────────────────────────────────────────────────────────
    /// Enter/Space on the selected row
    Activate,
    /// Left/Right on the selected control, in whole steps
    Adjust(i32),
    ExpandAll,
    CollapseAll,
    /// Commit the text/number edit buffer
    CommitEdit,
    CancelEdit,
    /// Replace the edit buffer
    EditInput { text: String },
    /// Re-read the selected control's value from the backend
    SyncSelected,

    // ─────────────────────────────────────────────────────────
    // Backend round trips
    // ─────────────────────────────────────────────────────────
    /// Refresh whatever the current tab shows
    Refresh,
    RefreshTree,
    TreeFetched {
        generation: u64,
        response: Box<ComponentTreeResponse>,
    },
    RefreshStatus,
    StatusFetched { status: LayerStatus },
    RefreshExtensions,
    ExtensionsFetched { extensions: Vec<ExtensionInfo> },
    RefreshValues,
    ValuesFetched { values: Box<ExtensionValues> },
    ValueWriteCompleted {
        generation: u64,
        node_id: String,
        accepted: bool,
        /// Value the write carried
        value: Value,
        previous: Value,
    },
    EventTriggered {
        node_id: String,
        event: String,
        accepted: bool,
    },
    ValueFetched {
        generation: u64,
        node_id: String,
        value: Option<Value>,
    },
    /// Ask the backend to forget its recorded tree
    ClearLayer,
    LayerCleared { accepted: bool },
}
