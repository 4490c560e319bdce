//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers per tab / edit mode
//! - `controls`: Control interaction and binding dispatch
//! - `backend`: Completion handlers for backend round trips

pub(crate) mod backend;
pub(crate) mod controls;
pub(crate) mod keys;
pub(crate) mod update;

#[cfg(test)]
mod tests;

use serde_json::Value;

use crate::message::Message;

// Re-export main entry point
pub use update::update;

#[cfg(test)]
pub(crate) use keys::handle_key;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Fetch the whole component tree, tagged with its generation
    FetchTree { generation: u64 },

    /// Liveness probe
    FetchStatus,

    /// Installed extensions with compatibility
    FetchExtensions,

    /// Current `alwayson_scripts` argument values
    FetchValues,

    /// Push a control's new value
    SetValue {
        /// Rendered generation the edit was made against
        generation: u64,
        node_id: String,
        value: Value,
        /// Value before the edit, for rollback
        previous: Value,
    },

    /// Fire an event on a node (button click)
    TriggerEvent { node_id: String, event: String },

    /// Re-read one node's value
    FetchValue { generation: u64, node_id: String },

    /// `POST clear`
    Clear,
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
