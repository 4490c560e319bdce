//! dlayer-app - Component rendering, application state and orchestration
//!
//! This crate renders a fetched component graph into bound controls, groups
//! them per extension, and implements the TEA (The Elm Architecture) loop
//! that keeps controls and backend in sync. Configuration loading lives here
//! too.

pub mod actions;
pub mod compat;
pub mod config;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod process;
pub mod renderer;
pub mod state;

// Re-export primary types
pub use compat::{CompatibilityView, ExtensionSection, ExtensionSummary, ViewRow};
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use renderer::{render_tree, Binding, BuilderRegistry, ControlId, ControlKind, ControlTree};
pub use state::{AppState, LoadState};
