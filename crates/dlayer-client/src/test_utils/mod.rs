//! Test utilities for client and application tests
//!
//! - [`MockBackend`] - canned-response HTTP server for exercising the real client
//! - [`FakeLayer`] - in-memory [`crate::TranslationLayer`] that records calls
//! - fixtures - small component trees with the shapes the renderer must handle

mod fake;
mod fixtures;
mod mock_backend;

pub use fake::{FakeCall, FakeLayer};
pub use fixtures::{sample_tree, sample_tree_json, shared_child_tree, tree_with, SAMPLE_EXTENSION};
pub use mock_backend::{MockBackend, RecordedRequest};
