//! # dlayer-client - Translation Layer HTTP Client
//!
//! Talks to the backend's `/translation-layer/*` REST endpoints.
//!
//! Depends on [`dlayer_core`] for the component model and error handling.
//!
//! ## Public API
//!
//! - [`TranslationLayer`] - Async backend abstraction; every method degrades
//!   to an empty/false/`None` result instead of failing
//! - [`TranslationLayerClient`] - reqwest implementation, plus strict `try_*`
//!   methods that keep the error
//! - [`ClientConfig`] - Base URL and request timeout
//! - [`Endpoint`], [`parse_base_url()`] - Route construction

pub mod client;
pub mod endpoints;
pub mod layer;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use client::{ClientConfig, TranslationLayerClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use endpoints::{parse_base_url, Endpoint};
pub use layer::{LocalTranslationLayer, TranslationLayer};
