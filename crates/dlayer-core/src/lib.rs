//! # dlayer-core - Component Model and Shared Types
//!
//! Foundation crate for dlayer. Provides the remote component tree model,
//! the translation layer's response bodies, error handling and logging.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Component Model (`component`)
//! - [`ComponentNode`] - One typed node with props, events and ordered children
//! - [`ExtensionTree`] - Nodes contributed by one extension, plus its root ids
//! - [`ComponentTree`] - All extensions from one fetch
//! - [`Compatibility`] - Supported / Unsupported / Partially Supported
//!
//! ### Response Bodies (`api`)
//! - [`LayerStatus`], [`SupportedTypes`] - Liveness and capability probes
//! - [`ComponentTreeResponse`] - Full snapshot with `active`/`message`
//! - [`NodeResponse`], [`ValueResponse`], [`AckResponse`] - Per-node calls
//! - [`ExtensionInfo`], [`CompatibilityInfo`], [`ExtensionCompatibility`] - Extension listing
//! - [`ExtensionValues`], [`ExtensionArgs`] - Current argument values (`alwayson_scripts`)
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use dlayer_core::prelude::*;
//! ```

pub mod api;
pub mod component;
pub mod error;
pub mod logging;
pub mod prelude;

pub use api::{
    AckResponse, CompatibilityInfo, ComponentTreeResponse, ExtensionArgs, ExtensionCompatibility,
    ExtensionInfo, ExtensionValues, LayerStatus, NodeResponse, SupportedTypes, ValueResponse,
    BASE_APP_EXTENSION,
};
pub use component::{Choice, Compatibility, ComponentNode, ComponentTree, ExtensionTree, Props};
pub use error::{Error, Result, ResultExt};
