//! Configuration file parsing for dlayer
//!
//! Supports:
//! - `<config dir>/dlayer/config.toml` (or `--config PATH`) - Global settings
//! - `DLAYER_BASE_URL` / `DLAYER_REVERT_ON_REJECTION` - Environment overrides

pub mod settings;
pub mod types;

pub use settings::{
    apply_env_overrides, default_config_path, load_settings, resolve_settings, save_settings,
    BASE_URL_ENV_VAR, REVERT_ENV_VAR,
};
pub use types::*;
