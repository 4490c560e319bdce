//! Settings loader for `<config dir>/dlayer/config.toml`

use std::path::{Path, PathBuf};

use super::types::Settings;
use dlayer_core::prelude::*;

const CONFIG_FILENAME: &str = "config.toml";
const DLAYER_DIR: &str = "dlayer";

/// Overrides `backend.base_url`
pub const BASE_URL_ENV_VAR: &str = "DLAYER_BASE_URL";
/// Overrides `bindings.revert_on_rejection`
pub const REVERT_ENV_VAR: &str = "DLAYER_REVERT_ON_REJECTION";

/// `<config dir>/dlayer/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(DLAYER_DIR).join(CONFIG_FILENAME))
}

/// Load settings from `path`. Missing or unparsable files give defaults.
pub fn load_settings(path: &Path) -> Settings {
    if !path.exists() {
        debug!("No config file at {:?}, using defaults", path);
        return Settings::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            Settings::default()
        }
    }
}

/// Resolve the effective settings.
///
/// Precedence, lowest first: defaults, config file (`explicit` or the default
/// path), environment variables, then `url_override` from the command line.
pub fn resolve_settings(explicit: Option<&Path>, url_override: Option<&str>) -> Settings {
    let mut settings = match explicit.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => load_settings(&path),
        None => Settings::default(),
    };
    apply_env_overrides(&mut settings);

    if let Some(url) = url_override {
        settings.backend.base_url = url.to_string();
    }
    settings
}

/// Apply `DLAYER_BASE_URL` and `DLAYER_REVERT_ON_REJECTION`
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(url) = std::env::var(BASE_URL_ENV_VAR) {
        if !url.trim().is_empty() {
            debug!("{} overrides backend.base_url", BASE_URL_ENV_VAR);
            settings.backend.base_url = url.trim().to_string();
        }
    }

    if let Ok(raw) = std::env::var(REVERT_ENV_VAR) {
        match parse_flag(&raw) {
            Some(flag) => settings.bindings.revert_on_rejection = flag,
            None => warn!("Ignoring {}={:?}: expected true/false", REVERT_ENV_VAR, raw),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Write settings to `path`, creating parent directories
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir)
                .map_err(|e| Error::config(format!("Failed to create {:?}: {}", dir, e)))?;
        }
    }

    let content = toml::to_string_pretty(settings)
        .map_err(|e| Error::config(format!("Failed to serialize settings: {}", e)))?;
    let full_content = format!("{}{}", generate_config_header(), content);

    // Atomic write: write to temp, then rename
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &full_content)
        .map_err(|e| Error::config(format!("Failed to write temp file: {}", e)))?;

    std::fs::rename(&temp_path, path)
        .map_err(|e| Error::config(format!("Failed to rename temp file: {}", e)))?;

    info!("Saved settings to {:?}", path);
    Ok(())
}

fn generate_config_header() -> String {
    r#"# dlayer Configuration
# Overrides: DLAYER_BASE_URL, DLAYER_REVERT_ON_REJECTION, --url

"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BindingMode, StartTab};
    use serial_test::serial;
    use tempfile::tempdir;

    struct EnvGuard(&'static str);

    impl EnvGuard {
        fn set(key: &'static str, value: &str) -> Self {
            std::env::set_var(key, value);
            Self(key)
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            std::env::remove_var(self.0);
        }
    }

    #[test]
    fn test_load_settings_missing_file() {
        let temp = tempdir().unwrap();
        let settings = load_settings(&temp.path().join("config.toml"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_settings_custom() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[backend]
base_url = "http://10.0.0.5:7860"
request_timeout_secs = 10
enable_translation_layer = false

[ui]
start_tab = "extensions"
"#,
        )
        .unwrap();

        let settings = load_settings(&path);
        assert_eq!(settings.backend.base_url, "http://10.0.0.5:7860");
        assert_eq!(settings.backend.request_timeout_secs, 10);
        assert!(!settings.backend.enable_translation_layer);
        assert_eq!(settings.ui.start_tab, StartTab::Extensions);
    }

    #[test]
    fn test_load_settings_invalid_toml() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "not valid toml {{{{").unwrap();

        assert_eq!(load_settings(&path), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.bindings.revert_on_rejection = true;
        settings.ui.start_tab = StartTab::Values;
        save_settings(&path, &settings).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# dlayer Configuration"));
        assert!(!path.with_extension("toml.tmp").exists());
        assert_eq!(load_settings(&path), settings);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[backend]\nbase_url = \"http://file:1\"\n").unwrap();

        let _url = EnvGuard::set(BASE_URL_ENV_VAR, "http://env:2");
        let _revert = EnvGuard::set(REVERT_ENV_VAR, "yes");

        let settings = resolve_settings(Some(&path), None);
        assert_eq!(settings.backend.base_url, "http://env:2");
        assert_eq!(settings.binding_mode(), BindingMode::RevertOnRejection);
    }

    #[test]
    #[serial]
    fn test_cli_url_beats_env() {
        let temp = tempdir().unwrap();
        let _url = EnvGuard::set(BASE_URL_ENV_VAR, "http://env:2");

        let settings = resolve_settings(
            Some(&temp.path().join("absent.toml")),
            Some("http://cli:3"),
        );
        assert_eq!(settings.backend.base_url, "http://cli:3");
    }

    #[test]
    #[serial]
    fn test_bad_revert_flag_ignored() {
        let _revert = EnvGuard::set(REVERT_ENV_VAR, "sometimes");
        let mut settings = Settings::default();
        apply_env_overrides(&mut settings);
        assert_eq!(settings.binding_mode(), BindingMode::FireAndForget);
    }
}
