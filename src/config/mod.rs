// SPDX-License-Identifier: MPL-2.0
//! This module handles the client's configuration, including loading and saving
//! preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[api]` - Catalog location and request timeout
//! - `[ui]` - Maintenance mode switches
//! - `[prefetch]` - Neighbouring image cache
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `MINORI_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! The catalog also publishes a [`RemoteUiConfig`] document that can be
//! merged over the local file with [`Config::apply_remote`].
//!
//! # Examples
//!
//! ```no_run
//! use minori::config;
//!
//! let (mut config, _warning) = config::load();
//! config.ui.maint_mode = true;
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Catalog service location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    /// Origin of the catalog API. Requests go to `{api_url}/api/...`.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Origin serving image files and thumbnails.
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ApiConfig {
    /// Returns the request timeout clamped to the supported range.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .clamp(MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS),
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            image_base_url: default_image_base_url(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Presentation switches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UiConfig {
    /// Whether the catalog permits maintenance mode at all.
    #[serde(default)]
    pub allow_maint_mode: bool,

    /// Maintenance mode: listings include disabled albums.
    #[serde(default)]
    pub maint_mode: bool,
}

impl UiConfig {
    /// Disabled albums are listed only when maintenance mode is both allowed and on.
    #[must_use]
    pub fn include_disabled(&self) -> bool {
        self.allow_maint_mode && self.maint_mode
    }

    /// Flips maintenance mode. Returns the new effective state.
    ///
    /// Has no effect unless maintenance mode is allowed.
    pub fn toggle_maint_mode(&mut self) -> bool {
        if self.allow_maint_mode {
            self.maint_mode = !self.maint_mode;
        }
        self.include_disabled()
    }
}

/// Prefetch cache settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrefetchSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Byte budget for cached image data.
    #[serde(default = "default_prefetch_max_bytes")]
    pub max_bytes: usize,

    /// Maximum number of cached images.
    #[serde(default = "default_prefetch_max_images")]
    pub max_images: usize,

    /// Neighbours prefetched in each direction.
    #[serde(default = "default_prefetch_count")]
    pub prefetch_count: usize,
}

impl Default for PrefetchSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_bytes: DEFAULT_PREFETCH_MAX_BYTES,
            max_images: DEFAULT_PREFETCH_MAX_IMAGES,
            prefetch_count: DEFAULT_PREFETCH_COUNT,
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Client configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub prefetch: PrefetchSettings,
}

impl Config {
    /// Overlays the catalog's published UI document on top of local settings.
    ///
    /// Remote values win where present. Losing the maintenance permission also
    /// switches maintenance mode off.
    pub fn apply_remote(&mut self, remote: &RemoteUiConfig) {
        if let Some(api_url) = &remote.api_url {
            self.api.api_url.clone_from(api_url);
        }
        if let Some(image_base_url) = &remote.image_base_url {
            self.api.image_base_url.clone_from(image_base_url);
        }
        if let Some(allow) = remote.allow_maint_mode {
            self.ui.allow_maint_mode = allow;
            if !allow {
                self.ui.maint_mode = false;
            }
        }
    }
}

/// UI document published by the catalog at `/.ui/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RemoteUiConfig {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub image_base_url: Option<String>,
    #[serde(default)]
    pub allow_maint_mode: Option<bool>,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_image_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

fn default_prefetch_max_bytes() -> usize {
    DEFAULT_PREFETCH_MAX_BYTES
}

fn default_prefetch_max_images() -> usize {
    DEFAULT_PREFETCH_MAX_IMAGES
}

fn default_prefetch_count() -> usize {
    DEFAULT_PREFETCH_COUNT
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "falling back to default config");
                    return (
                        Config::default(),
                        Some(format!("Failed to load {} - {err}", path.display())),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            api: ApiConfig {
                api_url: "https://catalog.example".to_string(),
                image_base_url: "https://cdn.example".to_string(),
                request_timeout_secs: 10,
            },
            ui: UiConfig {
                allow_maint_mode: true,
                maint_mode: true,
            },
            prefetch: PrefetchSettings {
                enabled: false,
                max_bytes: MIN_PREFETCH_MAX_BYTES,
                max_images: 4,
                prefetch_count: 2,
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let result = load_from_path(&config_path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn load_with_override_falls_back_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[api\nbroken")
            .expect("failed to write invalid toml");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn load_with_override_missing_file_is_silent_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn partial_sections_use_field_defaults() {
        let config: Config = toml::from_str("[api]\napi_url = \"https://x.example\"\n")
            .expect("partial config should parse");
        assert_eq!(config.api.api_url, "https://x.example");
        assert_eq!(config.api.image_base_url, DEFAULT_IMAGE_BASE_URL);
        assert_eq!(config.prefetch, PrefetchSettings::default());
    }

    #[test]
    fn request_timeout_is_clamped() {
        let mut api = ApiConfig::default();
        api.request_timeout_secs = 0;
        assert_eq!(api.request_timeout(), Duration::from_secs(MIN_REQUEST_TIMEOUT_SECS));
        api.request_timeout_secs = 10_000;
        assert_eq!(api.request_timeout(), Duration::from_secs(MAX_REQUEST_TIMEOUT_SECS));
    }

    #[test]
    fn maint_mode_requires_permission() {
        let mut ui = UiConfig::default();
        assert!(!ui.toggle_maint_mode());
        assert!(!ui.maint_mode);

        ui.allow_maint_mode = true;
        assert!(ui.toggle_maint_mode());
        assert!(ui.include_disabled());
    }

    #[test]
    fn remote_config_overrides_local_values() {
        let mut config = Config::default();
        config.ui.allow_maint_mode = true;
        config.ui.maint_mode = true;

        let remote: RemoteUiConfig = serde_json::from_str(
            r#"{"api_url": "https://api.example", "allow_maint_mode": false}"#,
        )
        .expect("remote config should parse");
        config.apply_remote(&remote);

        assert_eq!(config.api.api_url, "https://api.example");
        assert_eq!(config.api.image_base_url, DEFAULT_IMAGE_BASE_URL);
        assert!(!config.ui.allow_maint_mode);
        assert!(!config.ui.maint_mode);
    }
}
