// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, loaded from a
//! `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language
//! - `[upload]` - Endpoint, file field, timeout and extra form fields
//! - `[camera]` - Device, facing mode, frame pacing and still quality
//!
//! The acceptance policy (types and size limit) is deliberately absent: it
//! is fixed.
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()` with explicit path
//! 2. `--config-dir` CLI argument or `LENS_INTAKE_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use lens_intake::app::config;
//!
//! let (config, _warning) = config::load();
//! println!("uploading to {}", config.upload_endpoint());
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::application::intake::IntakeSettings;
use crate::application::port::camera::{CaptureConstraints, FacingMode};
use crate::error::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default)]
    pub language: Option<String>,
}

/// Upload endpoint settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UploadConfig {
    /// URL receiving the multipart form.
    #[serde(default = "default_endpoint")]
    pub endpoint: Option<String>,

    /// Form field carrying the image.
    #[serde(default = "default_file_field")]
    pub file_field: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: Option<u64>,

    /// Extra text fields sent with every upload.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            file_field: default_file_field(),
            timeout_secs: default_timeout_secs(),
            fields: BTreeMap::new(),
        }
    }
}

/// Camera settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CameraConfig {
    /// Device path or name overriding the platform default.
    #[serde(default)]
    pub device: Option<String>,

    /// Preferred camera direction.
    #[serde(default, deserialize_with = "deserialize_facing_mode")]
    pub facing_mode: FacingMode,

    /// Delay between two live frames in milliseconds.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: Option<u64>,

    /// JPEG quality of captured stills (1-100).
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: Option<u8>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: None,
            facing_mode: FacingMode::Environment,
            frame_interval_ms: default_frame_interval_ms(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub upload: UploadConfig,

    #[serde(default)]
    pub camera: CameraConfig,
}

impl Config {
    /// Upload URL, falling back to the default when unset or blank.
    #[must_use]
    pub fn upload_endpoint(&self) -> &str {
        self.upload
            .endpoint
            .as_deref()
            .filter(|endpoint| !endpoint.trim().is_empty())
            .unwrap_or(DEFAULT_UPLOAD_ENDPOINT)
    }

    #[must_use]
    pub fn upload_timeout(&self) -> Duration {
        let secs = self
            .upload
            .timeout_secs
            .unwrap_or(DEFAULT_UPLOAD_TIMEOUT_SECS)
            .clamp(MIN_UPLOAD_TIMEOUT_SECS, MAX_UPLOAD_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        let ms = self
            .camera
            .frame_interval_ms
            .unwrap_or(DEFAULT_FRAME_INTERVAL_MS)
            .clamp(MIN_FRAME_INTERVAL_MS, MAX_FRAME_INTERVAL_MS);
        Duration::from_millis(ms)
    }

    #[must_use]
    pub fn jpeg_quality(&self) -> u8 {
        self.camera
            .jpeg_quality
            .unwrap_or(DEFAULT_JPEG_QUALITY)
            .clamp(MIN_JPEG_QUALITY, MAX_JPEG_QUALITY)
    }

    /// Builds the intake context settings from this configuration.
    #[must_use]
    pub fn intake_settings(&self) -> IntakeSettings {
        let file_field = self
            .upload
            .file_field
            .as_deref()
            .filter(|field| !field.trim().is_empty())
            .unwrap_or(DEFAULT_FILE_FIELD)
            .to_string();

        IntakeSettings {
            constraints: CaptureConstraints {
                facing_mode: self.camera.facing_mode,
                device: self.camera.device.clone(),
                frame_interval: self.frame_interval(),
            },
            file_field,
            extra_fields: self
                .upload
                .fields
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        }
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_endpoint() -> Option<String> {
    Some(DEFAULT_UPLOAD_ENDPOINT.to_string())
}

fn default_file_field() -> Option<String> {
    Some(DEFAULT_FILE_FIELD.to_string())
}

fn default_timeout_secs() -> Option<u64> {
    Some(DEFAULT_UPLOAD_TIMEOUT_SECS)
}

fn default_frame_interval_ms() -> Option<u64> {
    Some(DEFAULT_FRAME_INTERVAL_MS)
}

fn default_jpeg_quality() -> Option<u8> {
    Some(DEFAULT_JPEG_QUALITY)
}

fn deserialize_facing_mode<'de, D>(deserializer: D) -> std::result::Result<FacingMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    FacingMode::parse(&raw)
        .ok_or_else(|| D::Error::custom(format!("invalid facing_mode: {}", raw)))
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
/// default config with the i18n key of a warning explaining what went wrong.
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
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Tests
// =============================================================================
