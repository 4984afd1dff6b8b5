//! Configuration for SliceKit preview builds
//!
//! Supports JSON and TOML file formats, chosen by file extension. Every
//! section and field falls back to its default when missing, so a config
//! file only needs to list what it changes.
//!
//! Configuration is organized into logical sections:
//! - Output settings (preview record location and formatting)
//! - Scan settings (section markers, end-of-stream handling)
//! - Palette overrides (feature label colors)

use serde::{Deserialize, Serialize};
use slicekit_core::constants::{
    DEFAULT_OUTPUT_PATH, GCODE_END_MARKER, THUMBNAIL_BEGIN_MARKER, THUMBNAIL_END_MARKER,
};
use slicekit_core::Rgb;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Preview record output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Where the JSON preview record is written
    pub path: PathBuf,
    /// Indent the JSON output
    pub pretty: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            pretty: false,
        }
    }
}

/// Section markers and end-of-stream handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Substring that opens the thumbnail block
    pub thumbnail_begin: String,
    /// Substring that closes the thumbnail block
    pub thumbnail_end: String,
    /// Substring after which moves are no longer recorded
    pub gcode_end: String,
    /// Only record moves after the thumbnail block
    pub wait_for_thumbnail: bool,
    /// Keep segments of an extrusion run still open at end of input
    pub flush_trailing_run: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            thumbnail_begin: THUMBNAIL_BEGIN_MARKER.to_string(),
            thumbnail_end: THUMBNAIL_END_MARKER.to_string(),
            gcode_end: GCODE_END_MARKER.to_string(),
            wait_for_thumbnail: true,
            flush_trailing_run: false,
        }
    }
}

/// Feature colors that replace or extend the built-in table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteSettings {
    /// Feature label to `[r, g, b]`
    pub overrides: BTreeMap<String, Rgb>,
}

/// Complete preview configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputSettings,
    pub scan: ScanSettings,
    pub palette: PaletteSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = if has_extension(path, "json") {
            serde_json::from_str(&content)?
        } else if has_extension(path, "toml") {
            toml::from_str(&content)?
        } else {
            return Err(unsupported_format(path));
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = if has_extension(path, "json") {
            serde_json::to_string_pretty(self)?
        } else if has_extension(path, "toml") {
            toml::to_string_pretty(self)?
        } else {
            return Err(unsupported_format(path));
        };

        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Load config from `path` when it exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Platform config location: `<config dir>/slicekit/config.toml`
    pub fn default_config_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("slicekit").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory(
                    "no configuration directory on this platform".to_string(),
                )
            })
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.output.path.as_os_str().is_empty() {
            return Err(SettingsError::InvalidSetting {
                key: "output.path".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        // Empty markers would match every line
        for (key, marker) in [
            ("scan.thumbnail_begin", &self.scan.thumbnail_begin),
            ("scan.thumbnail_end", &self.scan.thumbnail_end),
            ("scan.gcode_end", &self.scan.gcode_end),
        ] {
            if marker.is_empty() {
                return Err(ConfigError::MissingKey(key.to_string()).into());
            }
        }

        for (label, color) in &self.palette.overrides {
            if label.is_empty() {
                return Err(SettingsError::InvalidSetting {
                    key: "palette.overrides".to_string(),
                    reason: "feature label must not be empty".to_string(),
                });
            }
            if !color.is_normalized() {
                return Err(ConfigError::ValueOutOfRange {
                    key: format!("palette.overrides.{}", label),
                    value: color.to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e == ext)
}

fn unsupported_format(path: &Path) -> SettingsError {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();
    ConfigError::UnsupportedFormat(format!("'{}' (config file must be .json or .toml)", ext))
        .into()
}
