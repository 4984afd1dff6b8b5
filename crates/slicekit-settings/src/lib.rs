//! SliceKit Settings Crate
//!
//! Handles preview configuration: output location, section markers for the
//! scan, and feature palette overrides.

pub mod config;
pub mod error;

pub use config::{Config, OutputSettings, PaletteSettings, ScanSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
