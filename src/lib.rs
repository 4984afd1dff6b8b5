//! # SliceKit
//!
//! Turns 3D-printer G-code into renderable line geometry and a short print
//! summary for a web previewer.
//!
//! ## Architecture
//!
//! SliceKit is organized as a workspace with multiple crates:
//!
//! 1. **slicekit-core** - Shared types, colors, markers, errors
//! 2. **slicekit-visualizer** - Motion interpreter, geometry buffers, file pass, export
//! 3. **slicekit-settings** - Config files and validation
//! 4. **slicekit** - Command-line binary that ties the crates together

use std::path::Path;

pub use slicekit_core::{Error, GcodeError, Result, Rgb};
pub use slicekit_settings::{Config, OutputSettings, PaletteSettings, ScanSettings};
pub use slicekit_visualizer::{
    FeaturePalette, GeometryBuffers, MotionInterpreter, PrintData, PrintFileProcessor,
    ScanOptions,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
/// - INFO by default, DEBUG when `verbose` is set
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Scan options for a pass, taken from the `[scan]` settings
pub fn scan_options(settings: &ScanSettings) -> ScanOptions {
    ScanOptions {
        thumbnail_begin: settings.thumbnail_begin.clone(),
        thumbnail_end: settings.thumbnail_end.clone(),
        gcode_end: settings.gcode_end.clone(),
        wait_for_thumbnail: settings.wait_for_thumbnail,
        flush_trailing_run: settings.flush_trailing_run,
    }
}

/// Built-in feature colors with the configured overrides applied
pub fn feature_palette(settings: &PaletteSettings) -> FeaturePalette {
    let mut palette = FeaturePalette::new();
    palette.extend(
        settings
            .overrides
            .iter()
            .map(|(label, color)| (label.as_str(), *color)),
    );
    palette
}

/// Run one preview pass over `input` with the given configuration
pub fn build_preview(input: &Path, config: &Config) -> Result<PrintData> {
    PrintFileProcessor::process_file(
        input,
        scan_options(&config.scan),
        feature_palette(&config.palette),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_options_follow_settings() {
        let settings = ScanSettings {
            flush_trailing_run: true,
            gcode_end: "; end".to_string(),
            ..ScanSettings::default()
        };
        let options = scan_options(&settings);
        assert!(options.flush_trailing_run);
        assert_eq!(options.gcode_end, "; end");
        assert_eq!(options.thumbnail_begin, ScanOptions::default().thumbnail_begin);
    }

    #[test]
    fn test_default_settings_match_default_options() {
        assert_eq!(scan_options(&ScanSettings::default()), ScanOptions::default());
    }

    #[test]
    fn test_palette_overrides_merge() {
        let mut settings = PaletteSettings::default();
        settings
            .overrides
            .insert("Perimeter".to_string(), Rgb::new(0.0, 0.0, 1.0));
        settings
            .overrides
            .insert("Wipe tower".to_string(), Rgb::new(0.5, 0.5, 0.5));

        let palette = feature_palette(&settings);
        assert_eq!(palette.color_for("Perimeter"), Rgb::new(0.0, 0.0, 1.0));
        assert_eq!(palette.color_for("Wipe tower"), Rgb::new(0.5, 0.5, 0.5));
        assert_eq!(palette.color_for("Solid infill"), Rgb::new(0.862, 0.058, 1.0));
        assert_eq!(palette.color_for("Ironing"), Rgb::WHITE);
    }
}
