//! Shared constants
//!
//! Comment markers emitted by PrusaSlicer-style slicers. The scanner and the
//! metadata scraper match these as plain substrings.

/// Prefix of the comment that selects the feature type of following moves
pub const FEATURE_MARKER: &str = ";TYPE:";

/// Line that opens the embedded thumbnail block
pub const THUMBNAIL_BEGIN_MARKER: &str = "thumbnail begin";

/// Line that closes the embedded thumbnail block
pub const THUMBNAIL_END_MARKER: &str = "thumbnail end";

/// Line after which no further moves are recorded
pub const GCODE_END_MARKER: &str = "Filament-specific end gcode";

/// Metadata keys, matched anywhere in a line
pub const ESTIMATED_TIME_KEY: &str = "estimated printing time (normal mode)";
pub const FILAMENT_GRAMS_KEY: &str = "filament used [g]";
pub const FILAMENT_MM_KEY: &str = "filament used [mm]";
pub const FILAMENT_CM3_KEY: &str = "filament used [cm3]";
pub const FILAMENT_COST_KEY: &str = "total filament cost";

/// Default output file for the preview record
pub const DEFAULT_OUTPUT_PATH: &str = "test.json";
