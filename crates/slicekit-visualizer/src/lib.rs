//! # SliceKit Visualizer
//!
//! G-code motion interpretation and line-geometry building for SliceKit.
//! Includes the motion interpreter, feature palette, geometry buffers,
//! file reader, metadata scraper, and preview export.

pub mod gcode;
pub mod utils;
pub mod visualizer;

pub use visualizer::{GeometryAccumulator, GeometryBuffers};

pub use gcode::{
    feature_label, floor_to_hundredths, FeaturePalette, LineOutcome, MotionCommand, MotionKind,
    MotionInterpreter, MotionState,
};

pub use utils::{
    FileReadStats, GcodeFileReader, MetadataScraper, PrintData, PrintFileProcessor,
    PrintMetadata, ScanOptions, ScanStats,
};
