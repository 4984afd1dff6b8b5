//! Utilities around the motion core
//!
//! This module provides:
//! - Streaming G-code file reading
//! - Slicer summary and thumbnail scraping
//! - The single-pass file processor
//! - JSON export of the preview record

pub mod export;
pub mod file_io;
pub mod metadata;
pub mod processing;

pub use export::PrintData;
pub use file_io::{FileReadStats, GcodeFileReader};
pub use metadata::{MetadataScraper, PrintMetadata};
pub use processing::{PrintFileProcessor, ScanOptions, ScanStats};
