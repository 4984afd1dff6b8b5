//! Print file processing
//!
//! Drives one preview pass over a slicer output file. The file is read once;
//! every line is offered to the metadata scraper, and the lines of the print
//! body (after the thumbnail block, before the filament end G-code) are fed
//! to the motion interpreter.

use serde::{Deserialize, Serialize};
use slicekit_core::constants::{GCODE_END_MARKER, THUMBNAIL_BEGIN_MARKER, THUMBNAIL_END_MARKER};
use slicekit_core::Result;
use std::path::Path;
use tracing::{debug, info};

use super::{GcodeFileReader, MetadataScraper, PrintData};
use crate::gcode::{FeaturePalette, MotionInterpreter};

/// Section markers and end-of-stream handling for a pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Substring that opens the thumbnail block
    pub thumbnail_begin: String,
    /// Substring that closes the thumbnail block and starts G-code recording
    pub thumbnail_end: String,
    /// Substring that stops G-code recording
    pub gcode_end: String,
    /// Record moves only after the thumbnail block; when false, from line one
    pub wait_for_thumbnail: bool,
    /// Flush an extrusion run still open at end of input
    pub flush_trailing_run: bool,
}

impl Default for ScanOptions {
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

/// Line counters for one pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Non-empty lines seen
    pub lines_seen: u64,
    /// Lines offered to the motion interpreter
    pub lines_recorded: u64,
    /// Lines that produced a vertex
    pub moves_accepted: u64,
}

/// One pass over a print file
#[derive(Debug, Clone)]
pub struct PrintFileProcessor {
    options: ScanOptions,
    interpreter: MotionInterpreter,
    scraper: MetadataScraper,
    recording_thumbnail: bool,
    recording_gcode: bool,
    stats: ScanStats,
}

impl PrintFileProcessor {
    /// Create a processor with the given options and palette
    pub fn new(options: ScanOptions, palette: FeaturePalette) -> Self {
        let recording_gcode = !options.wait_for_thumbnail;
        Self {
            options,
            interpreter: MotionInterpreter::with_palette(palette),
            scraper: MetadataScraper::new(),
            recording_thumbnail: false,
            recording_gcode,
            stats: ScanStats::default(),
        }
    }

    /// Handle one line of the file
    ///
    /// The thumbnail end line both closes the thumbnail and is itself the
    /// first recorded line; the G-code end line is still recorded.
    pub fn process_line(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }
        self.stats.lines_seen += 1;

        if self.recording_thumbnail {
            if line.contains(self.options.thumbnail_end.as_str()) {
                self.recording_thumbnail = false;
                self.recording_gcode = true;
                debug!(
                    "Thumbnail block closed after {} lines",
                    self.scraper.thumbnail_lines()
                );
            } else {
                self.scraper.append_thumbnail(line);
            }
        }

        if self.recording_gcode {
            self.stats.lines_recorded += 1;
            if self.interpreter.process_line(line).is_accepted() {
                self.stats.moves_accepted += 1;
            }
        }

        if line.contains(self.options.thumbnail_begin.as_str()) {
            self.recording_thumbnail = true;
        }

        if line.contains(self.options.gcode_end.as_str()) {
            self.recording_gcode = false;
        }

        self.scraper.scrape_line(line);
    }

    /// Handle every line of an in-memory file
    pub fn process_str(&mut self, text: &str) {
        for line in text.lines() {
            self.process_line(line);
        }
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    pub fn interpreter(&self) -> &MotionInterpreter {
        &self.interpreter
    }

    /// End the pass and build the preview record
    pub fn finish(self) -> PrintData {
        debug!(
            "Scan complete: {} lines, {} recorded, {} moves",
            self.stats.lines_seen, self.stats.lines_recorded, self.stats.moves_accepted
        );

        let geometry = if self.options.flush_trailing_run {
            self.interpreter.finish_flushing()
        } else {
            self.interpreter.finish()
        };
        PrintData::new(self.scraper.into_metadata(), geometry)
    }

    /// Run a whole pass over a file on disk
    ///
    /// # Errors
    /// Returns error if the file is missing or cannot be read
    pub fn process_file(
        path: impl AsRef<Path>,
        options: ScanOptions,
        palette: FeaturePalette,
    ) -> Result<PrintData> {
        let reader = GcodeFileReader::new(path)?;
        let mut processor = Self::new(options, palette);

        let read_stats = reader.read_lines(|line| {
            processor.process_line(line);
            Ok(())
        })?;

        info!(
            "Read {} lines ({} bytes) from {} in {}ms",
            read_stats.lines_read,
            read_stats.bytes_read,
            reader.path().display(),
            read_stats.read_time_ms
        );

        Ok(processor.finish())
    }
}

impl Default for PrintFileProcessor {
    fn default() -> Self {
        Self::new(ScanOptions::default(), FeaturePalette::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
; generated by PrusaSlicer 2.6.0

; thumbnail begin 16x16 120
; iVBORw0KGgo
; AAAANSUhEUg
; thumbnail end

G0 X99 Y99
;TYPE:Perimeter
G1 X10 Y10 E1
G1 X20 Y10 E1
G0 X30 Y30
; Filament-specific end gcode
G1 X50 Y50 E1
; filament used [g] = 3.68
";

    #[test]
    fn test_thumbnail_and_gating() {
        let mut processor = PrintFileProcessor::default();
        processor.process_str(SAMPLE);
        let stats = processor.stats();
        let data = processor.finish();

        assert_eq!(data.thumbnail_image, "iVBORw0KGgoAAAANSUhEUg");
        assert_eq!(data.filament_amount_g, "3.68");
        // Four moves between the thumbnail and the end marker
        assert_eq!(stats.moves_accepted, 4);
        assert_eq!(data.vertex_count(), 4);
        assert_eq!(data.index_arr, vec![0, 1, 1, 2]);
    }

    #[test]
    fn test_nothing_recorded_without_thumbnail() {
        let mut processor = PrintFileProcessor::default();
        processor.process_str("G1 X10 Y10 E1\nG1 X20 Y20 E0\n");
        let data = processor.finish();
        assert!(data.pos_arr.is_empty());
    }

    #[test]
    fn test_record_from_start() {
        let options = ScanOptions {
            wait_for_thumbnail: false,
            ..ScanOptions::default()
        };
        let mut processor = PrintFileProcessor::new(options, FeaturePalette::new());
        processor.process_str("G1 X10 Y10 E1\nG1 X20 Y20 E0\n");
        let data = processor.finish();
        assert_eq!(data.vertex_count(), 2);
        assert_eq!(data.index_arr, vec![0, 0]);
    }

    #[test]
    fn test_flush_trailing_run_option() {
        let text = "G1 X10 Y10 E1\nG1 X20 Y20 E1\n";

        let mut processor = PrintFileProcessor::new(
            ScanOptions {
                wait_for_thumbnail: false,
                ..ScanOptions::default()
            },
            FeaturePalette::new(),
        );
        processor.process_str(text);
        assert!(processor.finish().index_arr.is_empty());

        let mut processor = PrintFileProcessor::new(
            ScanOptions {
                wait_for_thumbnail: false,
                flush_trailing_run: true,
                ..ScanOptions::default()
            },
            FeaturePalette::new(),
        );
        processor.process_str(text);
        assert_eq!(processor.finish().index_arr, vec![0, 0, 0, 1]);
    }
}
