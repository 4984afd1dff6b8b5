//! Print metadata scraping
//!
//! Slicers summarise the print in `; key = value` comments. The scraper
//! picks up the fields the preview shows and collects the embedded
//! thumbnail text.

use serde::{Deserialize, Serialize};
use slicekit_core::constants::{
    ESTIMATED_TIME_KEY, FILAMENT_CM3_KEY, FILAMENT_COST_KEY, FILAMENT_GRAMS_KEY,
    FILAMENT_MM_KEY,
};

/// Human-readable print summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintMetadata {
    /// Base64 PNG text of the embedded thumbnail
    pub thumbnail_image: String,
    pub estimated_printing_time: String,
    pub filament_amount_g: String,
    pub filament_amount_mm: String,
    pub filament_amount_cm3: String,
    pub filament_cost: String,
}

/// Collects [`PrintMetadata`] fields from raw lines
#[derive(Debug, Clone, Default)]
pub struct MetadataScraper {
    metadata: PrintMetadata,
    thumbnail_lines: usize,
}

impl MetadataScraper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up any summary field on the line
    ///
    /// Every key is checked independently; later lines overwrite earlier ones.
    pub fn scrape_line(&mut self, line: &str) {
        let fields: [(&str, &mut String); 5] = [
            (ESTIMATED_TIME_KEY, &mut self.metadata.estimated_printing_time),
            (FILAMENT_GRAMS_KEY, &mut self.metadata.filament_amount_g),
            (FILAMENT_MM_KEY, &mut self.metadata.filament_amount_mm),
            (FILAMENT_CM3_KEY, &mut self.metadata.filament_amount_cm3),
            (FILAMENT_COST_KEY, &mut self.metadata.filament_cost),
        ];

        for (key, field) in fields {
            if line.contains(key) {
                *field = field_value(line).to_string();
            }
        }
    }

    /// Append one line of the thumbnail block
    ///
    /// The leading comment character is dropped and surrounding spaces are
    /// trimmed before the text is concatenated.
    pub fn append_thumbnail(&mut self, line: &str) {
        let mut chars = line.chars();
        chars.next();
        self.metadata
            .thumbnail_image
            .push_str(chars.as_str().trim_matches(' '));
        self.thumbnail_lines += 1;
    }

    /// Number of thumbnail lines collected
    pub fn thumbnail_lines(&self) -> usize {
        self.thumbnail_lines
    }

    pub fn metadata(&self) -> &PrintMetadata {
        &self.metadata
    }

    pub fn into_metadata(self) -> PrintMetadata {
        self.metadata
    }
}

/// Text after the first `=`, space-trimmed; the whole line when there is none
fn field_value(line: &str) -> &str {
    line.find('=')
        .map_or(line, |pos| &line[pos + 1..])
        .trim_matches(' ')
}
