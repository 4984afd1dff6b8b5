//! Preview record export
//!
//! [`PrintData`] is the JSON document consumed by the web previewer. Key
//! names are fixed by that consumer.

use serde::{Deserialize, Serialize};
use slicekit_core::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use super::PrintMetadata;
use crate::visualizer::GeometryBuffers;

/// Print metadata plus renderable line geometry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PrintData {
    pub thumbnail_image: String,
    pub estimated_printing_time: String,
    pub filament_amount_g: String,
    #[serde(rename = "FilamentAmountMM")]
    pub filament_amount_mm: String,
    #[serde(rename = "FilamentAmountCM3")]
    pub filament_amount_cm3: String,
    pub filament_cost: String,
    /// Flat `x, y, z` vertex positions
    pub pos_arr: Vec<f32>,
    /// Line-segment index pairs into `pos_arr` / `color_arr`
    pub index_arr: Vec<u32>,
    /// Flat `r, g, b` vertex colors
    pub color_arr: Vec<f32>,
}

impl PrintData {
    /// Combine scraped metadata with finished geometry
    pub fn new(metadata: PrintMetadata, geometry: GeometryBuffers) -> Self {
        Self {
            thumbnail_image: metadata.thumbnail_image,
            estimated_printing_time: metadata.estimated_printing_time,
            filament_amount_g: metadata.filament_amount_g,
            filament_amount_mm: metadata.filament_amount_mm,
            filament_amount_cm3: metadata.filament_amount_cm3,
            filament_cost: metadata.filament_cost,
            pos_arr: geometry.positions,
            index_arr: geometry.indices,
            color_arr: geometry.colors,
        }
    }

    /// Number of vertices in the record
    pub fn vertex_count(&self) -> usize {
        self.pos_arr.len() / 3
    }

    /// Encode as JSON
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Write the JSON record to a file, replacing any existing file
    pub fn write_to_file(&self, path: impl AsRef<Path>, pretty: bool) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        if pretty {
            serde_json::to_writer_pretty(&mut writer, self)?;
        } else {
            serde_json::to_writer(&mut writer, self)?;
        }
        writer.flush()?;

        info!(
            "Wrote preview for {} vertices, {} segments to {}",
            self.vertex_count(),
            self.index_arr.len() / 2,
            path.display()
        );
        Ok(())
    }
}
