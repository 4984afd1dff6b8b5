//! Line geometry buffers
//!
//! [`GeometryAccumulator`] collects one vertex per accepted motion line plus
//! the index pairs of the extrusion run in progress. Pairs only reach the
//! finished index buffer when a run is flushed.

use bytemuck::cast_slice;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use slicekit_core::data::Rgb;
use tracing::debug;

/// Finished vertex, color and line-index buffers
///
/// `positions` and `colors` hold flat `f32` triples of equal length; each
/// consecutive pair in `indices` is one line primitive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryBuffers {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub indices: Vec<u32>,
}

impl GeometryBuffers {
    /// Number of recorded vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of line segments
    pub fn segment_count(&self) -> usize {
        self.indices.len() / 2
    }

    /// Check whether no vertex was recorded
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Get a vertex position
    pub fn vertex(&self, index: usize) -> Option<Vec3> {
        self.positions
            .get(triple_range(index)?)
            .map(Vec3::from_slice)
    }

    /// Get a vertex color
    pub fn color(&self, index: usize) -> Option<Rgb> {
        self.colors
            .get(triple_range(index)?)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
    }

    /// Iterate over index pairs
    pub fn segments(&self) -> impl Iterator<Item = [u32; 2]> + '_ {
        self.indices.chunks_exact(2).map(|pair| [pair[0], pair[1]])
    }

    /// Position buffer as raw bytes for a vertex buffer upload
    pub fn position_bytes(&self) -> &[u8] {
        cast_slice(&self.positions)
    }

    /// Color buffer as raw bytes for a vertex buffer upload
    pub fn color_bytes(&self) -> &[u8] {
        cast_slice(&self.colors)
    }

    /// Index buffer as raw bytes for an element buffer upload
    pub fn index_bytes(&self) -> &[u8] {
        cast_slice(&self.indices)
    }
}

/// Flat-buffer range of the `index`-th triple, `None` on overflow
fn triple_range(index: usize) -> Option<std::ops::Range<usize>> {
    let start = index.checked_mul(3)?;
    Some(start..start.checked_add(3)?)
}

/// Growing geometry for one pass
#[derive(Debug, Default, Clone)]
pub struct GeometryAccumulator {
    buffers: GeometryBuffers,
    pending_run: Vec<[u32; 2]>,
}

impl GeometryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one vertex and its color
    pub fn push_vertex(&mut self, position: Vec3, color: Rgb) {
        self.buffers.positions.extend_from_slice(&position.to_array());
        self.buffers.colors.extend_from_slice(&color.to_array());
    }

    /// Append a segment to the run in progress
    pub fn extend_run(&mut self, from: u32, to: u32) {
        debug_assert!(
            (from as usize) < self.vertex_count() && (to as usize) < self.vertex_count(),
            "segment ({from}, {to}) references a vertex that is not recorded yet"
        );
        self.pending_run.push([from, to]);
    }

    /// Move the run in progress into the finished index buffer
    ///
    /// Returns the number of segments moved.
    pub fn flush_run(&mut self) -> usize {
        let flushed = self.pending_run.len();
        self.buffers
            .indices
            .extend(self.pending_run.drain(..).flatten());
        flushed
    }

    /// Segments of the run in progress
    pub fn pending_run(&self) -> &[[u32; 2]] {
        &self.pending_run
    }

    pub fn vertex_count(&self) -> usize {
        self.buffers.vertex_count()
    }

    /// Finished buffers recorded so far
    pub fn buffers(&self) -> &GeometryBuffers {
        &self.buffers
    }

    /// Take the finished buffers. Segments of an unflushed run are discarded.
    pub fn into_buffers(self) -> GeometryBuffers {
        if !self.pending_run.is_empty() {
            debug!(
                "Discarding {} unflushed segments",
                self.pending_run.len()
            );
        }
        self.buffers
    }
}
