//! Line geometry for toolpath previews
//!
//! This module provides:
//! - Vertex, color and index buffers sized for line-primitive rendering
//! - The accumulator that grows them during a motion pass

pub mod geometry;

pub use geometry::{GeometryAccumulator, GeometryBuffers};
