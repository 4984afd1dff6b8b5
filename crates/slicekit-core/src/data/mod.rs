//! Data models shared between the interpreter, settings, and export
//!
//! This module provides:
//! - `Rgb` feature colors with the built-in slicer palette
//! - `PartialPosition` for axis words that may or may not be present on a line

use serde::{Deserialize, Serialize};
use std::fmt;

/// RGB color with channels in `[0, 1]`
///
/// Serialized as a bare `[r, g, b]` array so palette overrides read
/// naturally in TOML and JSON config files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Rgb {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Rgb {
    /// Color used before the first feature marker and for unknown labels
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    /// Create a new color
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Get channels as an array
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Check that every channel lies in `[0, 1]`
    pub fn is_normalized(&self) -> bool {
        self.to_array()
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 3]> for Rgb {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [f32; 3] {
    fn from(color: Rgb) -> Self {
        color.to_array()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.r, self.g, self.b)
    }
}

/// Feature labels written by the slicer in `;TYPE:` comments and their colors
pub const BUILTIN_FEATURE_COLORS: [(&str, Rgb); 8] = [
    ("Perimeter", Rgb::new(1.0, 1.0, 0.0)),
    ("External perimeter", Rgb::new(0.96, 0.505, 0.019)),
    ("Internal infill", Rgb::new(0.509, 0.188, 0.016)),
    ("Solid infill", Rgb::new(0.862, 0.058, 1.0)),
    ("Top solid infill", Rgb::new(0.968, 0.176, 0.255)),
    ("Bridge infill", Rgb::new(0.094, 1.0, 0.921)),
    ("Skirt/Brim", Rgb::new(0.015, 0.721, 0.392)),
    ("Custom", Rgb::new(0.250, 0.960, 0.627)),
];

/// Partial position update (only axes present on the line are set)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialPosition {
    /// X-axis position (if Some, the line carried a readable X word)
    pub x: Option<f32>,
    /// Y-axis position (if Some, the line carried a readable Y word)
    pub y: Option<f32>,
    /// Z-axis position (if Some, the line carried a readable Z word)
    pub z: Option<f32>,
}

impl PartialPosition {
    /// Create a new empty partial position (all axes None)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a partial position with XY axes set
    pub fn xy(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    /// Create a partial position with XYZ axes set
    pub fn xyz(x: f32, y: f32, z: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
        }
    }

    /// Check whether no axis carried a value
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.z.is_none()
    }
}
