//! Feature palette
//!
//! Maps the feature label from a `;TYPE:` comment to the color used for the
//! vertices that follow it.

use slicekit_core::constants::FEATURE_MARKER;
use slicekit_core::data::{Rgb, BUILTIN_FEATURE_COLORS};
use std::collections::HashMap;
use tracing::trace;

/// Extract the feature label from a marker line
///
/// The label is the text between the first and second `:` of the whole line,
/// taken verbatim (no trimming, case-sensitive).
pub fn feature_label(line: &str) -> Option<&str> {
    if !line.contains(FEATURE_MARKER) {
        return None;
    }
    line.split(':').nth(1)
}

/// Label-to-color table plus the currently active color
#[derive(Debug, Clone)]
pub struct FeaturePalette {
    colors: HashMap<String, Rgb>,
    active: Rgb,
    active_label: Option<String>,
}

impl FeaturePalette {
    /// Create a palette with the built-in slicer colors
    pub fn new() -> Self {
        let colors = BUILTIN_FEATURE_COLORS
            .iter()
            .map(|(label, color)| (label.to_string(), *color))
            .collect();
        Self {
            colors,
            active: Rgb::WHITE,
            active_label: None,
        }
    }

    /// Add or replace the color for a label
    pub fn with_color(mut self, label: impl Into<String>, color: Rgb) -> Self {
        self.set_color(label, color);
        self
    }

    /// Add or replace the color for a label
    pub fn set_color(&mut self, label: impl Into<String>, color: Rgb) {
        self.colors.insert(label.into(), color);
    }

    /// Merge several label colors over the current table
    pub fn extend<I, S>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (S, Rgb)>,
        S: Into<String>,
    {
        for (label, color) in overrides {
            self.set_color(label, color);
        }
    }

    /// Look up the color for a label, white when unknown
    pub fn color_for(&self, label: &str) -> Rgb {
        self.colors.get(label).copied().unwrap_or(Rgb::WHITE)
    }

    /// Select the active feature. Unknown labels select white.
    pub fn set_active_feature(&mut self, label: &str) {
        self.active = self.color_for(label);
        self.active_label = Some(label.to_string());
        trace!(label, color = %self.active, "Active feature changed");
    }

    /// Apply a marker line, if it is one. Returns true when the line was a marker.
    pub fn observe_line(&mut self, line: &str) -> bool {
        match feature_label(line) {
            Some(label) => {
                self.set_active_feature(label);
                true
            }
            None => false,
        }
    }

    /// Color for vertices recorded now
    pub fn active_color(&self) -> Rgb {
        self.active
    }

    /// Label of the last marker seen, if any
    pub fn active_label(&self) -> Option<&str> {
        self.active_label.as_deref()
    }

    /// Number of known labels
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for FeaturePalette {
    fn default() -> Self {
        Self::new()
    }
}
