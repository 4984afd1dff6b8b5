//! Motion command tokenization
//!
//! Turns one raw line into a [`MotionCommand`] when it is a linear move that
//! names at least one position axis. Axis and extrusion words that fail to
//! parse are kept as `None` instead of aborting the line.

use serde::{Deserialize, Serialize};
use slicekit_core::data::PartialPosition;
use std::fmt;

/// Linear motion word (rapid or feed move)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionKind {
    /// `G0` rapid positioning
    Rapid,
    /// `G1` linear interpolation
    Linear,
}

impl MotionKind {
    /// Match the leading word of a line. Only the exact words `G0` and `G1`
    /// are motion commands; zero-padded forms are not recognised.
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "G0" => Some(Self::Rapid),
            "G1" => Some(Self::Linear),
            _ => None,
        }
    }
}

impl fmt::Display for MotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rapid => write!(f, "G0"),
            Self::Linear => write!(f, "G1"),
        }
    }
}

/// A parsed `G0`/`G1` line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionCommand {
    /// Which motion word started the line
    pub kind: MotionKind,
    /// Axis words, floored to hundredths; `None` when absent or unreadable
    pub target: PartialPosition,
    /// Last readable `E` value on the line
    pub extrusion: Option<f32>,
    /// True if any `E` word on the line was strictly positive
    pub extruding: bool,
}

impl MotionCommand {
    /// Parse a raw line
    ///
    /// Returns `None` when the first word is not `G0`/`G1`, or when no word
    /// starts with `X`, `Y` or `Z` (pure extrusion or retraction moves). A
    /// word that starts with an axis letter qualifies the line even if its
    /// number cannot be read.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let kind = MotionKind::from_word(words.next()?)?;

        if !words.clone().any(is_axis_word) {
            return None;
        }

        let mut command = Self {
            kind,
            target: PartialPosition::new(),
            extrusion: None,
            extruding: false,
        };

        // Words are non-empty and the matched letters are ASCII, so `[1..]`
        // is always on a char boundary.
        for word in words {
            match word.as_bytes()[0] {
                b'X' => command.target.x = parse_axis(&word[1..]),
                b'Y' => command.target.y = parse_axis(&word[1..]),
                b'Z' => command.target.z = parse_axis(&word[1..]),
                b'E' => {
                    command.extrusion = word[1..].parse::<f32>().ok();
                    if command.extrusion.is_some_and(|e| e > 0.0) {
                        command.extruding = true;
                    }
                }
                _ => {}
            }
        }

        Some(command)
    }
}

/// Check whether a word addresses a position axis
fn is_axis_word(word: &str) -> bool {
    matches!(word.as_bytes().first(), Some(b'X' | b'Y' | b'Z'))
}

/// Parse an axis value and floor it to two decimal places
///
/// Values that do not fit a finite `f32` (`inf`, `NaN`, `1e39`) count as
/// unreadable.
pub fn parse_axis(text: &str) -> Option<f32> {
    text.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .map(floor_to_hundredths)
}

/// Floor a single-precision value to two decimal places
///
/// The multiply and floor run in double precision, so a value such as
/// `0.29f32` (stored as 0.28999999) floors to `0.28`.
pub fn floor_to_hundredths(value: f32) -> f32 {
    ((f64::from(value) * 100.0).floor() / 100.0) as f32
}
