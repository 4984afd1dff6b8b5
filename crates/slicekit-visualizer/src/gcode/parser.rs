//! Motion interpreter and extrusion state tracking

use glam::Vec3;
use serde::{Deserialize, Serialize};
use slicekit_core::data::PartialPosition;
use std::fmt;
use tracing::{debug, trace, warn};

use super::{FeaturePalette, MotionCommand};
use crate::visualizer::{GeometryAccumulator, GeometryBuffers};

/// Extrusion and position state carried from one motion line to the next
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    /// Tracked nozzle position; axes not updated by a line keep their value
    pub last_position: Vec3,
    /// Whether the previous accepted line extruded
    pub is_extruding: bool,
    /// Index the next recorded vertex will receive
    pub current_index: u32,
    /// Index of the most recent vertex recorded while idle
    pub last_non_extrusion_index: u32,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            last_position: Vec3::ZERO,
            is_extruding: false,
            current_index: 0,
            last_non_extrusion_index: 0,
        }
    }
}

impl MotionState {
    /// Create a new motion state at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the axis words of a line
    ///
    /// An axis only moves when its parsed value is strictly positive. Zero
    /// and negative targets are ignored along with unreadable ones, so a move
    /// back to `X0` keeps the previous X.
    pub fn apply_target(&mut self, target: &PartialPosition) {
        if let Some(x) = target.x.filter(|v| *v > 0.0) {
            self.last_position.x = x;
        }
        if let Some(y) = target.y.filter(|v| *v > 0.0) {
            self.last_position.y = y;
        }
        if let Some(z) = target.z.filter(|v| *v > 0.0) {
            self.last_position.z = z;
        }
    }
}

/// What an input line did to the geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineOutcome {
    /// Not a qualifying motion line; nothing changed
    Skipped,
    /// Travel move outside a run; vertex becomes the next run's anchor
    Idle,
    /// First extruding move after travel
    RunStarted,
    /// Extruding move inside a run
    RunContinued,
    /// First travel move after a run; the run was flushed
    RunEnded,
}

impl LineOutcome {
    /// Whether the line consumed a vertex slot
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Self::Skipped)
    }
}

impl fmt::Display for LineOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped => write!(f, "skipped"),
            Self::Idle => write!(f, "idle"),
            Self::RunStarted => write!(f, "run started"),
            Self::RunContinued => write!(f, "run continued"),
            Self::RunEnded => write!(f, "run ended"),
        }
    }
}

/// Single-pass interpreter turning motion lines into line geometry
///
/// One interpreter handles one G-code stream; start a new one per file.
#[derive(Debug, Clone, Default)]
pub struct MotionInterpreter {
    state: MotionState,
    palette: FeaturePalette,
    geometry: GeometryAccumulator,
}

impl MotionInterpreter {
    /// Create an interpreter with the built-in palette
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an interpreter with a custom palette
    pub fn with_palette(palette: FeaturePalette) -> Self {
        Self {
            palette,
            ..Self::default()
        }
    }

    /// Feed one raw line
    pub fn process_line(&mut self, line: &str) -> LineOutcome {
        self.palette.observe_line(line);

        let Some(command) = MotionCommand::parse(line) else {
            return LineOutcome::Skipped;
        };

        self.state.apply_target(&command.target);

        let index = self.state.current_index;
        debug_assert_eq!(index as usize, self.geometry.vertex_count());
        self.geometry
            .push_vertex(self.state.last_position, self.palette.active_color());

        let outcome = match (command.extruding, self.state.is_extruding) {
            (true, true) => {
                self.geometry.extend_run(index.saturating_sub(1), index);
                LineOutcome::RunContinued
            }
            (false, true) => {
                self.geometry.flush_run();
                self.state.is_extruding = false;
                LineOutcome::RunEnded
            }
            (true, false) => {
                self.geometry
                    .extend_run(self.state.last_non_extrusion_index, index);
                self.state.is_extruding = true;
                LineOutcome::RunStarted
            }
            (false, false) => {
                self.state.last_non_extrusion_index = index;
                LineOutcome::Idle
            }
        };

        self.state.current_index += 1;
        trace!(
            index,
            kind = %command.kind,
            %outcome,
            position = ?self.state.last_position,
            "{}",
            line
        );
        outcome
    }

    /// Feed a sequence of lines
    pub fn process_lines<'a, I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for line in lines {
            self.process_line(line);
        }
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn palette(&self) -> &FeaturePalette {
        &self.palette
    }

    /// Geometry recorded so far
    pub fn geometry(&self) -> &GeometryAccumulator {
        &self.geometry
    }

    /// End the pass and return the finished buffers
    ///
    /// A run still open at end of input is not flushed; its segments are
    /// left out of the result.
    pub fn finish(self) -> GeometryBuffers {
        let dropped = self.geometry.pending_run().len();
        if dropped > 0 {
            warn!(
                "Input ended inside an extrusion run; dropping {} trailing segments",
                dropped
            );
        }
        self.log_summary();
        self.geometry.into_buffers()
    }

    /// End the pass, flushing a run still open at end of input
    pub fn finish_flushing(mut self) -> GeometryBuffers {
        let flushed = self.geometry.flush_run();
        if flushed > 0 {
            debug!("Flushed {} trailing segments at end of input", flushed);
        }
        self.state.is_extruding = false;
        self.log_summary();
        self.geometry.into_buffers()
    }

    fn log_summary(&self) {
        let buffers = self.geometry.buffers();
        debug!(
            "Motion pass complete: {} vertices, {} segments",
            buffers.vertex_count(),
            buffers.segment_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slicekit_core::data::Rgb;

    #[test]
    fn test_apply_target_ignores_non_positive() {
        let mut state = MotionState::new();
        state.apply_target(&PartialPosition::xyz(10.0, 20.0, 0.2));
        assert_eq!(state.last_position, Vec3::new(10.0, 20.0, 0.2));

        state.apply_target(&PartialPosition::xyz(0.0, -5.0, 0.4));
        assert_eq!(state.last_position, Vec3::new(10.0, 20.0, 0.4));

        state.apply_target(&PartialPosition::new());
        assert_eq!(state.last_position, Vec3::new(10.0, 20.0, 0.4));
    }

    #[test]
    fn test_skipped_line_changes_nothing() {
        let mut interp = MotionInterpreter::new();
        interp.process_line("G1 X5 Y5");
        let before = *interp.state();

        assert_eq!(interp.process_line("G1 E-0.8 F2100"), LineOutcome::Skipped);
        assert_eq!(interp.process_line("M107"), LineOutcome::Skipped);
        assert_eq!(interp.process_line(""), LineOutcome::Skipped);

        assert_eq!(*interp.state(), before);
        assert_eq!(interp.geometry().vertex_count(), 1);
    }

    #[test]
    fn test_outcome_sequence() {
        let mut interp = MotionInterpreter::new();
        let outcomes: Vec<_> = [
            "G0 X1 Y1",
            "G1 X2 Y1 E0.5",
            "G1 X3 Y1 E0.5",
            "G0 X4 Y4",
            "G0 X5 Y5",
        ]
        .into_iter()
        .map(|line| interp.process_line(line))
        .collect();

        assert_eq!(
            outcomes,
            vec![
                LineOutcome::Idle,
                LineOutcome::RunStarted,
                LineOutcome::RunContinued,
                LineOutcome::RunEnded,
                LineOutcome::Idle,
            ]
        );
        assert_eq!(interp.state().last_non_extrusion_index, 4);
        assert_eq!(interp.finish().indices, vec![0, 1, 1, 2]);
    }

    #[test]
    fn test_marker_line_changes_color_without_vertex() {
        let mut interp = MotionInterpreter::new();
        assert_eq!(
            interp.process_line(";TYPE:Perimeter"),
            LineOutcome::Skipped
        );
        assert_eq!(interp.geometry().vertex_count(), 0);
        assert_eq!(interp.palette().active_color(), Rgb::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_finish_flushing_keeps_trailing_run() {
        let mut interp = MotionInterpreter::new();
        interp.process_lines(["G1 X1 Y1 E1", "G1 X2 Y2 E1"]);
        assert_eq!(interp.finish_flushing().indices, vec![0, 0, 0, 1]);
    }
}
