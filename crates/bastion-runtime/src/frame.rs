//! Frame sinks
//!
//! The renderer side of the loop. A sink receives a read-only view of the
//! committed state after every step and may draw it, log it or record it.

use bastion_core::camera::{CameraState, ViewMode};
use bastion_physics::{Obstacle, ObstacleId, Shape, StepOutcome};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Committed state of one step
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Frame number, starting at 1
    pub index: u64,
    pub obstacles: &'a [Obstacle],
    /// Player collision shape at the committed position
    pub player: Shape,
    /// Whether the player should be drawn
    pub show_player: bool,
    pub camera: CameraState,
    pub outcome: StepOutcome,
}

/// Consumer of committed frames
pub trait FrameSink {
    fn present(&mut self, frame: &Frame<'_>);
}

/// Sink that discards every frame
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _frame: &Frame<'_>) {}
}

/// Compact, serializable summary of a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub index: u64,
    pub mode: ViewMode,
    pub player: Vec3,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub show_player: bool,
    /// Obstacle that blocked the step, if it was rolled back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_by: Option<ObstacleId>,
}

impl From<&Frame<'_>> for FrameRecord {
    fn from(frame: &Frame<'_>) -> Self {
        Self {
            index: frame.index,
            mode: frame.camera.mode,
            player: frame.player.center(),
            camera_position: frame.camera.position,
            camera_target: frame.camera.target,
            show_player: frame.show_player,
            blocked_by: match frame.outcome {
                StepOutcome::RolledBack { obstacle } => Some(obstacle),
                StepOutcome::Committed => None,
            },
        }
    }
}

/// Sink that keeps a [`FrameRecord`] per frame
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub records: Vec<FrameRecord>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded rollbacks
    pub fn rollbacks(&self) -> usize {
        self.records.iter().filter(|r| r.blocked_by.is_some()).count()
    }
}

impl FrameSink for RecordingSink {
    fn present(&mut self, frame: &Frame<'_>) {
        self.records.push(FrameRecord::from(frame));
    }
}
