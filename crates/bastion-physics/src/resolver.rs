//! Movement resolution
//!
//! Two-phase protocol: a step proposes a [`Tentative`] player/camera state,
//! the resolver tests the player's shape at the proposed position against the
//! registry and either commits the proposal or restores the previous state.
//!
//! Rollback restores the player position, camera position and camera target
//! together. The view mode and up vector of the proposal are kept. A mode
//! switch is not part of the proposal: it is applied to the committed camera
//! with [`MovementResolver::reseat_camera`] before the step is proposed, so
//! the restored position and target always match the restored mode.

use bastion_core::camera::{CameraState, PlayerState};
use glam::Vec3;

use crate::registry::{ObstacleId, ObstacleRegistry};
use crate::shape::{PlayerShape, Shape};

/// State captured before a step, the rollback target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub player_position: Vec3,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
}

/// Proposed, not yet validated state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tentative {
    pub player: PlayerState,
    pub camera: CameraState,
}

/// Result of resolving one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The proposal became the committed state
    Committed,
    /// The proposal overlapped an obstacle and was discarded
    RolledBack { obstacle: ObstacleId },
}

impl StepOutcome {
    pub fn is_rollback(&self) -> bool {
        matches!(self, Self::RolledBack { .. })
    }
}

/// Commit/rollback counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    pub commits: u64,
    pub rollbacks: u64,
    /// Obstacle that caused the most recent rollback
    pub last_hit: Option<ObstacleId>,
}

impl ResolverStats {
    /// Total resolved steps
    pub fn steps(&self) -> u64 {
        self.commits + self.rollbacks
    }
}

/// Owner of the committed player and camera state
#[derive(Debug, Clone)]
pub struct MovementResolver {
    shape: PlayerShape,
    player: PlayerState,
    camera: CameraState,
    stats: ResolverStats,
}

impl MovementResolver {
    /// Create a resolver whose committed state is `player` and `camera`
    pub fn new(shape: PlayerShape, player: PlayerState, camera: CameraState) -> Self {
        Self {
            shape,
            player,
            camera,
            stats: ResolverStats::default(),
        }
    }

    /// Committed player state
    pub fn player(&self) -> PlayerState {
        self.player
    }

    /// Committed camera state
    pub fn camera(&self) -> CameraState {
        self.camera
    }

    /// Player dimensions
    pub fn player_shape(&self) -> PlayerShape {
        self.shape
    }

    /// Collision shape of the player at an arbitrary position
    pub fn query_shape(&self, position: Vec3) -> Shape {
        self.shape.at(position)
    }

    /// Collision shape of the committed player
    pub fn committed_shape(&self) -> Shape {
        self.shape.at(self.player.position)
    }

    pub fn stats(&self) -> &ResolverStats {
        &self.stats
    }

    /// Replace the committed camera without moving the player
    ///
    /// The player is not re-tested, since its position does not change.
    pub fn reseat_camera(&mut self, camera: CameraState) {
        self.camera = camera;
    }

    /// Capture the committed state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player_position: self.player.position,
            camera_position: self.camera.position,
            camera_target: self.camera.target,
        }
    }

    /// Validate `tentative` and commit it or roll back to the current state
    pub fn resolve(&mut self, tentative: Tentative, registry: &ObstacleRegistry) -> StepOutcome {
        let snapshot = self.snapshot();
        let query = self.query_shape(tentative.player.position);

        match registry.first_collision(&query) {
            Some(obstacle) => {
                let mut camera = tentative.camera;
                camera.position = snapshot.camera_position;
                camera.target = snapshot.camera_target;

                self.camera = camera;
                self.player.position = snapshot.player_position;
                self.stats.rollbacks += 1;
                self.stats.last_hit = Some(obstacle.id);

                log::debug!(
                    "Rolled back move to {:?}: hit {}",
                    tentative.player.position,
                    obstacle.display_name()
                );
                StepOutcome::RolledBack { obstacle: obstacle.id }
            }
            None => {
                self.player = tentative.player;
                self.camera = tentative.camera;
                self.stats.commits += 1;
                StepOutcome::Committed
            }
        }
    }
}
