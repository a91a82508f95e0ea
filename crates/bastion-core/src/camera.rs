//! Camera and player state
//!
//! The camera and the controlled entity are separate values. Each step the
//! synchronizer decides which camera field is authoritative for the player
//! position (or, under direct movement, which camera field follows the player)
//! and reconciles the two exactly once.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::math::{UP, flatten};

/// Active view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Viewpoint roams without dragging the player along
    Free,
    /// Eye co-located with the player, player invisible
    #[default]
    FirstPerson,
    /// Camera looks at the player from a distance
    ThirdPerson,
}

impl ViewMode {
    /// All modes in trigger order
    pub const ALL: [ViewMode; 3] = [ViewMode::Free, ViewMode::FirstPerson, ViewMode::ThirdPerson];

    /// Human readable label for overlays and logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Free => "FREE",
            Self::FirstPerson => "FIRST PERSON",
            Self::ThirdPerson => "THIRD PERSON",
        }
    }

    /// Whether the camera's up vector is forced to the world vertical
    pub fn pins_up(&self) -> bool {
        matches!(self, Self::FirstPerson | Self::ThirdPerson)
    }

    /// Whether the player shape should be drawn
    pub fn shows_player(&self) -> bool {
        !matches!(self, Self::FirstPerson)
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How the player position is driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlScheme {
    /// The camera moves and the player follows it
    #[default]
    CameraDriven,
    /// Directional input moves the player and the camera follows it
    DirectMovement,
}

/// Controlled entity state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerState {
    /// Center of the player's collision shape
    pub position: Vec3,
}

impl PlayerState {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }
}

/// Camera state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    /// Eye position
    pub position: Vec3,
    /// Look-at target
    pub target: Vec3,
    /// Up vector
    pub up: Vec3,
    /// Active view mode
    pub mode: ViewMode,
}

impl CameraState {
    /// Create a camera with a vertical up vector
    pub fn new(position: Vec3, target: Vec3, mode: ViewMode) -> Self {
        Self {
            position,
            target,
            up: UP,
            mode,
        }
    }

    /// Unit vector from the eye towards the target
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Switch to `mode`, returning whether anything changed
    ///
    /// Selecting the active mode is a no-op.
    pub fn select_mode(&mut self, mode: ViewMode) -> bool {
        if self.mode == mode {
            return false;
        }
        log::debug!("View mode {} -> {}", self.mode, mode);
        self.mode = mode;
        true
    }

    /// Horizontal view direction, `-Z` when looking straight up or down
    pub fn facing(&self) -> Vec3 {
        let facing = flatten(self.forward());
        if facing == Vec3::ZERO { Vec3::NEG_Z } else { facing }
    }

    /// Seat the camera on `player` for the active mode
    ///
    /// First person puts the eye on the player keeping the horizontal facing.
    /// Third person looks at the player from `orbit_offset`, where `y` is the
    /// height and `z` the distance behind. Free leaves the camera where it is.
    pub fn anchor(&mut self, player: Vec3, orbit_offset: Vec3) {
        let facing = self.facing();
        match self.mode {
            ViewMode::Free => {}
            ViewMode::FirstPerson => {
                self.position = player;
                self.target = player + facing;
            }
            ViewMode::ThirdPerson => {
                self.position = player - facing * orbit_offset.z + UP * orbit_offset.y;
                self.target = player;
            }
        }
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.5, 4.0), Vec3::new(0.0, 0.5, 0.0), ViewMode::FirstPerson)
    }
}

/// Player position implied by the camera under the camera-driven scheme
pub fn derive_player_position(camera: &CameraState, last: PlayerState) -> PlayerState {
    match camera.mode {
        ViewMode::Free => last,
        ViewMode::FirstPerson => PlayerState::new(camera.position),
        ViewMode::ThirdPerson => PlayerState::new(camera.target),
    }
}

/// Reconcile a freshly updated camera with the player
///
/// `player` is the position before reconciliation: the last committed one for
/// [`ControlScheme::CameraDriven`], or the one already moved by directional
/// input for [`ControlScheme::DirectMovement`].
pub fn synchronize(
    scheme: ControlScheme,
    mut camera: CameraState,
    player: PlayerState,
) -> (CameraState, PlayerState) {
    if camera.mode.pins_up() {
        camera.up = UP;
    }

    let player = match scheme {
        ControlScheme::CameraDriven => derive_player_position(&camera, player),
        ControlScheme::DirectMovement => player,
    };

    // Carry the camera along rigidly so the view direction is preserved
    match camera.mode {
        ViewMode::Free => {}
        ViewMode::FirstPerson => {
            camera.target += player.position - camera.position;
            camera.position = player.position;
        }
        ViewMode::ThirdPerson => {
            camera.position += player.position - camera.target;
            camera.target = player.position;
        }
    }

    (camera, player)
}
