//! Action bindings
//!
//! Maps raw keys to the actions the movement loop understands: three
//! edge-triggered view mode selectors and four held movement directions.

use bastion_core::camera::ViewMode;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::input::{InputState, KeyCode};

/// Key assignment for every action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionBindings {
    pub free: KeyCode,
    pub first_person: KeyCode,
    pub third_person: KeyCode,
    pub forward: KeyCode,
    pub back: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    /// Free-flight ascend
    pub ascend: KeyCode,
    /// Free-flight descend
    pub descend: KeyCode,
}

impl Default for ActionBindings {
    fn default() -> Self {
        Self {
            free: KeyCode::Key1,
            first_person: KeyCode::Key2,
            third_person: KeyCode::Key3,
            forward: KeyCode::W,
            back: KeyCode::S,
            left: KeyCode::A,
            right: KeyCode::D,
            ascend: KeyCode::Space,
            descend: KeyCode::LeftShift,
        }
    }
}

impl ActionBindings {
    /// View mode requested this frame, if any
    ///
    /// When several triggers fire in the same frame the last one in
    /// Free, FirstPerson, ThirdPerson order wins.
    pub fn mode_request(&self, input: &InputState) -> Option<ViewMode> {
        [
            (self.free, ViewMode::Free),
            (self.first_person, ViewMode::FirstPerson),
            (self.third_person, ViewMode::ThirdPerson),
        ]
        .into_iter()
        .filter(|(key, _)| input.is_key_just_pressed(*key))
        .map(|(_, mode)| mode)
        .last()
    }

    /// Held movement keys as (strafe, forward) axes in [-1, 1]
    pub fn movement_axes(&self, input: &InputState) -> Vec2 {
        let axis = |positive: KeyCode, negative: KeyCode| {
            held(input, positive) - held(input, negative)
        };
        Vec2::new(axis(self.right, self.left), axis(self.forward, self.back))
    }

    /// Held movement keys as a horizontal world-space unit vector
    ///
    /// Forward is -Z and right is +X. Opposing keys cancel and diagonals are
    /// normalized, so the result is either zero or unit length.
    pub fn movement_direction(&self, input: &InputState) -> Vec3 {
        let axes = self.movement_axes(input);
        Vec3::new(axes.x, 0.0, -axes.y).normalize_or_zero()
    }

    /// Held ascend/descend keys as a vertical axis in [-1, 1]
    pub fn vertical_axis(&self, input: &InputState) -> f32 {
        held(input, self.ascend) - held(input, self.descend)
    }
}

fn held(input: &InputState, key: KeyCode) -> f32 {
    if input.is_key_pressed(key) { 1.0 } else { 0.0 }
}
