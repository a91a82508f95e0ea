//! Camera controllers
//!
//! A controller turns the committed camera plus this frame's input into a
//! proposed camera. It never sees obstacles; the proposal is validated by the
//! movement resolver afterwards.

use std::f32::consts::PI;

use bastion_core::camera::{CameraState, ControlScheme, ViewMode};
use bastion_core::math::{UP, flatten};
use bastion_core::time::DeltaTime;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::bindings::ActionBindings;
use crate::input::{InputState, Modifiers};

/// Orbit direction used when the eye sits exactly on the target
const FALLBACK_ORBIT: Vec3 = Vec3::new(0.0, 0.5, 1.0);

/// Camera update collaborator
pub trait CameraController {
    /// Produce the proposed camera for this frame
    fn update(&mut self, camera: &CameraState, input: &InputState, dt: DeltaTime) -> CameraState;
}

/// Allowed third-person orbit distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitRange {
    pub min: f32,
    pub max: f32,
}

impl OrbitRange {
    pub fn clamp(&self, distance: f32) -> f32 {
        distance.clamp(self.min.min(self.max), self.max.max(self.min))
    }
}

/// Camera tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Radians of rotation per unit of pointer motion
    pub mouse_sensitivity: f32,
    /// Keyboard translation speed in units per second
    pub fly_speed: f32,
    /// Translation speed factor while Control is held
    pub sprint_multiplier: f32,
    /// Third-person orbit distance range
    pub orbit: OrbitRange,
    /// Orbit distance change per wheel notch
    pub zoom_step: f32,
    /// Maximum look pitch above or below the horizon
    pub pitch_limit_degrees: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.003,
            fly_speed: 5.0,
            sprint_multiplier: 2.0,
            orbit: OrbitRange { min: 2.0, max: 12.0 },
            zoom_step: 1.0,
            pitch_limit_degrees: 85.0,
        }
    }
}

impl CameraSettings {
    fn pitch_limit(&self) -> f32 {
        self.pitch_limit_degrees.abs().min(89.9).to_radians()
    }

    fn speed(&self, input: &InputState) -> f32 {
        if input.modifiers().contains(Modifiers::CONTROL) {
            self.fly_speed * self.sprint_multiplier
        } else {
            self.fly_speed
        }
    }
}

/// Stateless fly/orbit controller
///
/// - Free: mouse look, translation along the full 3D view direction plus ascend/descend
/// - FirstPerson: mouse look, translation along the horizontal view direction
/// - ThirdPerson: orbit around the target, wheel zoom, horizontal target translation
///
/// Under [`ControlScheme::DirectMovement`] the movement keys belong to the
/// player, so only Free mode translates the camera.
#[derive(Debug, Clone, Default)]
pub struct FlyCameraController {
    pub settings: CameraSettings,
    pub bindings: ActionBindings,
    pub scheme: ControlScheme,
}

impl FlyCameraController {
    pub fn new(settings: CameraSettings, bindings: ActionBindings, scheme: ControlScheme) -> Self {
        Self {
            settings,
            bindings,
            scheme,
        }
    }

    fn translates(&self, mode: ViewMode) -> bool {
        mode == ViewMode::Free || self.scheme == ControlScheme::CameraDriven
    }

    /// Rotate a direction by pointer motion, clamping the pitch
    fn turn(&self, direction: Vec3, yaw_delta: f32, pitch_delta: f32) -> Vec3 {
        let (yaw, pitch) = yaw_pitch(direction);
        let limit = self.settings.pitch_limit();
        from_yaw_pitch(yaw - yaw_delta, (pitch + pitch_delta).clamp(-limit, limit))
    }

    fn look(&self, camera: &CameraState, input: &InputState, dt: f32) -> CameraState {
        let mut next = *camera;
        let look = input.mouse_delta() * self.settings.mouse_sensitivity;

        let mut view = camera.target - camera.position;
        if look != Vec2::ZERO || view == Vec3::ZERO {
            view = self.turn(view, look.x, -look.y) * view.length().max(1.0);
        }
        let forward = view.normalize_or_zero();

        if self.translates(camera.mode) {
            let axes = self.bindings.movement_axes(input);
            let step = if camera.mode == ViewMode::Free {
                let right = forward.cross(UP).normalize_or_zero();
                forward * axes.y + right * axes.x + UP * self.bindings.vertical_axis(input)
            } else {
                planar_step(forward, axes)
            };
            next.position += step * self.settings.speed(input) * dt;
        }

        next.target = next.position + view;
        next
    }

    fn orbit(&self, camera: &CameraState, input: &InputState, dt: f32) -> CameraState {
        let mut next = *camera;
        let mut offset = camera.position - camera.target;
        if offset.length_squared() < 1e-6 {
            log::debug!("Orbit eye on target at {}, using fallback offset", camera.target);
            offset = FALLBACK_ORBIT;
        }

        let look = input.mouse_delta() * self.settings.mouse_sensitivity;
        let zoom = input.mouse_wheel().y * self.settings.zoom_step;
        let length = offset.length();
        let distance = self.settings.orbit.clamp(length - zoom);

        let orbit = if look == Vec2::ZERO {
            offset * (distance / length)
        } else {
            self.turn(offset, look.x, look.y) * distance
        };

        if self.translates(camera.mode) {
            let axes = self.bindings.movement_axes(input);
            next.target += planar_step(-offset, axes) * self.settings.speed(input) * dt;
        }

        next.position = next.target + orbit;
        next
    }
}

impl CameraController for FlyCameraController {
    fn update(&mut self, camera: &CameraState, input: &InputState, dt: DeltaTime) -> CameraState {
        let dt = dt.as_secs_f32();
        match camera.mode {
            ViewMode::Free | ViewMode::FirstPerson => self.look(camera, input, dt),
            ViewMode::ThirdPerson => self.orbit(camera, input, dt),
        }
    }
}

/// Horizontal movement relative to a view direction
fn planar_step(view: Vec3, axes: Vec2) -> Vec3 {
    let forward = flatten(view);
    let right = forward.cross(UP).normalize_or_zero();
    forward * axes.y + right * axes.x
}

fn yaw_pitch(direction: Vec3) -> (f32, f32) {
    let d = direction.normalize_or_zero();
    if d == Vec3::ZERO {
        return (PI, 0.0);
    }
    (d.x.atan2(d.z), d.y.clamp(-1.0, 1.0).asin())
}

fn from_yaw_pitch(yaw: f32, pitch: f32) -> Vec3 {
    Vec3::new(pitch.cos() * yaw.sin(), pitch.sin(), pitch.cos() * yaw.cos())
}
