//! # Bastion Core
//!
//! Foundational types for the Bastion movement simulator.
//!
//! - **Math**: glam re-exports and the closed-interval [`Aabb`]
//! - **Time**: per-frame step bookkeeping
//! - **Camera**: camera/player state and the view-mode synchronizer

pub mod camera;
pub mod math;
pub mod time;

pub use camera::{CameraState, ControlScheme, PlayerState, ViewMode, synchronize};
pub use math::{Aabb, UP, Vec2, Vec3};
pub use time::{DeltaTime, FrameClock};
