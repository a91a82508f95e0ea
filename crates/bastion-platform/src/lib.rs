//! # Bastion Platform
//!
//! Input collaborators for the movement loop.
//!
//! - **Input**: keyboard and mouse events folded into per-frame state
//! - **Bindings**: keys mapped to mode triggers and movement directions
//! - **Camera**: controllers that turn input into an updated camera state

pub mod bindings;
pub mod camera;
pub mod input;

pub use bindings::ActionBindings;
pub use camera::{CameraController, CameraSettings, FlyCameraController, OrbitRange};
pub use input::{InputEvent, InputState, KeyCode, Modifiers};
