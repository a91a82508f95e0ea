//! Input Handling
//!
//! Keyboard and mouse events are folded into an [`InputState`] once per frame.
//! Edge-triggered queries (`just_pressed`) only hold until [`InputState::end_frame`].

use std::collections::HashSet;

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Input event types
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InputEvent {
    /// Keyboard key pressed
    KeyPressed { key: KeyCode },
    /// Keyboard key released
    KeyReleased { key: KeyCode },
    /// Cursor moved to an absolute position
    MouseMoved { x: f32, y: f32 },
    /// Relative pointer motion, as reported with a captured cursor
    MouseMotion { delta_x: f32, delta_y: f32 },
    /// Mouse wheel scrolled
    MouseWheel { delta_x: f32, delta_y: f32 },
}

/// Keyboard key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    // Letters used by the default bindings
    A, D, E, Q, S, W,

    // Numbers
    Key1, Key2, Key3,

    // Special keys
    Space, Escape,

    // Arrow keys
    Left, Right, Up, Down,

    // Modifier keys
    LeftShift, RightShift,
    LeftControl, RightControl,
    LeftAlt, RightAlt,

    // Other
    Unknown,
}

bitflags! {
    /// Keyboard modifiers
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CONTROL = 0b0010;
        const ALT = 0b0100;
    }
}

/// Complete input state
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Currently held keys
    keys_pressed: HashSet<KeyCode>,
    /// Keys pressed this frame
    keys_just_pressed: HashSet<KeyCode>,
    /// Keys released this frame
    keys_just_released: HashSet<KeyCode>,
    /// Last absolute cursor position
    mouse_position: Vec2,
    /// Pointer motion accumulated this frame
    mouse_delta: Vec2,
    /// Wheel motion accumulated this frame
    mouse_wheel: Vec2,
    /// Current modifiers
    modifiers: Modifiers,
}

impl InputState {
    /// Create a new input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key is currently held
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key went down this frame
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    /// Check if a key went up this frame
    pub fn is_key_just_released(&self, key: KeyCode) -> bool {
        self.keys_just_released.contains(&key)
    }

    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Pointer motion since the last [`end_frame`](Self::end_frame)
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Wheel motion since the last [`end_frame`](Self::end_frame)
    pub fn mouse_wheel(&self) -> Vec2 {
        self.mouse_wheel
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Handle an input event
    pub fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyPressed { key } => {
                // Auto-repeat presses do not re-trigger
                if self.keys_pressed.insert(key) {
                    self.keys_just_pressed.insert(key);
                }
                self.update_modifiers(key, true);
            }
            InputEvent::KeyReleased { key } => {
                if self.keys_pressed.remove(&key) {
                    self.keys_just_released.insert(key);
                }
                self.update_modifiers(key, false);
            }
            InputEvent::MouseMoved { x, y } => {
                let new_pos = Vec2::new(x, y);
                self.mouse_delta += new_pos - self.mouse_position;
                self.mouse_position = new_pos;
            }
            InputEvent::MouseMotion { delta_x, delta_y } => {
                self.mouse_delta += Vec2::new(delta_x, delta_y);
            }
            InputEvent::MouseWheel { delta_x, delta_y } => {
                self.mouse_wheel += Vec2::new(delta_x, delta_y);
            }
        }
    }

    /// Handle a batch of events in order
    pub fn handle_events<'a>(&mut self, events: impl IntoIterator<Item = &'a InputEvent>) {
        for event in events {
            self.handle_event(event);
        }
    }

    fn update_modifiers(&mut self, key: KeyCode, pressed: bool) {
        let modifier = match key {
            KeyCode::LeftShift | KeyCode::RightShift => Modifiers::SHIFT,
            KeyCode::LeftControl | KeyCode::RightControl => Modifiers::CONTROL,
            KeyCode::LeftAlt | KeyCode::RightAlt => Modifiers::ALT,
            _ => return,
        };

        if pressed {
            self.modifiers |= modifier;
        } else {
            self.modifiers -= modifier;
        }
    }

    /// Clear per-frame state (call at the end of each frame)
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.keys_just_released.clear();
        self.mouse_delta = Vec2::ZERO;
        self.mouse_wheel = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_input() {
        let mut input = InputState::new();

        input.handle_event(&InputEvent::KeyPressed { key: KeyCode::Space });
        assert!(input.is_key_pressed(KeyCode::Space));
        assert!(input.is_key_just_pressed(KeyCode::Space));

        input.end_frame();
        assert!(input.is_key_pressed(KeyCode::Space));
        assert!(!input.is_key_just_pressed(KeyCode::Space));

        // Held key repeat is not a new edge
        input.handle_event(&InputEvent::KeyPressed { key: KeyCode::Space });
        assert!(!input.is_key_just_pressed(KeyCode::Space));

        input.handle_event(&InputEvent::KeyReleased { key: KeyCode::Space });
        assert!(!input.is_key_pressed(KeyCode::Space));
        assert!(input.is_key_just_released(KeyCode::Space));
    }

    #[test]
    fn test_mouse_input() {
        let mut input = InputState::new();

        input.handle_event(&InputEvent::MouseMoved { x: 100.0, y: 200.0 });
        assert_eq!(input.mouse_position(), Vec2::new(100.0, 200.0));
        input.end_frame();

        input.handle_event(&InputEvent::MouseMoved { x: 110.0, y: 210.0 });
        input.handle_event(&InputEvent::MouseMotion { delta_x: 5.0, delta_y: -2.0 });
        assert_eq!(input.mouse_delta(), Vec2::new(15.0, 8.0));

        input.handle_event(&InputEvent::MouseWheel { delta_x: 0.0, delta_y: 1.0 });
        input.handle_event(&InputEvent::MouseWheel { delta_x: 0.0, delta_y: 1.0 });
        assert_eq!(input.mouse_wheel(), Vec2::new(0.0, 2.0));

        input.end_frame();
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
        assert_eq!(input.mouse_wheel(), Vec2::ZERO);
    }

    #[test]
    fn test_modifiers() {
        let mut input = InputState::new();

        input.handle_event(&InputEvent::KeyPressed { key: KeyCode::LeftShift });
        assert!(input.modifiers().contains(Modifiers::SHIFT));

        input.handle_event(&InputEvent::KeyPressed { key: KeyCode::LeftControl });
        assert!(input.modifiers().contains(Modifiers::SHIFT | Modifiers::CONTROL));

        input.handle_event(&InputEvent::KeyReleased { key: KeyCode::LeftShift });
        assert_eq!(input.modifiers(), Modifiers::CONTROL);
    }

    #[test]
    fn test_event_json() {
        let event: InputEvent = serde_json::from_str(r#"{"event": "key_pressed", "key": "Key2"}"#).unwrap();
        assert_eq!(event, InputEvent::KeyPressed { key: KeyCode::Key2 });

        let event: InputEvent =
            serde_json::from_str(r#"{"event": "mouse_motion", "delta_x": 4.0, "delta_y": 0.0}"#).unwrap();
        assert_eq!(event, InputEvent::MouseMotion { delta_x: 4.0, delta_y: 0.0 });
    }
}
