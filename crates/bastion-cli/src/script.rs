//! Input sources for headless runs
//!
//! A run is fed either by a scripted timeline loaded from JSON or by a seeded
//! random walk. Both yield the events for one frame at a time.

use std::path::Path;

use anyhow::{Context, Result};
use bastion_platform::{InputEvent, KeyCode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Per-frame event source
pub trait InputSource {
    /// Events delivered before frame `index` is stepped
    fn events(&mut self, index: u64) -> Vec<InputEvent>;
}

/// One entry of a scripted timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptFrame {
    /// Events delivered on the first of the repeated frames
    #[serde(default)]
    pub events: Vec<InputEvent>,
    /// Number of frames this entry lasts
    #[serde(default = "one")]
    pub repeat: u32,
}

fn one() -> u32 {
    1
}

/// Scripted input timeline
///
/// Held keys stay held across frames until a release event. Frames past the
/// end of the script receive no events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    pub frames: Vec<ScriptFrame>,
    #[serde(skip)]
    cursor: usize,
    #[serde(skip)]
    remaining: u32,
}

impl InputScript {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input script {}", path.display()))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let script: Self = serde_json::from_str(text).context("Invalid input script")?;
        Ok(script)
    }

    /// Total frames covered by the script
    pub fn len(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.repeat.max(1))).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl InputSource for InputScript {
    fn events(&mut self, _index: u64) -> Vec<InputEvent> {
        if self.remaining > 0 {
            self.remaining -= 1;
            return Vec::new();
        }
        match self.frames.get(self.cursor) {
            Some(frame) => {
                self.cursor += 1;
                self.remaining = frame.repeat.max(1) - 1;
                frame.events.clone()
            }
            None => Vec::new(),
        }
    }
}

const WALK_KEYS: [KeyCode; 4] = [KeyCode::W, KeyCode::A, KeyCode::S, KeyCode::D];
const MODE_KEYS: [KeyCode; 3] = [KeyCode::Key1, KeyCode::Key2, KeyCode::Key3];

/// Seeded random walk
///
/// Holds a random movement key for `hold_frames`, looks around a little, and
/// now and then taps a view mode key.
#[derive(Debug, Clone)]
pub struct RandomWalk {
    rng: StdRng,
    hold_frames: u64,
    held: Option<KeyCode>,
    mode_chance: f64,
}

impl RandomWalk {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            hold_frames: 30,
            held: None,
            mode_chance: 0.02,
        }
    }
}

impl InputSource for RandomWalk {
    fn events(&mut self, index: u64) -> Vec<InputEvent> {
        let mut events = Vec::new();

        // Mode keys are tapped, so release last frame's tap first
        for key in MODE_KEYS {
            events.push(InputEvent::KeyReleased { key });
        }

        if index % self.hold_frames.max(1) == 0 {
            if let Some(key) = self.held.take() {
                events.push(InputEvent::KeyReleased { key });
            }
            let key = WALK_KEYS[self.rng.gen_range(0..WALK_KEYS.len())];
            events.push(InputEvent::KeyPressed { key });
            self.held = Some(key);
        }

        if self.rng.gen_bool(self.mode_chance) {
            let key = MODE_KEYS[self.rng.gen_range(0..MODE_KEYS.len())];
            events.push(InputEvent::KeyPressed { key });
        }

        events.push(InputEvent::MouseMotion {
            delta_x: self.rng.gen_range(-4.0..=4.0),
            delta_y: self.rng.gen_range(-1.0..=1.0),
        });
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_repeat() {
        let json = r#"{ "frames": [
            { "events": [{ "event": "key_pressed", "key": "W" }], "repeat": 3 },
            { "events": [{ "event": "key_released", "key": "W" }] }
        ] }"#;
        let mut script = InputScript::from_json(json).unwrap();
        assert_eq!(script.len(), 4);

        assert_eq!(script.events(1), vec![InputEvent::KeyPressed { key: KeyCode::W }]);
        assert!(script.events(2).is_empty());
        assert!(script.events(3).is_empty());
        assert_eq!(script.events(4), vec![InputEvent::KeyReleased { key: KeyCode::W }]);
        assert!(script.events(5).is_empty());
    }

    #[test]
    fn test_bad_script() {
        assert!(InputScript::from_json(r#"{ "frames": [{ "events": [{ "event": "jump" }] }] }"#).is_err());
    }

    #[test]
    fn test_random_walk_is_deterministic() {
        let mut a = RandomWalk::new(5);
        let mut b = RandomWalk::new(5);
        for index in 0..100 {
            assert_eq!(a.events(index), b.events(index));
        }
    }

    #[test]
    fn test_random_walk_holds_one_key() {
        let mut walk = RandomWalk::new(1);
        let first = walk.events(0);
        let presses = first
            .iter()
            .filter(|e| matches!(e, InputEvent::KeyPressed { key } if WALK_KEYS.contains(key)))
            .count();
        assert_eq!(presses, 1);

        let next = walk.events(1);
        assert!(!next.iter().any(|e| matches!(e, InputEvent::KeyPressed { key } if WALK_KEYS.contains(key))));
    }
}
