//! Simulation configuration
//!
//! Every field has a default, so an empty JSON object is a valid config and
//! a file only needs to name what it overrides.

use std::path::{Path, PathBuf};

use bastion_assets::{ModelPlacement, SceneTransform};
use bastion_core::camera::{CameraState, ControlScheme, ViewMode};
use bastion_physics::{ObstacleGenConfig, PlayerShape};
use bastion_platform::{ActionBindings, CameraSettings};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{RuntimeError, RuntimeResult};

/// Where the world geometry comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorldSource {
    /// Randomly scattered columns
    Procedural(ObstacleGenConfig),
    /// Boxes from a scene description file
    Scene {
        path: PathBuf,
        #[serde(default)]
        transform: SceneTransform,
    },
}

impl Default for WorldSource {
    fn default() -> Self {
        Self::Procedural(ObstacleGenConfig::default())
    }
}

/// World geometry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub source: WorldSource,
    /// Meshes appended after the primary source
    pub models: Vec<ModelPlacement>,
    /// Seed for generation and color sampling
    pub seed: u64,
    /// Margin around the spawn kept free when no clearance is configured
    pub spawn_margin: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            source: WorldSource::default(),
            models: Vec::new(),
            seed: 0,
            spawn_margin: 1.0,
        }
    }
}

/// Controlled entity configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub shape: PlayerShape,
    /// Initial shape center
    pub spawn: Vec3,
    pub scheme: ControlScheme,
    /// Direct movement speed in units per second
    pub move_speed: f32,
    pub initial_mode: ViewMode,
    /// Initial horizontal facing
    pub facing: Vec3,
    /// Initial third-person eye offset from the player
    pub orbit_offset: Vec3,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            shape: PlayerShape::default(),
            spawn: Vec3::new(0.0, 0.5, 4.0),
            scheme: ControlScheme::CameraDriven,
            move_speed: 5.0,
            initial_mode: ViewMode::FirstPerson,
            facing: Vec3::NEG_Z,
            orbit_offset: Vec3::new(0.0, 2.0, 5.0),
        }
    }
}

impl PlayerConfig {
    /// Camera for the initial mode, seated on the spawn
    pub fn initial_camera(&self) -> CameraState {
        let facing = bastion_core::math::flatten(self.facing);
        let mut camera = CameraState::new(self.spawn, self.spawn + facing, self.initial_mode);
        camera.anchor(self.spawn, self.orbit_offset);
        camera
    }
}

/// Complete configuration of a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub camera: CameraSettings,
    pub bindings: ActionBindings,
    /// Directory relative asset paths resolve against
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl SimulationConfig {
    /// Load a config file, resolving asset paths against its directory
    pub fn load(path: impl AsRef<Path>) -> RuntimeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RuntimeError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_json(&text)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> RuntimeResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> RuntimeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolve an asset path against [`base_dir`](Self::base_dir)
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SimulationConfig::from_json("{}").unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.player.move_speed, 5.0);
        assert!(matches!(config.world.source, WorldSource::Procedural(_)));
    }

    #[test]
    fn test_scene_config() {
        let json = r#"{
            "world": {
                "source": { "type": "scene", "path": "room.json", "transform": { "scale": 2.0 } },
                "models": [{ "path": "bed.obj", "scale": 1.5, "position": [5.0, 0.75, 5.0] }]
            },
            "player": {
                "shape": { "type": "box", "width": 0.5, "height": 1.8, "depth": 0.5 },
                "scheme": "direct_movement",
                "initial_mode": "third_person"
            }
        }"#;
        let config = SimulationConfig::from_json(json).unwrap();

        match &config.world.source {
            WorldSource::Scene { path, transform } => {
                assert_eq!(path, &PathBuf::from("room.json"));
                assert_eq!(transform.scale, 2.0);
            }
            other => panic!("Expected scene source, got {other:?}"),
        }
        assert_eq!(config.world.models.len(), 1);
        assert_eq!(config.player.scheme, ControlScheme::DirectMovement);
        assert_eq!(config.player.shape.height(), 1.8);
    }

    #[test]
    fn test_initial_camera() {
        let mut player = PlayerConfig::default();
        let camera = player.initial_camera();
        assert_eq!(camera.position, player.spawn);
        assert_eq!(camera.forward(), Vec3::NEG_Z);

        player.initial_mode = ViewMode::ThirdPerson;
        let camera = player.initial_camera();
        assert_eq!(camera.target, player.spawn);
        assert_eq!(camera.position, player.spawn + player.orbit_offset);

        // The eye sits behind the facing direction
        player.facing = Vec3::X;
        let camera = player.initial_camera();
        assert_eq!(camera.target, player.spawn);
        assert_eq!(camera.position, player.spawn + Vec3::new(-5.0, 2.0, 0.0));

        let mut anchored = camera;
        anchored.anchor(player.spawn, player.orbit_offset);
        assert_eq!(anchored, camera);
    }

    #[test]
    fn test_load_sets_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bastion.json");
        std::fs::write(&path, r#"{ "world": { "seed": 9 } }"#).unwrap();

        let config = SimulationConfig::load(&path).unwrap();
        assert_eq!(config.world.seed, 9);
        assert_eq!(config.resolve(Path::new("room.json")), dir.path().join("room.json"));
    }

    #[test]
    fn test_bad_config_errors() {
        assert!(matches!(
            SimulationConfig::from_json(r#"{ "player": { "scheme": "teleport" } }"#),
            Err(RuntimeError::ConfigParse(_))
        ));

        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            SimulationConfig::load(dir.path().join("missing.json")),
            Err(RuntimeError::ConfigIo { .. })
        ));
    }
}
