//! # Bastion Runtime
//!
//! Ties the movement subsystem together.
//!
//! ## Features
//! - Configuration: one JSON document for world, player and camera
//! - World building: procedural columns, scene descriptions and placed meshes
//! - Simulation: the per-frame select, update, derive, resolve loop
//! - Frame sinks: the seam a renderer plugs into

pub mod config;
pub mod frame;
pub mod simulation;
pub mod world;

use std::path::PathBuf;

use bastion_assets::AssetError;
use bastion_physics::RegistryError;
use glam::Vec3;
use thiserror::Error;

pub use config::{PlayerConfig, SimulationConfig, WorldConfig, WorldSource};
pub use frame::{Frame, FrameRecord, FrameSink, NullSink, RecordingSink};
pub use simulation::Simulation;
pub use world::build_registry;

/// Runtime errors
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Failed to read config {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Spawn position {position} overlaps obstacle {obstacle}")]
    SpawnBlocked { position: Vec3, obstacle: String },
}

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;
