//! # Bastion Physics
//!
//! Collision-gated movement for a single player against static geometry.
//!
//! ## Features
//! - Shape model: boxes, upright cylinders and loaded AABBs
//! - Pairwise collision predicates with a bounding-box broad phase
//! - Immutable obstacle registry, built by hand or generated procedurally
//! - Movement resolver with atomic rollback

pub mod collision;
pub mod generator;
pub mod registry;
pub mod resolver;
pub mod shape;

pub use collision::intersects;
pub use generator::{ChannelRange, ColorRange, ObstacleGenConfig, ObstacleGroup, ValueRange, generate, generate_into};
pub use registry::{Color, Obstacle, ObstacleId, ObstacleRegistry, RegistryBuilder};
pub use resolver::{MovementResolver, ResolverStats, Snapshot, StepOutcome, Tentative};
pub use shape::{Cuboid, Cylinder, PlayerShape, Shape, ShapeKind};

use thiserror::Error;

/// Registry construction errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("World contains no obstacles")]
    Empty,

    #[error("Obstacle {name} has invalid dimensions")]
    InvalidShape { name: String },

    #[error("Invalid {name} range: [{min}, {max}]")]
    InvalidRange { name: &'static str, min: f32, max: f32 },

    #[error("Could not place obstacle outside the clearance volume after {attempts} attempts")]
    PlacementFailed { attempts: u32 },
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;
