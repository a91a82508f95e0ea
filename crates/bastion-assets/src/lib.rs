//! # Bastion Assets
//!
//! Loading of externally authored world geometry.
//!
//! ## Features
//! - Scene descriptions: JSON maps of named min/max boxes authored in a
//!   Z-up, Y-forward tool, remapped to the engine's Y-up axes
//! - Mesh bounds: Wavefront OBJ vertex bounds, placed with a scale and offset
//!
//! Everything here runs once at startup and any failure is fatal for the run.

pub mod mesh;
pub mod scene;

use std::path::PathBuf;

use thiserror::Error;

pub use mesh::{ModelPlacement, load_obj_bounds, obj_bounds_from_str};
pub use scene::{SceneDescription, SceneObject, SceneTransform, to_engine_axes};

/// Asset errors
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Asset not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Scene parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Scene object '{key}' is malformed: {reason}")]
    MalformedObject { key: String, reason: String },

    #[error("Scene contains no objects")]
    EmptyScene,

    #[error("Mesh parse error on line {line}: {reason}")]
    MeshParse { line: usize, reason: String },

    #[error("Mesh has no vertices: {}", .0.display())]
    EmptyMesh(PathBuf),
}

impl AssetError {
    /// Map an I/O failure on `path`, turning a missing file into [`AssetError::NotFound`]
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Io { path, source }
        }
    }
}

/// Result type for asset operations
pub type AssetResult<T> = Result<T, AssetError>;
