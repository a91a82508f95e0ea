//! Mesh bounds
//!
//! Only vertex positions of a Wavefront OBJ file matter for collision, so the
//! loader reads `v` lines and folds them into an [`Aabb`]. Faces, normals and
//! texture coordinates are skipped.

use std::path::{Path, PathBuf};

use bastion_core::math::Aabb;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{AssetError, AssetResult};

/// Bounds of every vertex in OBJ source text
pub fn obj_bounds_from_str(source: &str) -> AssetResult<Option<Aabb>> {
    let mut bounds = Aabb::EMPTY;
    let mut vertices = 0usize;

    for (index, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        if parts.next() != Some("v") {
            continue;
        }

        let mut coords = [0.0f32; 3];
        for (axis, coord) in coords.iter_mut().enumerate() {
            let token = parts.next().ok_or_else(|| AssetError::MeshParse {
                line: index + 1,
                reason: format!("vertex has {axis} coordinates, expected 3"),
            })?;
            *coord = token.parse().map_err(|_| AssetError::MeshParse {
                line: index + 1,
                reason: format!("invalid vertex coordinate '{token}'"),
            })?;
        }

        bounds.expand_to_include(Vec3::from_array(coords));
        vertices += 1;
    }

    log::trace!("Read {} mesh vertices", vertices);
    Ok((vertices > 0).then_some(bounds))
}

/// Load the vertex bounds of an OBJ file
pub fn load_obj_bounds(path: impl AsRef<Path>) -> AssetResult<Aabb> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|e| AssetError::io(path, e))?;
    obj_bounds_from_str(&source)?.ok_or_else(|| AssetError::EmptyMesh(path.to_path_buf()))
}

/// A mesh instance in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPlacement {
    /// OBJ file, relative paths resolve against the config directory
    pub path: PathBuf,
    #[serde(default = "unit_scale")]
    pub scale: f32,
    #[serde(default)]
    pub position: Vec3,
    #[serde(default)]
    pub label: Option<String>,
}

fn unit_scale() -> f32 {
    1.0
}

impl ModelPlacement {
    pub fn new(path: impl Into<PathBuf>, scale: f32, position: Vec3) -> Self {
        Self {
            path: path.into(),
            scale,
            position,
            label: None,
        }
    }

    /// Place mesh-local bounds in the world
    pub fn place(&self, local: &Aabb) -> Aabb {
        local.scale_translate(self.scale, self.position)
    }

    /// Load the mesh and return its world bounds
    pub fn load_bounds(&self, base_dir: Option<&Path>) -> AssetResult<Aabb> {
        let path = match base_dir {
            Some(dir) if self.path.is_relative() => dir.join(&self.path),
            _ => self.path.clone(),
        };
        let local = load_obj_bounds(&path)?;
        let placed = self.place(&local);
        log::info!("Placed mesh {} at {:?}", path.display(), placed);
        Ok(placed)
    }

    /// Name used in logs and frame output
    pub fn display_name(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => self
                .path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.path.display().to_string()),
        }
    }
}
