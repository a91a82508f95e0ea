//! Scene descriptions
//!
//! A scene description is a JSON object mapping arbitrary names to boxes:
//!
//! ```json
//! { "bed frame": { "min": [0.1, -2.0, 0.0], "max": [1.9, 0.0, 0.6] } }
//! ```
//!
//! Coordinates are in the authoring tool's frame, where Z is up and Y points
//! into the screen. They are remapped to engine axes on load.

use std::path::Path;

use bastion_core::math::Aabb;
use glam::Vec3;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{AssetError, AssetResult};

/// Convert an authoring-space point to engine axes
///
/// X stays X, the authoring Z (height) becomes Y, and the authoring Y (depth)
/// is negated and becomes Z.
pub fn to_engine_axes(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.z, -v.y)
}

/// Remap an authoring-space box to engine axes
///
/// Negating the depth axis swaps which corner is the minimum, so the result is
/// re-ordered per axis.
pub fn remap_box(min: Vec3, max: Vec3) -> Aabb {
    Aabb::from_corners(to_engine_axes(min), to_engine_axes(max))
}

/// Uniform scale and world offset applied after the axis remap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneTransform {
    pub scale: f32,
    pub offset: Vec3,
}

impl SceneTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset: Vec3::ZERO,
    };

    pub fn apply(&self, aabb: &Aabb) -> Aabb {
        aabb.scale_translate(self.scale, self.offset)
    }
}

impl Default for SceneTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A named box from a scene description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    /// Box as authored
    pub source: Aabb,
    /// Box in engine coordinates, transform applied
    pub bounds: Aabb,
}

/// Parsed scene description, objects in file order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub objects: Vec<SceneObject>,
}

impl SceneDescription {
    /// Load and parse a scene description file
    pub fn load(path: impl AsRef<Path>, transform: &SceneTransform) -> AssetResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| AssetError::io(path, e))?;
        let scene = Self::parse_str(&text, transform)?;
        log::info!("Loaded {} scene objects from {}", scene.len(), path.display());
        Ok(scene)
    }

    /// Parse a scene description
    ///
    /// Any malformed object fails the whole parse.
    pub fn parse_str(text: &str, transform: &SceneTransform) -> AssetResult<Self> {
        let root: IndexMap<String, Value> = serde_json::from_str(text)?;
        if root.is_empty() {
            return Err(AssetError::EmptyScene);
        }

        let mut objects = Vec::with_capacity(root.len());
        for (key, value) in root {
            if !value.is_object() {
                return Err(malformed(&key, "not an object"));
            }
            let min = read_corner(&key, &value, "min")?;
            let max = read_corner(&key, &value, "max")?;

            let source = Aabb::from_corners(min, max);
            let bounds = transform.apply(&remap_box(min, max));
            log::debug!("Scene object '{}': {:?} -> {:?}", key, source, bounds);

            objects.push(SceneObject {
                name: key,
                source,
                bounds,
            });
        }

        Ok(Self { objects })
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    /// Bounds enclosing every object in engine coordinates
    pub fn bounds(&self) -> Aabb {
        self.objects
            .iter()
            .fold(Aabb::EMPTY, |acc, object| acc.merge(&object.bounds))
    }
}

fn malformed(key: &str, reason: impl Into<String>) -> AssetError {
    AssetError::MalformedObject {
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn read_corner(key: &str, object: &Value, field: &str) -> AssetResult<Vec3> {
    let entries = object
        .get(field)
        .ok_or_else(|| malformed(key, format!("missing \"{field}\"")))?
        .as_array()
        .ok_or_else(|| malformed(key, format!("\"{field}\" is not an array")))?;

    if entries.len() < 3 {
        return Err(malformed(
            key,
            format!("\"{field}\" has {} entries, expected 3", entries.len()),
        ));
    }

    let mut coords = [0.0f32; 3];
    for (axis, entry) in entries.iter().take(3).enumerate() {
        coords[axis] = entry
            .as_f64()
            .ok_or_else(|| malformed(key, format!("\"{field}\"[{axis}] is not a number")))?
            as f32;
    }
    Ok(Vec3::from_array(coords))
}
