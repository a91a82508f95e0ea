//! Shape model
//!
//! Every collision volume is one of three upright primitives. Cylinders always
//! stand on the vertical axis and store their vertical midpoint as the center.

use bastion_core::math::Aabb;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned box stored as center and half-extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cuboid {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Cuboid {
    /// Create a box from its center and half-extents
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self { center, half_extents }
    }

    /// Create a box from its center and full width, height and depth
    pub fn from_center_extents(center: Vec3, width: f32, height: f32, depth: f32) -> Self {
        Self {
            center,
            half_extents: Vec3::new(width, height, depth) * 0.5,
        }
    }

    /// Box covering exactly the given AABB
    pub fn from_aabb(aabb: &Aabb) -> Self {
        Self {
            center: aabb.center(),
            half_extents: aabb.half_extents(),
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_half_extents(self.center, self.half_extents)
    }
}

/// Upright cylinder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cylinder {
    /// Center of the axis; `center.y` is the vertical midpoint
    pub center: Vec3,
    pub radius: f32,
    pub height: f32,
}

impl Cylinder {
    pub fn new(center: Vec3, radius: f32, height: f32) -> Self {
        Self { center, radius, height }
    }

    /// Closed vertical interval covered by the cylinder
    pub fn vertical_span(&self) -> (f32, f32) {
        let half = self.height * 0.5;
        (self.center.y - half, self.center.y + half)
    }

    /// Tight AABB; only good enough for broad-phase rejection
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_half_extents(
            self.center,
            Vec3::new(self.radius, self.height * 0.5, self.radius),
        )
    }
}

/// Variant tag of a [`Shape`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Box,
    Cylinder,
    Aabb,
}

/// Collision volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// Axis-aligned box built from a center
    Box(Cuboid),
    /// Upright cylinder
    Cylinder(Cylinder),
    /// Box given by its corners; the native form of loaded and mesh-derived geometry
    Aabb(Aabb),
}

impl Shape {
    /// Box from a center and full width, height and depth
    pub fn box_from_center_extents(center: Vec3, width: f32, height: f32, depth: f32) -> Self {
        Self::Box(Cuboid::from_center_extents(center, width, height, depth))
    }

    /// Upright cylinder
    pub fn cylinder(center: Vec3, radius: f32, height: f32) -> Self {
        Self::Cylinder(Cylinder::new(center, radius, height))
    }

    /// Box from two corners in any order
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self::Aabb(Aabb::from_corners(a, b))
    }

    /// Variant tag
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Box(_) => ShapeKind::Box,
            Self::Cylinder(_) => ShapeKind::Cylinder,
            Self::Aabb(_) => ShapeKind::Aabb,
        }
    }

    /// Bounding box of the shape
    pub fn aabb(&self) -> Aabb {
        match self {
            Self::Box(cuboid) => cuboid.aabb(),
            Self::Cylinder(cylinder) => cylinder.aabb(),
            Self::Aabb(aabb) => *aabb,
        }
    }

    /// Geometric center
    pub fn center(&self) -> Vec3 {
        match self {
            Self::Box(cuboid) => cuboid.center,
            Self::Cylinder(cylinder) => cylinder.center,
            Self::Aabb(aabb) => aabb.center(),
        }
    }

    /// Same shape moved so its center sits at `center`
    pub fn with_center(&self, center: Vec3) -> Self {
        match *self {
            Self::Box(cuboid) => Self::Box(Cuboid::new(center, cuboid.half_extents)),
            Self::Cylinder(cylinder) => Self::cylinder(center, cylinder.radius, cylinder.height),
            Self::Aabb(aabb) => Self::Aabb(Aabb::from_center_half_extents(center, aabb.half_extents())),
        }
    }

    /// Check the shape's dimensional invariants
    ///
    /// Half-extents, radius and height must be finite and non-negative and an
    /// AABB must satisfy `min <= max` on every axis.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Box(cuboid) => {
                cuboid.center.is_finite()
                    && cuboid.half_extents.is_finite()
                    && cuboid.half_extents.cmpge(Vec3::ZERO).all()
            }
            Self::Cylinder(cylinder) => {
                cylinder.center.is_finite()
                    && cylinder.radius.is_finite()
                    && cylinder.height.is_finite()
                    && cylinder.radius >= 0.0
                    && cylinder.height >= 0.0
            }
            Self::Aabb(aabb) => {
                aabb.min.is_finite() && aabb.max.is_finite() && aabb.min.cmple(aabb.max).all()
            }
        }
    }
}

impl From<Aabb> for Shape {
    fn from(aabb: Aabb) -> Self {
        Self::Aabb(aabb)
    }
}

/// Fixed dimensions of the controlled entity
///
/// The player shape is rebuilt at the tentative position every step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerShape {
    Box { width: f32, height: f32, depth: f32 },
    Cylinder { radius: f32, height: f32 },
}

impl PlayerShape {
    /// Player shape centered at `position`
    pub fn at(&self, position: Vec3) -> Shape {
        match *self {
            Self::Box { width, height, depth } => {
                Shape::box_from_center_extents(position, width, height, depth)
            }
            Self::Cylinder { radius, height } => Shape::cylinder(position, radius, height),
        }
    }

    /// Same shape with every dimension multiplied by `factor`
    pub fn scaled(&self, factor: f32) -> Self {
        match *self {
            Self::Box { width, height, depth } => Self::Box {
                width: width * factor,
                height: height * factor,
                depth: depth * factor,
            },
            Self::Cylinder { radius, height } => Self::Cylinder {
                radius: radius * factor,
                height: height * factor,
            },
        }
    }

    /// Full height of the shape
    pub fn height(&self) -> f32 {
        match *self {
            Self::Box { height, .. } | Self::Cylinder { height, .. } => height,
        }
    }
}

impl Default for PlayerShape {
    fn default() -> Self {
        Self::Cylinder { radius: 0.5, height: 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_from_center_extents() {
        let shape = Shape::box_from_center_extents(Vec3::new(1.0, 1.0, 1.0), 2.0, 4.0, 6.0);
        let Shape::Box(cuboid) = shape else {
            panic!("Expected a box");
        };
        assert_eq!(cuboid.half_extents, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(shape.aabb().min, Vec3::new(0.0, -1.0, -2.0));
        assert_eq!(shape.aabb().max, Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_cylinder_aabb() {
        let shape = Shape::cylinder(Vec3::new(2.0, 4.0, -1.0), 0.5, 8.0);
        let aabb = shape.aabb();
        assert_eq!(aabb.min, Vec3::new(1.5, 0.0, -1.5));
        assert_eq!(aabb.max, Vec3::new(2.5, 8.0, -0.5));
    }

    #[test]
    fn test_cylinder_vertical_span() {
        let cylinder = Cylinder::new(Vec3::new(0.0, 0.5, 0.0), 0.5, 1.0);
        assert_eq!(cylinder.vertical_span(), (0.0, 1.0));
    }

    #[test]
    fn test_with_center() {
        let aabb = Shape::from_corners(Vec3::ZERO, Vec3::new(2.0, 2.0, 2.0));
        let moved = aabb.with_center(Vec3::new(10.0, 1.0, 0.0));
        assert_eq!(moved.aabb().min, Vec3::new(9.0, 0.0, -1.0));
        assert_eq!(moved.kind(), ShapeKind::Aabb);

        let cylinder = Shape::cylinder(Vec3::ZERO, 1.0, 2.0).with_center(Vec3::ONE);
        assert_eq!(cylinder.center(), Vec3::ONE);
    }

    #[test]
    fn test_validity() {
        assert!(Shape::cylinder(Vec3::ZERO, 0.0, 0.0).is_valid());
        assert!(!Shape::cylinder(Vec3::ZERO, -1.0, 2.0).is_valid());
        assert!(!Shape::Box(Cuboid::new(Vec3::ZERO, Vec3::new(1.0, -0.1, 1.0))).is_valid());
        assert!(!Shape::Aabb(Aabb::new(Vec3::ONE, Vec3::ZERO)).is_valid());
        assert!(!Shape::cylinder(Vec3::new(f32::NAN, 0.0, 0.0), 1.0, 1.0).is_valid());
    }

    #[test]
    fn test_player_shape() {
        let player = PlayerShape::Box { width: 0.5, height: 1.0, depth: 0.5 };
        let shape = player.at(Vec3::new(1.0, 0.5, 0.5));
        assert_eq!(shape.aabb().min, Vec3::new(0.75, 0.0, 0.25));

        let small = player.scaled(0.1);
        assert!((small.height() - 0.1).abs() < 0.0001);
        assert_eq!(PlayerShape::default().at(Vec3::ZERO).kind(), ShapeKind::Cylinder);
    }

    #[test]
    fn test_shape_serde() {
        let json = r#"{"type":"cylinder","center":[0.0,1.0,0.0],"radius":0.5,"height":2.0}"#;
        let shape: Shape = serde_json::from_str(json).unwrap();
        assert_eq!(shape, Shape::cylinder(Vec3::Y, 0.5, 2.0));

        let player: PlayerShape = serde_json::from_str(r#"{"type":"box","width":0.5,"height":1.0,"depth":0.5}"#).unwrap();
        assert_eq!(player, PlayerShape::Box { width: 0.5, height: 1.0, depth: 0.5 });
    }
}
