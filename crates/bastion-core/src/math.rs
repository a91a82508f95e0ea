//! Math utilities
//!
//! Re-exports from glam and the axis-aligned bounding box shared by every
//! collision volume in the simulator.

pub use glam::{Vec2, Vec3};

use serde::{Deserialize, Serialize};

/// Vertical axis of the engine coordinate system
pub const UP: Vec3 = Vec3::Y;

/// Axis-aligned bounding box
///
/// Bounds are closed: a point lying exactly on a face is inside, and two boxes
/// that share a face intersect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create an empty AABB
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Create an AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB from two arbitrary corners, ordering each axis so that
    /// `min <= max` holds componentwise
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create an AABB from center and half-extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Create an AABB from center and full size (width, height, depth)
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        Self::from_center_half_extents(center, size * 0.5)
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the half-extents of the AABB
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Get the full size of the AABB
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Check if the AABB is empty
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Check if every extent is zero, which is what an unloaded mesh reports
    pub fn is_degenerate(&self) -> bool {
        self.is_empty() || self.size().cmple(Vec3::ZERO).all()
    }

    /// Check if a point is inside the AABB
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if this AABB intersects another (touching faces count)
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Expand the AABB to include a point
    pub fn expand_to_include(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Merge with another AABB
    pub fn merge(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Grow the AABB by `margin` on every side
    pub fn inflate(&self, margin: f32) -> Aabb {
        Aabb {
            min: self.min - Vec3::splat(margin),
            max: self.max + Vec3::splat(margin),
        }
    }

    /// Apply a uniform scale about the origin followed by a translation
    ///
    /// `min * scale + offset` and `max * scale + offset`, re-ordered so a
    /// negative scale still yields a valid box.
    pub fn scale_translate(&self, scale: f32, offset: Vec3) -> Aabb {
        Aabb::from_corners(self.min * scale + offset, self.max * scale + offset)
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Closed-interval overlap on a single axis
pub fn intervals_overlap(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> bool {
    a_min <= b_max && b_min <= a_max
}

/// Squared distance between two points projected onto the horizontal (XZ) plane
pub fn horizontal_distance_squared(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    dx * dx + dz * dz
}

/// Project a vector onto the horizontal plane and normalize it
///
/// Returns zero when the vector has no horizontal component.
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_creation() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert_eq!(aabb.center(), Vec3::splat(0.5));
        assert_eq!(aabb.size(), Vec3::ONE);
    }

    #[test]
    fn test_aabb_from_center_size() {
        let aabb = Aabb::from_center_size(Vec3::new(1.0, 2.0, 3.0), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(aabb.min, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(aabb.half_extents(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_aabb_from_corners_normalizes() {
        let aabb = Aabb::from_corners(Vec3::new(2.0, -1.0, 0.0), Vec3::new(0.0, 1.0, -6.0));
        assert_eq!(aabb.min, Vec3::new(0.0, -1.0, -6.0));
        assert_eq!(aabb.max, Vec3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn test_aabb_contains_point() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(aabb.contains_point(Vec3::splat(0.5)));
        assert!(aabb.contains_point(Vec3::ONE));
        assert!(!aabb.contains_point(Vec3::splat(2.0)));
    }

    #[test]
    fn test_aabb_intersection() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::splat(0.5), Vec3::splat(1.5));
        let c = Aabb::new(Vec3::splat(2.0), Vec3::splat(3.0));

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_aabb_shared_face_intersects() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_scale_translate() {
        let raw = Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let placed = raw.scale_translate(1.5, Vec3::new(5.0, 0.75, 5.0));
        assert_eq!(placed.min, Vec3::new(3.5, 0.75, 3.5));
        assert_eq!(placed.max, Vec3::new(6.5, 2.25, 6.5));

        let mirrored = raw.scale_translate(-1.0, Vec3::ZERO);
        assert!(!mirrored.is_empty());
        assert_eq!(mirrored.min, Vec3::new(-1.0, -1.0, -1.0));
    }

    #[test]
    fn test_degenerate() {
        assert!(Aabb::EMPTY.is_degenerate());
        assert!(Aabb::new(Vec3::ONE, Vec3::ONE).is_degenerate());
        assert!(!Aabb::new(Vec3::ZERO, Vec3::ONE).is_degenerate());
    }

    #[test]
    fn test_horizontal_helpers() {
        let d = horizontal_distance_squared(Vec3::new(0.0, 10.0, 0.0), Vec3::new(3.0, -4.0, 4.0));
        assert!((d - 25.0).abs() < 0.0001);

        assert_eq!(flatten(Vec3::Y), Vec3::ZERO);
        let f = flatten(Vec3::new(3.0, 7.0, 4.0));
        assert!((f.length() - 1.0).abs() < 0.0001);
        assert_eq!(f.y, 0.0);
    }

    #[test]
    fn test_intervals_overlap_closed() {
        assert!(intervals_overlap(0.0, 1.0, 1.0, 2.0));
        assert!(!intervals_overlap(0.0, 1.0, 1.01, 2.0));
    }
}
