//! Collision predicates
//!
//! Pure, symmetric overlap tests between pairs of shapes. Every interval is
//! closed, so shapes that merely touch are reported as colliding. Tests are
//! discrete: they look at the destination only, never at the path taken.

use bastion_core::math::{Aabb, horizontal_distance_squared, intervals_overlap};

use crate::shape::{Cuboid, Cylinder, Shape};

/// Box against box
pub fn box_box(a: &Aabb, b: &Aabb) -> bool {
    a.intersects(b)
}

/// Upright cylinder against upright cylinder
pub fn cylinder_cylinder(a: &Cylinder, b: &Cylinder) -> bool {
    let reach = a.radius + b.radius;
    if horizontal_distance_squared(a.center, b.center) > reach * reach {
        return false;
    }

    let (a_min, a_max) = a.vertical_span();
    let (b_min, b_max) = b.vertical_span();
    intervals_overlap(a_min, a_max, b_min, b_max)
}

/// Upright cylinder against axis-aligned box
///
/// Vertical overlap first, then the closest-point test between the box
/// footprint and the cylinder's circle in the XZ plane.
pub fn cylinder_box(cylinder: &Cylinder, cuboid: &Cuboid) -> bool {
    let (c_min, c_max) = cylinder.vertical_span();
    let b_min = cuboid.center.y - cuboid.half_extents.y;
    let b_max = cuboid.center.y + cuboid.half_extents.y;
    if !intervals_overlap(c_min, c_max, b_min, b_max) {
        return false;
    }

    let dx = (cylinder.center.x - cuboid.center.x).abs();
    let dz = (cylinder.center.z - cuboid.center.z).abs();
    let hx = cuboid.half_extents.x;
    let hz = cuboid.half_extents.z;
    let r = cylinder.radius;

    if dx > hx + r || dz > hz + r {
        return false;
    }
    // Center projects into one of the box's slabs
    if dx <= hx || dz <= hz {
        return true;
    }

    let corner_x = dx - hx;
    let corner_z = dz - hz;
    corner_x * corner_x + corner_z * corner_z <= r * r
}

/// Overlap test between any two shapes
///
/// Bounding boxes are compared first; each exact test only ever reports a hit
/// whose bounds also overlap, so the early reject never changes the answer.
pub fn intersects(a: &Shape, b: &Shape) -> bool {
    if !a.aabb().intersects(&b.aabb()) {
        return false;
    }
    narrow_phase(a, b)
}

/// Exact test dispatched on the pair of variants
pub fn narrow_phase(a: &Shape, b: &Shape) -> bool {
    match (a, b) {
        (Shape::Cylinder(x), Shape::Cylinder(y)) => cylinder_cylinder(x, y),
        (Shape::Cylinder(c), Shape::Box(cuboid)) | (Shape::Box(cuboid), Shape::Cylinder(c)) => {
            cylinder_box(c, cuboid)
        }
        (Shape::Cylinder(c), Shape::Aabb(aabb)) | (Shape::Aabb(aabb), Shape::Cylinder(c)) => {
            cylinder_box(c, &Cuboid::from_aabb(aabb))
        }
        _ => box_box(&a.aabb(), &b.aabb()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn assert_symmetric(a: &Shape, b: &Shape) -> bool {
        let forward = intersects(a, b);
        assert_eq!(forward, intersects(b, a), "asymmetric result for {a:?} / {b:?}");
        forward
    }

    #[test]
    fn test_boxes_overlap() {
        let a = Shape::box_from_center_extents(Vec3::ZERO, 2.0, 2.0, 2.0);
        let b = Shape::box_from_center_extents(Vec3::new(1.5, 0.0, 0.0), 2.0, 2.0, 2.0);
        let c = Shape::box_from_center_extents(Vec3::new(5.0, 0.0, 0.0), 2.0, 2.0, 2.0);
        assert!(assert_symmetric(&a, &b));
        assert!(!assert_symmetric(&a, &c));
    }

    #[test]
    fn test_boxes_sharing_a_face_collide() {
        let a = Shape::from_corners(Vec3::ZERO, Vec3::ONE);
        let b = Shape::from_corners(Vec3::new(1.0, 0.25, 0.25), Vec3::new(2.0, 0.75, 0.75));
        assert!(assert_symmetric(&a, &b));

        let apart = Shape::from_corners(Vec3::new(1.001, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(!assert_symmetric(&a, &apart));
    }

    #[test]
    fn test_cylinders_separated_horizontally() {
        let a = Shape::cylinder(Vec3::new(0.0, 1.0, 0.0), 1.0, 2.0);
        let b = Shape::cylinder(Vec3::new(2.5, 1.0, 0.0), 1.0, 2.0);
        assert!(!assert_symmetric(&a, &b));

        let close = Shape::cylinder(Vec3::new(1.5, 1.0, 0.0), 1.0, 2.0);
        assert!(assert_symmetric(&a, &close));
    }

    #[test]
    fn test_cylinders_touching() {
        let a = Shape::cylinder(Vec3::ZERO, 1.0, 2.0);
        let side = Shape::cylinder(Vec3::new(2.0, 0.0, 0.0), 1.0, 2.0);
        let stacked = Shape::cylinder(Vec3::new(0.0, 2.0, 0.0), 1.0, 2.0);
        assert!(assert_symmetric(&a, &side));
        assert!(assert_symmetric(&a, &stacked));
    }

    #[test]
    fn test_cylinders_separated_vertically() {
        let a = Shape::cylinder(Vec3::new(0.0, 0.5, 0.0), 1.0, 1.0);
        let b = Shape::cylinder(Vec3::new(0.5, 3.0, 0.0), 1.0, 1.0);
        assert!(!assert_symmetric(&a, &b));
    }

    #[test]
    fn test_cylinder_box_corner() {
        let cuboid = Shape::box_from_center_extents(Vec3::ZERO, 2.0, 2.0, 2.0);

        // 0.6 beyond the corner on both axes: 0.72 > 0.25
        let far = Shape::cylinder(Vec3::new(1.6, 0.0, 1.6), 0.5, 1.0);
        assert!(!assert_symmetric(&far, &cuboid));

        // 0.3 beyond the corner on both axes: 0.18 <= 0.25
        let near = Shape::cylinder(Vec3::new(1.3, 0.0, 1.3), 0.5, 1.0);
        assert!(assert_symmetric(&near, &cuboid));
    }

    #[test]
    fn test_cylinder_box_corner_without_broad_phase() {
        let cuboid = Cuboid::from_center_extents(Vec3::ZERO, 2.0, 2.0, 2.0);
        // Inside both slab reaches but outside the rounded corner
        let cylinder = Cylinder::new(Vec3::new(1.45, 0.0, 1.45), 0.5, 1.0);
        assert!(!cylinder_box(&cylinder, &cuboid));
        // Box AABB still overlaps the cylinder's bounds
        assert!(cylinder.aabb().intersects(&cuboid.aabb()));
    }

    #[test]
    fn test_cylinder_box_face() {
        let cuboid = Shape::box_from_center_extents(Vec3::new(0.0, 1.0, 0.0), 2.0, 2.0, 2.0);
        let beside = Shape::cylinder(Vec3::new(1.5, 0.5, 0.0), 0.5, 1.0);
        let away = Shape::cylinder(Vec3::new(1.6, 0.5, 0.0), 0.5, 1.0);
        assert!(assert_symmetric(&beside, &cuboid));
        assert!(!assert_symmetric(&away, &cuboid));
    }

    #[test]
    fn test_cylinder_box_vertical_reject() {
        let cuboid = Shape::box_from_center_extents(Vec3::new(0.0, 1.0, 0.0), 2.0, 2.0, 2.0);
        let above = Shape::cylinder(Vec3::new(0.0, 3.6, 0.0), 0.5, 1.0);
        let resting = Shape::cylinder(Vec3::new(0.0, 2.5, 0.0), 0.5, 1.0);
        assert!(!assert_symmetric(&above, &cuboid));
        assert!(assert_symmetric(&resting, &cuboid));
    }

    #[test]
    fn test_cylinder_against_loaded_aabb() {
        let aabb = Shape::from_corners(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0));
        let near = Shape::cylinder(Vec3::new(1.3, 0.5, 1.3), 0.5, 1.0);
        let far = Shape::cylinder(Vec3::new(1.6, 0.5, 1.6), 0.5, 1.0);
        assert!(assert_symmetric(&near, &aabb));
        assert!(!assert_symmetric(&far, &aabb));
    }

    #[test]
    fn test_box_against_loaded_aabb() {
        let raw = Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let placed = Shape::Aabb(raw.scale_translate(1.5, Vec3::new(5.0, 0.75, 5.0)));
        let player = Shape::box_from_center_extents(Vec3::new(3.4, 0.5, 5.0), 0.2, 1.0, 0.2);
        assert!(assert_symmetric(&player, &placed));

        let player = Shape::box_from_center_extents(Vec3::new(3.3, 0.5, 5.0), 0.2, 1.0, 0.2);
        assert!(!assert_symmetric(&player, &placed));
    }

    #[test]
    fn test_dispatch_matches_narrow_phase() {
        let shapes = [
            Shape::box_from_center_extents(Vec3::ZERO, 1.0, 1.0, 1.0),
            Shape::cylinder(Vec3::new(0.9, 0.0, 0.9), 0.5, 1.0),
            Shape::from_corners(Vec3::new(0.4, -2.0, 0.4), Vec3::new(3.0, 2.0, 3.0)),
            Shape::cylinder(Vec3::new(10.0, 0.0, 0.0), 0.5, 1.0),
        ];
        for a in &shapes {
            for b in &shapes {
                assert_eq!(intersects(a, b), narrow_phase(a, b));
                assert_symmetric(a, b);
            }
        }
    }
}
