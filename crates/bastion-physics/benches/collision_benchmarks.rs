//! Collision Benchmarks
//!
//! Predicate dispatch and registry scans

use bastion_physics::{ObstacleGenConfig, ObstacleGroup, Shape, ValueRange, generate, intersects};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bench_predicates(c: &mut Criterion) {
    let mut group = c.benchmark_group("predicates");

    let cylinder = Shape::cylinder(Vec3::new(1.3, 0.5, 1.3), 0.5, 1.0);
    let other_cylinder = Shape::cylinder(Vec3::new(2.0, 1.0, 0.5), 1.0, 2.0);
    let cuboid = Shape::box_from_center_extents(Vec3::ZERO, 2.0, 2.0, 2.0);
    let aabb = Shape::from_corners(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0));

    group.bench_function("box_box", |b| b.iter(|| intersects(black_box(&cuboid), black_box(&aabb))));
    group.bench_function("cylinder_cylinder", |b| {
        b.iter(|| intersects(black_box(&cylinder), black_box(&other_cylinder)))
    });
    group.bench_function("cylinder_box", |b| b.iter(|| intersects(black_box(&cylinder), black_box(&cuboid))));

    group.finish();
}

fn bench_registry_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_scan");

    for count in [24, 240, 2400].iter() {
        let config = ObstacleGenConfig {
            groups: vec![
                ObstacleGroup::Cylinders {
                    count: count / 2,
                    radius: ValueRange::new(0.5, 1.5),
                    height: ValueRange::new(2.0, 8.0),
                },
                ObstacleGroup::Boxes {
                    count: count / 2,
                    width: ValueRange::new(1.0, 3.0),
                    depth: ValueRange::new(1.0, 3.0),
                    height: ValueRange::new(2.0, 8.0),
                },
            ],
            x: ValueRange::new(-150.0, 150.0),
            z: ValueRange::new(-150.0, 150.0),
            ..Default::default()
        };
        let registry = generate(&config, &mut StdRng::seed_from_u64(1)).expect("generation failed");
        // Far away from everything, so every obstacle is visited
        let query = Shape::cylinder(Vec3::new(0.0, -50.0, 0.0), 0.5, 1.0);

        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| registry.any_collision(black_box(&query)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_predicates, bench_registry_scan);
criterion_main!(benches);
