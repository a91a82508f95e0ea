//! World construction
//!
//! Builds the obstacle registry once before the loop starts. Any failure here
//! aborts the run.

use bastion_assets::SceneDescription;
use bastion_physics::{ColorRange, ObstacleRegistry, RegistryBuilder, Shape, generate_into};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::RuntimeResult;
use crate::config::{SimulationConfig, WorldSource};

/// Build the registry described by `config`
pub fn build_registry(config: &SimulationConfig) -> RuntimeResult<ObstacleRegistry> {
    let world = &config.world;
    let mut rng = StdRng::seed_from_u64(world.seed);
    let mut builder = ObstacleRegistry::builder();
    let pastel = ColorRange::pastel();

    match &world.source {
        WorldSource::Procedural(generation) => {
            let mut generation = generation.clone();
            if generation.clearance.is_none() {
                let spawn = config.player.shape.at(config.player.spawn).aabb();
                generation.clearance = Some(spawn.inflate(world.spawn_margin));
            }
            generate_into(&generation, &mut rng, &mut builder)?;
        }
        WorldSource::Scene { path, transform } => {
            let scene = SceneDescription::load(config.resolve(path), transform)?;
            for object in scene.objects {
                builder.push_labeled(Shape::Aabb(object.bounds), pastel.sample(&mut rng), object.name);
            }
        }
    }

    append_models(config, &mut builder, &pastel, &mut rng)?;

    let registry = builder.build()?;
    log::info!(
        "World ready: {} obstacles within {:?}",
        registry.len(),
        registry.world_bounds()
    );
    Ok(registry)
}

fn append_models(
    config: &SimulationConfig,
    builder: &mut RegistryBuilder,
    colors: &ColorRange,
    rng: &mut StdRng,
) -> RuntimeResult<()> {
    for placement in &config.world.models {
        let bounds = placement.load_bounds(config.base_dir.as_deref())?;
        builder.push_labeled(Shape::Aabb(bounds), colors.sample(rng), placement.display_name());
    }
    Ok(())
}
