//! # Bastion CLI
//!
//! Headless driver for the Bastion movement simulator.
//!
//! ## Commands
//! - `run` - Step the simulation with scripted or random input
//! - `inspect` - Print the boxes of a scene description
//! - `generate` - Dump a generated obstacle registry as JSON
//! - `probe` - Test the player shape at a point

pub mod script;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use bastion_assets::{SceneDescription, SceneTransform};
use bastion_core::camera::ViewMode;
use bastion_core::time::DeltaTime;
use bastion_physics::{ObstacleId, ResolverStats};
use bastion_platform::InputState;
use bastion_runtime::{FrameSink, NullSink, RecordingSink, Simulation, SimulationConfig, build_registry};
use clap::{Parser, Subcommand};
use glam::Vec3;
use serde::Serialize;

use crate::script::{InputScript, InputSource, RandomWalk};

/// Bastion movement simulator CLI
#[derive(Parser)]
#[command(name = "bastion")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Simulation config file (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the world seed
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Step the simulation headless
    Run {
        /// Number of frames
        #[arg(short = 'n', long, default_value = "600")]
        steps: u64,

        /// Frame rate the steps are timed at
        #[arg(long, default_value = "60")]
        hz: f64,

        /// Input timeline (JSON); a random walk is used when absent
        #[arg(long)]
        script: Option<PathBuf>,

        /// Seed for the random walk
        #[arg(long, default_value = "0")]
        walk_seed: u64,

        /// Write every frame record to this file (JSON)
        #[arg(long)]
        trace: Option<PathBuf>,
    },

    /// Print the boxes of a scene description in engine coordinates
    Inspect {
        /// Scene description file
        scene: PathBuf,

        /// Uniform scale applied after the axis remap
        #[arg(long, default_value = "1.0")]
        scale: f32,

        /// World offset applied after scaling, as x,y,z
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        offset: Option<Vec<f32>>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Dump the configured world's obstacles as JSON
    Generate {
        /// Output file, stdout when absent
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Test the player shape at a point against the configured world
    Probe {
        #[arg(allow_negative_numbers = true)]
        x: f32,
        #[arg(allow_negative_numbers = true)]
        y: f32,
        #[arg(allow_negative_numbers = true)]
        z: f32,

        /// Multiply the player shape dimensions
        #[arg(long, default_value = "1.0")]
        scale: f32,
    },
}

/// Outcome of a headless run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub commits: u64,
    pub rollbacks: u64,
    pub last_hit: Option<ObstacleId>,
    pub position: Vec3,
    pub mode: ViewMode,
}

impl RunSummary {
    fn new(frames: u64, stats: &ResolverStats, position: Vec3, mode: ViewMode) -> Self {
        Self {
            frames,
            commits: stats.commits,
            rollbacks: stats.rollbacks,
            last_hit: stats.last_hit,
            position,
            mode,
        }
    }
}

/// Step `simulation` for `steps` frames fed by `source`
pub fn run_steps(
    simulation: &mut Simulation,
    source: &mut dyn InputSource,
    steps: u64,
    dt: DeltaTime,
    sink: &mut dyn FrameSink,
) -> RunSummary {
    let mut input = InputState::new();
    for index in 0..steps {
        input.handle_events(&source.events(index));
        simulation.step(&input, dt, sink);
        input.end_frame();
    }

    RunSummary::new(
        simulation.clock().frame_count(),
        simulation.stats(),
        simulation.player().position,
        simulation.mode(),
    )
}

/// Execute the CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let mut config = match &cli.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.world.seed = seed;
    }

    match cli.command {
        Commands::Run { steps, hz, script, walk_seed, trace } => {
            ensure!(hz > 0.0, "Frame rate must be positive");
            let mut simulation = Simulation::new(&config)?;
            let mut source: Box<dyn InputSource> = match script {
                Some(path) => Box::new(InputScript::load(&path)?),
                None => Box::new(RandomWalk::new(walk_seed)),
            };

            log::info!("Running {} steps at {} Hz", steps, hz);
            let summary = match trace {
                Some(path) => {
                    let mut sink = RecordingSink::new();
                    let summary = run_steps(&mut simulation, source.as_mut(), steps, DeltaTime::from_hz(hz), &mut sink);
                    write_json(&path, &sink.records)?;
                    log::info!("Wrote {} frame records to {}", sink.records.len(), path.display());
                    summary
                }
                None => run_steps(&mut simulation, source.as_mut(), steps, DeltaTime::from_hz(hz), &mut NullSink),
            };

            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Commands::Inspect { scene, scale, offset, json } => {
            let offset = match offset {
                Some(values) => vec3(&values).context("--offset takes three values")?,
                None => Vec3::ZERO,
            };
            let transform = SceneTransform { scale, offset };
            let scene = SceneDescription::load(&scene, &transform)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&scene)?);
            } else {
                for object in scene.iter() {
                    println!(
                        "{:<24} min {:>8.3} {:>8.3} {:>8.3}  max {:>8.3} {:>8.3} {:>8.3}",
                        object.name,
                        object.bounds.min.x,
                        object.bounds.min.y,
                        object.bounds.min.z,
                        object.bounds.max.x,
                        object.bounds.max.y,
                        object.bounds.max.z,
                    );
                }
                let bounds = scene.bounds();
                println!("{} objects within {} .. {}", scene.len(), bounds.min, bounds.max);
            }
        }

        Commands::Generate { output } => {
            let registry = build_registry(&config)?;
            match output {
                Some(path) => {
                    write_json(&path, registry.obstacles())?;
                    log::info!("Wrote {} obstacles to {}", registry.len(), path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(registry.obstacles())?),
            }
        }

        Commands::Probe { x, y, z, scale } => {
            let position = Vec3::new(x, y, z);
            let registry = build_registry(&config)?;
            let shape = config.player.shape.scaled(scale).at(position);

            match registry.first_collision(&shape) {
                Some(obstacle) => println!("{} collides with {}", position, obstacle.display_name()),
                None => println!("{} is clear", position),
            }
        }
    }

    Ok(())
}

fn vec3(values: &[f32]) -> Result<Vec3> {
    ensure!(values.len() == 3, "expected 3 values, got {}", values.len());
    Ok(Vec3::new(values[0], values[1], values[2]))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}
