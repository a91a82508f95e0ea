//! The movement loop
//!
//! One [`Simulation::step`] per frame:
//! 1. apply a requested view mode to the committed camera
//! 2. let the camera controller propose a camera
//! 3. apply direct movement input to the player, if that scheme is active
//! 4. synchronize camera and player
//! 5. resolve against the registry, committing or rolling back
//! 6. hand the committed frame to the sink

use bastion_core::camera::{CameraState, ControlScheme, PlayerState, ViewMode, synchronize};
use bastion_core::time::{DeltaTime, FrameClock};
use bastion_physics::{MovementResolver, Obstacle, ObstacleRegistry, ResolverStats, StepOutcome, Tentative};
use bastion_platform::{ActionBindings, CameraController, FlyCameraController, InputState};
use glam::Vec3;

use crate::config::SimulationConfig;
use crate::frame::{Frame, FrameSink};
use crate::world::build_registry;
use crate::{RuntimeError, RuntimeResult};

/// Single-entity movement simulation
pub struct Simulation {
    registry: ObstacleRegistry,
    resolver: MovementResolver,
    controller: Box<dyn CameraController>,
    bindings: ActionBindings,
    scheme: ControlScheme,
    move_speed: f32,
    orbit_offset: Vec3,
    clock: FrameClock,
}

impl Simulation {
    /// Build the world described by `config` and place the player
    pub fn new(config: &SimulationConfig) -> RuntimeResult<Self> {
        let registry = build_registry(config)?;
        Self::with_registry(config, registry)
    }

    /// Place the player in an already built world
    ///
    /// Fails when the spawn position overlaps an obstacle.
    pub fn with_registry(config: &SimulationConfig, registry: ObstacleRegistry) -> RuntimeResult<Self> {
        let player = &config.player;
        let (camera, state) = synchronize(
            player.scheme,
            player.initial_camera(),
            PlayerState::new(player.spawn),
        );

        let resolver = MovementResolver::new(player.shape, state, camera);
        if let Some(obstacle) = registry.first_collision(&resolver.committed_shape()) {
            return Err(RuntimeError::SpawnBlocked {
                position: state.position,
                obstacle: obstacle.display_name(),
            });
        }

        log::info!(
            "Player spawned at {} in {} mode ({:?})",
            state.position,
            camera.mode,
            player.scheme
        );

        Ok(Self {
            registry,
            resolver,
            controller: Box::new(FlyCameraController::new(config.camera, config.bindings, player.scheme)),
            bindings: config.bindings,
            scheme: player.scheme,
            move_speed: player.move_speed,
            orbit_offset: player.orbit_offset,
            clock: FrameClock::new(),
        })
    }

    /// Replace the camera controller
    pub fn with_controller(mut self, controller: Box<dyn CameraController>) -> Self {
        self.controller = controller;
        self
    }

    pub fn registry(&self) -> &ObstacleRegistry {
        &self.registry
    }

    /// Committed player state
    pub fn player(&self) -> PlayerState {
        self.resolver.player()
    }

    /// Committed camera state
    pub fn camera(&self) -> CameraState {
        self.resolver.camera()
    }

    pub fn mode(&self) -> ViewMode {
        self.resolver.camera().mode
    }

    pub fn stats(&self) -> &ResolverStats {
        self.resolver.stats()
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Obstacle the player shape would overlap at `position`
    pub fn probe(&self, position: Vec3) -> Option<&Obstacle> {
        self.registry.first_collision(&self.resolver.query_shape(position))
    }

    /// Advance one frame
    pub fn step(&mut self, input: &InputState, dt: DeltaTime, sink: &mut dyn FrameSink) -> StepOutcome {
        let dt = self.clock.tick(dt);
        let committed = self.resolver.player();

        // The switch never moves the player, so it commits before the step
        if let Some(mode) = self.bindings.mode_request(input) {
            let mut camera = self.resolver.camera();
            if camera.select_mode(mode) {
                camera.anchor(committed.position, self.orbit_offset);
                self.resolver.reseat_camera(camera);
                log::info!("View mode: {}", mode);
            }
        }

        let camera = self.controller.update(&self.resolver.camera(), input, dt);

        let mut player = committed;
        if self.scheme == ControlScheme::DirectMovement {
            let direction = self.bindings.movement_direction(input);
            player.position += direction * self.move_speed * dt.as_secs_f32();
        }

        let (camera, player) = synchronize(self.scheme, camera, player);
        let outcome = self.resolver.resolve(Tentative { player, camera }, &self.registry);

        sink.present(&self.frame(outcome));
        outcome
    }

    /// View of the committed state
    pub fn frame(&self, outcome: StepOutcome) -> Frame<'_> {
        let camera = self.resolver.camera();
        Frame {
            index: self.clock.frame_count(),
            obstacles: self.registry.obstacles(),
            player: self.resolver.committed_shape(),
            show_player: camera.mode.shows_player(),
            camera,
            outcome,
        }
    }
}
