//! Obstacle registry
//!
//! Owns the static world geometry. The registry is assembled once through
//! [`RegistryBuilder`] and never changes afterwards, so cached bounds stay
//! valid for the whole run.

use bastion_core::math::Aabb;
use serde::{Deserialize, Serialize};

use crate::collision;
use crate::shape::Shape;
use crate::{RegistryError, RegistryResult};

/// Index of an obstacle in registry order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(pub usize);

impl std::fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// RGBA color handed through to the renderer untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    pub const LIGHT_GRAY: Self = Self::rgba(200, 200, 200, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Static obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub shape: Shape,
    pub color: Color,
    /// Name from the scene description, if the obstacle came from one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Obstacle {
    /// Label if present, otherwise the id
    pub fn display_name(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => self.id.to_string(),
        }
    }
}

/// Collects obstacles before freezing them into a registry
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    obstacles: Vec<Obstacle>,
}

impl RegistryBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of obstacles collected so far
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Add an unnamed obstacle
    pub fn push(&mut self, shape: Shape, color: Color) -> ObstacleId {
        self.insert(shape, color, None)
    }

    /// Add an obstacle carrying its scene name
    pub fn push_labeled(&mut self, shape: Shape, color: Color, label: impl Into<String>) -> ObstacleId {
        self.insert(shape, color, Some(label.into()))
    }

    fn insert(&mut self, shape: Shape, color: Color, label: Option<String>) -> ObstacleId {
        let id = ObstacleId(self.obstacles.len());
        self.obstacles.push(Obstacle { id, shape, color, label });
        id
    }

    /// Freeze the collected obstacles
    ///
    /// Fails when no obstacle was added or when a shape violates its
    /// dimensional invariants.
    pub fn build(self) -> RegistryResult<ObstacleRegistry> {
        if self.obstacles.is_empty() {
            return Err(RegistryError::Empty);
        }

        for obstacle in &self.obstacles {
            if !obstacle.shape.is_valid() {
                return Err(RegistryError::InvalidShape {
                    name: obstacle.display_name(),
                });
            }
            if obstacle.shape.aabb().is_degenerate() {
                log::warn!("Obstacle {} has zero volume", obstacle.display_name());
            }
        }

        let bounds = self.obstacles.iter().map(|o| o.shape.aabb()).collect();
        let world_bounds = self
            .obstacles
            .iter()
            .fold(Aabb::EMPTY, |acc, o| acc.merge(&o.shape.aabb()));

        log::info!("Obstacle registry built with {} obstacles", self.obstacles.len());

        Ok(ObstacleRegistry {
            obstacles: self.obstacles,
            bounds,
            world_bounds,
        })
    }
}

/// Immutable set of static obstacles
#[derive(Debug, Clone)]
pub struct ObstacleRegistry {
    obstacles: Vec<Obstacle>,
    /// Per-obstacle bounds for broad-phase rejection, same order as `obstacles`
    bounds: Vec<Aabb>,
    world_bounds: Aabb,
}

impl ObstacleRegistry {
    /// Start building a registry
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Number of obstacles
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Obstacles in registry order
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// Look up an obstacle by id
    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id.0)
    }

    /// Bounds enclosing every obstacle
    pub fn world_bounds(&self) -> Aabb {
        self.world_bounds
    }

    /// Whether `query` overlaps any obstacle
    pub fn any_collision(&self, query: &Shape) -> bool {
        self.first_collision(query).is_some()
    }

    /// First obstacle in registry order that `query` overlaps
    pub fn first_collision(&self, query: &Shape) -> Option<&Obstacle> {
        let query_bounds = query.aabb();
        self.obstacles
            .iter()
            .zip(&self.bounds)
            .find(|(obstacle, bounds)| {
                query_bounds.intersects(bounds) && collision::narrow_phase(query, &obstacle.shape)
            })
            .map(|(obstacle, _)| obstacle)
    }

    /// Every obstacle that `query` overlaps
    pub fn collisions<'a>(&'a self, query: &'a Shape) -> impl Iterator<Item = &'a Obstacle> + 'a {
        let query_bounds = query.aabb();
        self.obstacles
            .iter()
            .zip(&self.bounds)
            .filter(move |(obstacle, bounds)| {
                query_bounds.intersects(bounds) && collision::narrow_phase(query, &obstacle.shape)
            })
            .map(|(obstacle, _)| obstacle)
    }
}
