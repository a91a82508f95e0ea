//! Procedural obstacle generation
//!
//! Scatters groups of upright columns (cylinders and boxes) over the ground
//! plane. Every generated obstacle rests on `y = 0`.

use bastion_core::math::Aabb;
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::registry::{Color, ObstacleRegistry, RegistryBuilder};
use crate::shape::Shape;
use crate::{RegistryError, RegistryResult};

/// Closed range of values sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Range containing a single value
    pub const fn fixed(value: f32) -> Self {
        Self { min: value, max: value }
    }

    fn validate(&self, name: &'static str, non_negative: bool) -> RegistryResult<()> {
        // The span must be finite too, or sampling overflows
        let ordered = self.min <= self.max && (self.max - self.min).is_finite();
        if !ordered || (non_negative && self.min < 0.0) {
            return Err(RegistryError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.min == self.max {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }
}

/// Closed range of color channel values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRange {
    pub min: u8,
    pub max: u8,
}

impl ChannelRange {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        let (low, high) = if self.min <= self.max { (self.min, self.max) } else { (self.max, self.min) };
        rng.gen_range(low..=high)
    }
}

/// Range each color channel is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRange {
    pub r: ChannelRange,
    pub g: ChannelRange,
    pub b: ChannelRange,
    pub a: ChannelRange,
}

impl ColorRange {
    /// Draw a color
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        Color::rgba(self.r.sample(rng), self.g.sample(rng), self.b.sample(rng), self.a.sample(rng))
    }

    /// Translucent pastel range used for loaded scene geometry
    pub fn pastel() -> Self {
        Self {
            r: ChannelRange::new(150, 255),
            g: ChannelRange::new(150, 255),
            b: ChannelRange::new(150, 255),
            a: ChannelRange::new(200, 200),
        }
    }
}

impl Default for ColorRange {
    fn default() -> Self {
        Self {
            r: ChannelRange::new(20, 255),
            g: ChannelRange::new(10, 55),
            b: ChannelRange::new(30, 30),
            a: ChannelRange::new(255, 255),
        }
    }
}

/// A batch of obstacles sharing a shape type and dimension ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObstacleGroup {
    Cylinders {
        count: usize,
        radius: ValueRange,
        height: ValueRange,
    },
    Boxes {
        count: usize,
        width: ValueRange,
        depth: ValueRange,
        height: ValueRange,
    },
}

impl ObstacleGroup {
    /// Number of obstacles in the group
    pub fn count(&self) -> usize {
        match self {
            Self::Cylinders { count, .. } | Self::Boxes { count, .. } => *count,
        }
    }

    fn validate(&self) -> RegistryResult<()> {
        match self {
            Self::Cylinders { radius, height, .. } => {
                radius.validate("radius", true)?;
                height.validate("height", true)
            }
            Self::Boxes { width, depth, height, .. } => {
                width.validate("width", true)?;
                depth.validate("depth", true)?;
                height.validate("height", true)
            }
        }
    }

    /// Draw one shape of this group standing on the ground at (x, z)
    fn sample_shape<R: Rng + ?Sized>(&self, rng: &mut R, x: f32, z: f32) -> Shape {
        match self {
            Self::Cylinders { radius, height, .. } => {
                let r = radius.sample(rng);
                let h = height.sample(rng);
                Shape::cylinder(Vec3::new(x, h * 0.5, z), r, h)
            }
            Self::Boxes { width, depth, height, .. } => {
                let w = width.sample(rng);
                let d = depth.sample(rng);
                let h = height.sample(rng);
                Shape::box_from_center_extents(Vec3::new(x, h * 0.5, z), w, h, d)
            }
        }
    }
}

/// Obstacle generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleGenConfig {
    /// Groups generated in order
    pub groups: Vec<ObstacleGroup>,
    /// Horizontal placement range on X
    pub x: ValueRange,
    /// Horizontal placement range on Z
    pub z: ValueRange,
    /// Round positions to whole units
    pub snap_to_grid: bool,
    /// Color channel ranges
    pub colors: ColorRange,
    /// Volume that must stay free of obstacles, usually around the spawn
    pub clearance: Option<Aabb>,
    /// Placement attempts per obstacle before giving up
    pub max_attempts: u32,
}

impl Default for ObstacleGenConfig {
    fn default() -> Self {
        Self {
            groups: vec![
                ObstacleGroup::Cylinders {
                    count: 12,
                    radius: ValueRange::new(0.5, 1.5),
                    height: ValueRange::new(2.0, 8.0),
                },
                ObstacleGroup::Boxes {
                    count: 12,
                    width: ValueRange::new(1.0, 3.0),
                    depth: ValueRange::new(1.0, 3.0),
                    height: ValueRange::new(2.0, 8.0),
                },
            ],
            x: ValueRange::new(-15.0, 15.0),
            z: ValueRange::new(-15.0, 15.0),
            snap_to_grid: true,
            colors: ColorRange::default(),
            clearance: None,
            max_attempts: 64,
        }
    }
}

impl ObstacleGenConfig {
    /// Total number of obstacles the config will produce
    pub fn total_count(&self) -> usize {
        self.groups.iter().map(ObstacleGroup::count).sum()
    }

    /// Check every range before sampling from it
    pub fn validate(&self) -> RegistryResult<()> {
        self.x.validate("x", false)?;
        self.z.validate("z", false)?;
        for group in &self.groups {
            group.validate()?;
        }
        if self.total_count() == 0 {
            return Err(RegistryError::Empty);
        }
        Ok(())
    }
}

/// Generate a registry from `config`
///
/// The same RNG state always yields the same registry.
pub fn generate<R: Rng + ?Sized>(config: &ObstacleGenConfig, rng: &mut R) -> RegistryResult<ObstacleRegistry> {
    let mut builder = ObstacleRegistry::builder();
    generate_into(config, rng, &mut builder)?;
    builder.build()
}

/// Append generated obstacles to `builder`, for worlds mixing several sources
pub fn generate_into<R: Rng + ?Sized>(
    config: &ObstacleGenConfig,
    rng: &mut R,
    builder: &mut RegistryBuilder,
) -> RegistryResult<()> {
    config.validate()?;

    let before = builder.len();
    for group in &config.groups {
        for _ in 0..group.count() {
            let shape = place(config, group, rng)?;
            let color = config.colors.sample(rng);
            builder.push(shape, color);
        }
    }

    log::debug!(
        "Generated {} obstacles in {} groups",
        builder.len() - before,
        config.groups.len()
    );
    Ok(())
}

fn place<R: Rng + ?Sized>(config: &ObstacleGenConfig, group: &ObstacleGroup, rng: &mut R) -> RegistryResult<Shape> {
    let attempts = config.max_attempts.max(1);
    for _ in 0..attempts {
        let mut x = config.x.sample(rng);
        let mut z = config.z.sample(rng);
        if config.snap_to_grid {
            x = x.round();
            z = z.round();
        }

        let shape = group.sample_shape(rng, x, z);
        match &config.clearance {
            Some(keep_out) if shape.aabb().intersects(keep_out) => continue,
            _ => return Ok(shape),
        }
    }
    Err(RegistryError::PlacementFailed { attempts })
}
