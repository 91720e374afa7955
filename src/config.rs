//! Level Configuration and Builder
//!
//! This module provides configuration types for deterministic level generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{LevelError, Result};

/// Smallest custom world accepted by the builder, per axis
pub const MIN_WORLD_EXTENT: u32 = 8;

/// Largest custom world accepted by the builder, per axis
pub const MAX_WORLD_EXTENT: u32 = 4096;

/// Hard cap on partition tree depth
pub const MAX_PARTITION_LAYERS: u32 = 16;

/// World size presets
///
/// `Standard` is the 75x30 reference world the partition defaults were tuned on.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorldSize {
    /// 50 x 30 tiles
    Small,
    /// 75 x 30 tiles (default)
    #[default]
    Standard,
    /// 100 x 50 tiles
    Large,
    /// Custom dimensions in tiles
    Custom {
        /// Number of columns
        width: u32,
        /// Number of rows
        height: u32,
    },
}

impl WorldSize {
    /// Width of the world in tiles
    pub fn width(self) -> u32 {
        match self {
            WorldSize::Small => 50,
            WorldSize::Standard => 75,
            WorldSize::Large => 100,
            WorldSize::Custom { width, .. } => width,
        }
    }

    /// Height of the world in tiles
    pub fn height(self) -> u32 {
        match self {
            WorldSize::Small => 30,
            WorldSize::Standard => 30,
            WorldSize::Large => 50,
            WorldSize::Custom { height, .. } => height,
        }
    }

    /// Get a human-readable name for this world size
    pub fn name(self) -> &'static str {
        match self {
            WorldSize::Small => "Small",
            WorldSize::Standard => "Standard",
            WorldSize::Large => "Large",
            WorldSize::Custom { .. } => "Custom",
        }
    }
}

/// Inclusive bounds on room dimensions, measured wall to wall
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomSizeRange {
    pub min_width: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub max_height: u32,
}

impl Default for RoomSizeRange {
    fn default() -> Self {
        Self {
            min_width: 5,
            max_width: 12,
            min_height: 5,
            max_height: 9,
        }
    }
}

/// Configuration for deterministic level generation
///
/// The same configuration always produces the identical level: same rooms in
/// the same order and the same hallways tile for tile.
///
/// # Example
///
/// ```rust
/// use rust_maze_level::*;
///
/// let config = LevelConfigBuilder::new()
///     .seed(42)
///     .world_size(WorldSize::Large)
///     .build()
///     .unwrap();
///
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: LevelConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelConfig {
    /// Random seed for anchor sampling and room sizing
    pub seed: u64,

    /// World dimensions
    pub world_size: WorldSize,

    /// Number of partitions to request from the partition tree
    ///
    /// This bounds the room count from above. Sampling stops early when the
    /// attempt budget runs out, and partitions too small for the minimum room
    /// size stay empty, so the default of 12 typically yields around 6 rooms.
    pub target_partition_count: usize,

    /// Maximum depth of the partition tree
    ///
    /// A tree of `n` layers yields at most `2^n` partitions.
    pub max_partition_layers: u32,

    /// Minimum distance between a partition anchor and its parent
    pub min_anchor_spacing: f64,

    /// Number of random anchor positions tried before giving up
    pub anchor_attempts: usize,

    /// Room dimension bounds
    pub room_size: RoomSizeRange,

    /// Periphery radius kept clear around every corridor tile
    ///
    /// - 1: the tile and its four neighbours (default)
    /// - 2-3: wider gaps between corridors and foreign rooms
    pub corridor_clearance: u32,
}

impl LevelConfig {
    /// Width of the world in tiles
    #[inline]
    pub fn width(&self) -> u32 {
        self.world_size.width()
    }

    /// Height of the world in tiles
    #[inline]
    pub fn height(&self) -> u32 {
        self.world_size.height()
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        let builder = LevelConfigBuilder::new();
        LevelConfig {
            seed: rand::random(),
            world_size: builder.world_size,
            target_partition_count: builder.target_partition_count,
            max_partition_layers: builder.max_partition_layers,
            min_anchor_spacing: builder.min_anchor_spacing,
            anchor_attempts: builder.anchor_attempts,
            room_size: builder.room_size,
            corridor_clearance: builder.corridor_clearance,
        }
    }
}

/// Builder for creating LevelConfig with validation
///
/// # Example
///
/// ```rust
/// use rust_maze_level::*;
///
/// // Use defaults
/// let config = LevelConfigBuilder::new().build().unwrap();
///
/// // Customize
/// let config = LevelConfigBuilder::new()
///     .seed(12345)
///     .world_size(WorldSize::Small)
///     .target_partition_count(8)
///     .unwrap()
///     .room_width(4, 9)
///     .unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(config.target_partition_count, 8);
/// ```
#[derive(Debug, Clone)]
pub struct LevelConfigBuilder {
    seed: Option<u64>,
    world_size: WorldSize,
    target_partition_count: usize,
    max_partition_layers: u32,
    min_anchor_spacing: f64,
    anchor_attempts: usize,
    room_size: RoomSizeRange,
    corridor_clearance: u32,
}

impl LevelConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random
    /// - world_size: Standard (75 x 30)
    /// - target_partition_count: 12
    /// - max_partition_layers: 5
    /// - min_anchor_spacing: sqrt(18)
    /// - anchor_attempts: 400
    /// - room_size: 5..=12 wide, 5..=9 tall
    /// - corridor_clearance: 1
    pub fn new() -> Self {
        Self {
            seed: None,
            world_size: WorldSize::default(),
            target_partition_count: 12,
            max_partition_layers: 5,
            min_anchor_spacing: 18f64.sqrt(),
            anchor_attempts: 400,
            room_size: RoomSizeRange::default(),
            corridor_clearance: 1,
        }
    }

    /// Set the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the world size preset
    pub fn world_size(mut self, size: WorldSize) -> Self {
        self.world_size = size;
        self
    }

    /// Set the number of partitions to request
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if count is 0
    pub fn target_partition_count(mut self, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(LevelError::InvalidConfig(
                "target partition count must be at least 1".to_string(),
            ));
        }
        self.target_partition_count = count;
        Ok(self)
    }

    /// Set the maximum partition tree depth
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if layers is 0 or above 16
    pub fn max_partition_layers(mut self, layers: u32) -> Result<Self> {
        if layers == 0 || layers > MAX_PARTITION_LAYERS {
            return Err(LevelError::InvalidConfig(format!(
                "partition layers must be in 1..={} (got {})",
                MAX_PARTITION_LAYERS, layers
            )));
        }
        self.max_partition_layers = layers;
        Ok(self)
    }

    /// Set the minimum distance between an anchor and its parent
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if spacing is negative or not finite
    pub fn min_anchor_spacing(mut self, spacing: f64) -> Result<Self> {
        if !spacing.is_finite() || spacing < 0.0 {
            return Err(LevelError::InvalidConfig(format!(
                "anchor spacing must be a finite non-negative number (got {})",
                spacing
            )));
        }
        self.min_anchor_spacing = spacing;
        Ok(self)
    }

    /// Set the number of anchor sampling attempts
    pub fn anchor_attempts(mut self, attempts: usize) -> Self {
        self.anchor_attempts = attempts;
        self
    }

    /// Set the room width bounds (inclusive, walls included)
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if min < 3 or min > max
    pub fn room_width(mut self, min: u32, max: u32) -> Result<Self> {
        validate_room_extent("width", min, max)?;
        self.room_size.min_width = min;
        self.room_size.max_width = max;
        Ok(self)
    }

    /// Set the room height bounds (inclusive, walls included)
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if min < 3 or min > max
    pub fn room_height(mut self, min: u32, max: u32) -> Result<Self> {
        validate_room_extent("height", min, max)?;
        self.room_size.min_height = min;
        self.room_size.max_height = max;
        Ok(self)
    }

    /// Set the corridor clearance radius
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if clearance > 3
    pub fn corridor_clearance(mut self, clearance: u32) -> Result<Self> {
        if clearance > 3 {
            return Err(LevelError::InvalidConfig(format!(
                "corridor clearance must be <= 3 (got {})",
                clearance
            )));
        }
        self.corridor_clearance = clearance;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the world is outside the supported extent or
    /// the room target exceeds what the layer cap can partition.
    pub fn build(self) -> Result<LevelConfig> {
        let (width, height) = (self.world_size.width(), self.world_size.height());
        let extent = MIN_WORLD_EXTENT..=MAX_WORLD_EXTENT;
        if !extent.contains(&width) || !extent.contains(&height) {
            return Err(LevelError::InvalidConfig(format!(
                "world must be between {min}x{min} and {max}x{max} tiles (got {width}x{height})",
                min = MIN_WORLD_EXTENT,
                max = MAX_WORLD_EXTENT,
            )));
        }

        let max_partitions = 1usize << self.max_partition_layers;
        if self.target_partition_count > max_partitions {
            return Err(LevelError::InvalidConfig(format!(
                "{} layers yield at most {} partitions (requested {})",
                self.max_partition_layers, max_partitions, self.target_partition_count
            )));
        }

        Ok(LevelConfig {
            seed: self.seed.unwrap_or_else(rand::random),
            world_size: self.world_size,
            target_partition_count: self.target_partition_count,
            max_partition_layers: self.max_partition_layers,
            min_anchor_spacing: self.min_anchor_spacing,
            anchor_attempts: self.anchor_attempts,
            room_size: self.room_size,
            corridor_clearance: self.corridor_clearance,
        })
    }
}

impl Default for LevelConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_room_extent(axis: &str, min: u32, max: u32) -> Result<()> {
    if min < 3 {
        return Err(LevelError::InvalidConfig(format!(
            "room {} must be at least 3 to fit walls around a floor (got {})",
            axis, min
        )));
    }
    if min > max {
        return Err(LevelError::InvalidConfig(format!(
            "room {} range is empty ({}..={})",
            axis, min, max
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_size_dimensions() {
        assert_eq!((WorldSize::Small.width(), WorldSize::Small.height()), (50, 30));
        assert_eq!(
            (WorldSize::Standard.width(), WorldSize::Standard.height()),
            (75, 30)
        );
        assert_eq!((WorldSize::Large.width(), WorldSize::Large.height()), (100, 50));
    }

    #[test]
    fn test_world_size_custom() {
        let custom = WorldSize::Custom { width: 40, height: 20 };
        assert_eq!(custom.width(), 40);
        assert_eq!(custom.height(), 20);
        assert_eq!(custom.name(), "Custom");
    }

    #[test]
    fn test_builder_defaults() {
        let config = LevelConfigBuilder::new().build().unwrap();
        assert_eq!(config.world_size, WorldSize::Standard);
        assert_eq!(config.target_partition_count, 12);
        assert_eq!(config.max_partition_layers, 5);
        assert_eq!(config.min_anchor_spacing, 18f64.sqrt());
        assert_eq!(config.corridor_clearance, 1);
        assert_eq!(config.room_size, RoomSizeRange::default());
    }

    #[test]
    fn test_builder_custom() {
        let config = LevelConfigBuilder::new()
            .seed(7)
            .world_size(WorldSize::Custom { width: 60, height: 40 })
            .target_partition_count(6)
            .unwrap()
            .max_partition_layers(4)
            .unwrap()
            .room_height(4, 6)
            .unwrap()
            .corridor_clearance(2)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.width(), 60);
        assert_eq!(config.height(), 40);
        assert_eq!(config.target_partition_count, 6);
        assert_eq!(config.max_partition_layers, 4);
        assert_eq!(config.room_size.min_height, 4);
        assert_eq!(config.room_size.max_height, 6);
        assert_eq!(config.corridor_clearance, 2);
    }

    #[test]
    fn test_builder_rejects_bad_values() {
        assert!(LevelConfigBuilder::new().target_partition_count(0).is_err());
        assert!(LevelConfigBuilder::new().max_partition_layers(0).is_err());
        assert!(LevelConfigBuilder::new().max_partition_layers(17).is_err());
        assert!(LevelConfigBuilder::new().min_anchor_spacing(-1.0).is_err());
        assert!(LevelConfigBuilder::new().min_anchor_spacing(f64::NAN).is_err());
        assert!(LevelConfigBuilder::new().room_width(2, 6).is_err());
        assert!(LevelConfigBuilder::new().room_height(7, 5).is_err());
        assert!(LevelConfigBuilder::new().corridor_clearance(4).is_err());
    }

    #[test]
    fn test_build_rejects_tiny_world() {
        let result = LevelConfigBuilder::new()
            .world_size(WorldSize::Custom { width: 6, height: 30 })
            .build();
        assert!(matches!(result, Err(LevelError::InvalidConfig(_))));
    }

    #[test]
    fn test_build_rejects_unreachable_room_target() {
        let result = LevelConfigBuilder::new()
            .max_partition_layers(2)
            .unwrap()
            .target_partition_count(5)
            .unwrap()
            .build();
        assert!(result.is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serialization() {
        let config = LevelConfigBuilder::new()
            .seed(12345)
            .world_size(WorldSize::Large)
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let restored: LevelConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, restored);
    }
}
