//! Procedural maze level generation
//!
//! Builds tile-based levels out of rectangular rooms joined by walled
//! hallways, suitable for roguelikes and other grid games.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rust_maze_level::*;
//!
//! // Generate a level
//! let config = LevelConfigBuilder::new()
//!     .seed(42)
//!     .world_size(WorldSize::Standard)
//!     .target_partition_count(12).unwrap()
//!     .build().unwrap();
//!
//! let level = Level::generate(config).unwrap();
//!
//! // Paint it and drop in the player, exit and items
//! let mut tiles = level.paint(&BasicPalette);
//! let objects = populate(&level, &mut tiles, &ObjectConfig::default()).unwrap();
//! println!("{tiles}");
//!
//! // What the player sees
//! let view = field_of_view(&tiles, &[objects.avatar.position], 5);
//! println!("{view}");
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) nearest-room lookups using KD-tree
//! - `serde`: Enables serialization support for configuration, rooms and tiles

// Modules
pub mod error;
pub mod config;
pub mod grid;
pub mod room;
pub mod generation;
pub mod level;
pub mod tiles;
pub mod objects;
pub mod visibility;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{LevelError, Result};
pub use config::{LevelConfig, LevelConfigBuilder, RoomSizeRange, WorldSize};
pub use grid::{Grid, Position};
pub use room::Room;
pub use level::Level;
pub use tiles::{BasicPalette, BasicTile, CustomPalette, LayoutTile, TileGrid, TilePalette};
pub use objects::{populate, Entity, EntityKind, Mobility, ObjectConfig, ObjectLayout, PortalPair};
pub use visibility::{field_of_view, visible_from};
pub use generation::{Hallway, Partition};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::IVec2 for convenience
pub use glam::IVec2;
