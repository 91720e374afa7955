//! Core layout generation
//!
//! One pass turns a [`LevelConfig`] into rooms and hallways:
//!
//! 1. Sample partition anchors into a depth-capped KD-tree
//! 2. Read the tree back as disjoint partitions of the world
//! 3. Place one random room per large enough partition
//! 4. Route corridors over the tile lattice until every room is connected

mod connectivity;
mod corridor;
mod dijkstra;
mod disjoint_set;
mod graph;
mod partition;
mod rooms;

pub use connectivity::connect_rooms;
pub use corridor::{truncate_path, wall_candidates, CorridorRouter, Hallway};
pub use dijkstra::{IndexMinPq, MaskedShortestPaths};
pub use disjoint_set::DisjointSet;
pub use graph::{Edge, TileGraph, UNIT_WEIGHT};
pub use partition::{sample_partition_tree, Axis, Partition, PartitionNode, PartitionTree};
pub use rooms::place_rooms;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

use crate::config::LevelConfig;
use crate::error::{LevelError, Result};
use crate::grid::Grid;
use crate::room::Room;

/// Rooms and hallways of one generation pass, before any painting
#[derive(Debug, Clone, PartialEq)]
pub struct RawLayout {
    pub grid: Grid,
    pub partitions: Vec<Partition>,
    pub rooms: Vec<Room>,
    pub hallways: Vec<Hallway>,
}

/// Generate a connected room layout from configuration
///
/// The same configuration always yields the same layout.
///
/// # Errors
///
/// - `NoRooms` if no partition could host a room
/// - `Disconnected` if the rooms cannot all be joined; retry with another seed
pub fn generate_layout(config: &LevelConfig) -> Result<RawLayout> {
    let start = Instant::now();
    let grid = Grid::new(config.width(), config.height());
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    // Step 1-2: Partition the world
    let tree = sample_partition_tree(&mut rng, &grid, config);
    let partitions = tree.partitions(Partition::world(&grid));

    // Step 3: Rooms, in partition order
    let rooms = place_rooms(&mut rng, &partitions, &config.room_size);
    if rooms.is_empty() {
        return Err(LevelError::NoRooms { seed: config.seed });
    }
    log::debug!(
        "placed {} rooms in {} partitions ({:.2?})",
        rooms.len(),
        partitions.len(),
        start.elapsed()
    );

    // Step 4: Corridors
    let graph = TileGraph::new(grid);
    let mut router = CorridorRouter::new(&graph, &rooms, config.corridor_clearance);
    let hallways = connect_rooms(&mut router)?;
    log::debug!(
        "connected {} rooms with {} hallways in {:.2?}",
        rooms.len(),
        hallways.len(),
        start.elapsed()
    );

    Ok(RawLayout {
        grid,
        partitions,
        rooms,
        hallways,
    })
}
