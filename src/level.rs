//! Level main structure

use crate::config::LevelConfig;
use crate::error::{LevelError, Result};
use crate::generation::{generate_layout, Hallway, Partition, RawLayout};
use crate::grid::{Grid, Position};
use crate::room::Room;
use crate::tiles::{LayoutTile, TileGrid, TilePalette};

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A generated maze level: rooms joined by hallways on a fixed grid
///
/// The level keeps layout data only. Painting it onto a [`TileGrid`] is a
/// separate step so callers choose their own tile vocabulary.
///
/// # Examples
///
/// ```
/// use rust_maze_level::*;
///
/// // Some seeds cannot be fully connected; try the next one
/// let level = (0..100)
///     .find_map(|seed| {
///         let config = LevelConfigBuilder::new().seed(seed).build().unwrap();
///         Level::generate(config).ok()
///     })
///     .unwrap();
///
/// println!("Generated {} rooms", level.room_count());
/// let tiles = level.paint(&BasicPalette);
/// assert_eq!(tiles.get(level.rooms()[0].center()), BasicTile::Floor);
/// ```
#[derive(Clone)]
pub struct Level {
    /// Configuration used to generate this level
    config: LevelConfig,

    grid: Grid,

    /// Partitions the rooms were placed in
    partitions: Vec<Partition>,

    /// Rooms, indexed by room ID
    rooms: Vec<Room>,

    /// Hallways in the order they were built
    hallways: Vec<Hallway>,

    /// Room centers for nearest-room lookups (requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl Level {
    /// Generate a level from configuration
    ///
    /// # Errors
    ///
    /// - `NoRooms` if no partition could host a room
    /// - `Disconnected` if the rooms cannot all be joined; the caller is
    ///   expected to retry with another seed
    pub fn generate(config: LevelConfig) -> Result<Self> {
        let RawLayout {
            grid,
            partitions,
            rooms,
            hallways,
        } = generate_layout(&config)?;

        #[cfg(feature = "spatial-index")]
        let spatial_index = {
            let centers: Vec<Position> = rooms.iter().map(Room::center).collect();
            SpatialIndex::new(&centers)
        };

        Ok(Self {
            config,
            grid,
            partitions,
            rooms,
            hallways,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    #[inline]
    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    #[inline]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    #[inline]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Get a room by ID
    ///
    /// Returns `None` if the ID is out of bounds.
    #[inline]
    pub fn get_room(&self, id: usize) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// Get a room by ID, failing with `RoomNotFound`
    pub fn room(&self, id: usize) -> Result<&Room> {
        self.rooms.get(id).ok_or(LevelError::RoomNotFound(id))
    }

    #[inline]
    pub fn hallways(&self) -> &[Hallway] {
        &self.hallways
    }

    #[inline]
    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    /// ID of the room containing `pos`, walls included
    pub fn find_room_at(&self, pos: Position) -> Option<usize> {
        self.rooms.iter().position(|room| room.contains(pos))
    }

    /// ID of the room whose center is closest to `pos` (requires spatial-index feature)
    ///
    /// # Example
    ///
    /// ```
    /// # use rust_maze_level::*;
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// # let level = (0..100)
    /// #     .find_map(|seed| Level::generate(LevelConfigBuilder::new().seed(seed).build().unwrap()).ok())
    /// #     .unwrap();
    /// let center = level.rooms()[0].center();
    /// assert_eq!(level.nearest_room(center), Some(0));
    /// # }
    /// ```
    #[cfg(feature = "spatial-index")]
    pub fn nearest_room(&self, pos: Position) -> Option<usize> {
        self.spatial_index.find_nearest(pos)
    }

    /// IDs of rooms sharing a hallway with room `id`, ascending
    ///
    /// Returns an empty vec if the ID is invalid.
    pub fn rooms_connected_to(&self, id: usize) -> Vec<usize> {
        let mut neighbors: Vec<usize> = self
            .hallways
            .iter()
            .filter_map(|h| match (h.source == id, h.target == id) {
                (true, _) => Some(h.target),
                (_, true) => Some(h.source),
                _ => None,
            })
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }

    /// Paint the level onto a fresh tile grid
    pub fn paint<P: TilePalette>(&self, palette: &P) -> TileGrid<P::Tile> {
        let mut tiles = TileGrid::new(self.grid, palette.tile(LayoutTile::Empty));
        self.paint_onto(&mut tiles, palette);
        tiles
    }

    /// Paint the level onto an existing tile grid
    ///
    /// Room walls and floors go down first, then hallway walls on tiles that
    /// are still empty, then hallway paths, which open doors in room walls.
    ///
    /// # Panics
    ///
    /// Panics if `tiles` is smaller than the level.
    pub fn paint_onto<P: TilePalette>(&self, tiles: &mut TileGrid<P::Tile>, palette: &P) {
        let (empty, floor, wall) = (
            palette.tile(LayoutTile::Empty),
            palette.tile(LayoutTile::Floor),
            palette.tile(LayoutTile::Wall),
        );

        for room in &self.rooms {
            for pos in room.perimeter() {
                tiles.set(pos, wall);
            }
            for pos in room.interior() {
                tiles.set(pos, floor);
            }
        }

        for hallway in &self.hallways {
            for &pos in &hallway.walls {
                if tiles.get(pos) == empty {
                    tiles.set(pos, wall);
                }
            }
        }

        for hallway in &self.hallways {
            for &pos in &hallway.path {
                tiles.set(pos, floor);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LevelConfigBuilder;
    use crate::tiles::{BasicPalette, BasicTile, CustomPalette};
    use std::collections::{HashSet, VecDeque};

    fn some_level() -> Level {
        (0..100)
            .find_map(|seed| {
                let config = LevelConfigBuilder::new().seed(seed).build().unwrap();
                Level::generate(config).ok()
            })
            .expect("no seed in 0..100 produced a connected level")
    }

    #[test]
    fn test_level_generation() {
        let level = some_level();
        assert!(level.room_count() > 0);
        assert_eq!(level.width(), 75);
        assert_eq!(level.height(), 30);
        assert_eq!(level.hallways().len(), level.room_count() - 1);
        assert!(level.partitions().len() >= level.room_count());
    }

    #[test]
    fn test_get_room() {
        let level = some_level();
        assert!(level.get_room(0).is_some());
        assert!(level.get_room(level.room_count()).is_none());
        assert_eq!(
            level.room(level.room_count()).unwrap_err(),
            LevelError::RoomNotFound(level.room_count())
        );
    }

    #[test]
    fn test_find_room_at() {
        let level = some_level();
        for (id, room) in level.rooms().iter().enumerate() {
            assert_eq!(level.find_room_at(room.center()), Some(id));
            assert_eq!(level.find_room_at(room.lower_left), Some(id));
        }
        assert_eq!(level.find_room_at(Position::new(0, 0)), None);
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_nearest_room() {
        let level = some_level();
        for (id, room) in level.rooms().iter().enumerate() {
            assert_eq!(level.nearest_room(room.center()), Some(id));
        }
    }

    #[test]
    fn test_every_room_has_a_hallway() {
        let level = some_level();
        if level.room_count() > 1 {
            for id in 0..level.room_count() {
                assert!(!level.rooms_connected_to(id).is_empty());
            }
        }
        assert!(level.rooms_connected_to(usize::MAX).is_empty());
    }

    #[test]
    fn test_painted_floor_is_one_region() {
        let level = some_level();
        let tiles = level.paint(&BasicPalette);

        let floors: HashSet<Position> = tiles.positions_of(BasicTile::Floor).into_iter().collect();
        let start = level.rooms()[0].center();
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(pos) = queue.pop_front() {
            for next in level.grid().neighbors(pos) {
                if floors.contains(&next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        assert_eq!(seen.len(), floors.len());

        // Every floor tile is bordered by floor or wall, never by empty space
        for &pos in &floors {
            assert!(level
                .grid()
                .neighbors(pos)
                .all(|n| tiles.get(n) != BasicTile::Nothing));
        }
    }

    #[test]
    fn test_paint_with_custom_palette() {
        let level = some_level();
        let palette = CustomPalette {
            empty: 0u8,
            floor: 1u8,
            wall: 2u8,
        };
        let tiles = level.paint(&palette);
        let room = level.rooms()[0];
        assert_eq!(tiles.get(room.center()), 1);
        assert_eq!(tiles.get(Position::new(-1, -1)), 0);
        assert!(tiles.count(2) > 0);
    }
}
