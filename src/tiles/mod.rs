//! Tile vocabulary and tile grids
//!
//! Generation only knows three structural roles (empty, floor, wall). A
//! [`TilePalette`] maps those roles onto whatever tile type the caller draws
//! with; [`BasicTile`] is the built-in vocabulary.

mod palette;

pub use palette::{BasicPalette, CustomPalette, LayoutTile, TilePalette};

use std::fmt;

use crate::grid::{Grid, Position};

/// Built-in tile vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BasicTile {
    /// Outside every room and hallway
    #[default]
    Nothing,
    Floor,
    Wall,
    /// Level exit, set into a room wall
    Exit,
    /// The player
    Avatar,
    Torch,
    Bread,
    /// One end of a portal pair
    Portal,
}

impl BasicTile {
    /// Single-character rendering used by debug dumps
    pub fn glyph(self) -> char {
        match self {
            BasicTile::Nothing => ' ',
            BasicTile::Floor => '·',
            BasicTile::Wall => '#',
            BasicTile::Exit => '▢',
            BasicTile::Avatar => '@',
            BasicTile::Torch => '!',
            BasicTile::Bread => '2',
            BasicTile::Portal => '3',
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BasicTile::Nothing => "",
            BasicTile::Floor => "floor",
            BasicTile::Wall => "wall",
            BasicTile::Exit => "exit",
            BasicTile::Avatar => "you",
            BasicTile::Torch => "torch",
            BasicTile::Bread => "bread",
            BasicTile::Portal => "portal",
        }
    }
}

/// Dense 2D tile array addressed by [`Position`]
///
/// Reads outside the grid return the `empty` sentinel; writes outside the
/// grid are contract violations and panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid<T> {
    grid: Grid,
    tiles: Vec<T>,
    empty: T,
}

impl<T: Copy + PartialEq> TileGrid<T> {
    /// A grid filled with `empty`
    pub fn new(grid: Grid, empty: T) -> Self {
        Self {
            grid,
            tiles: vec![empty; grid.len()],
            empty,
        }
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

    /// The sentinel returned for out-of-bounds reads
    #[inline]
    pub fn empty(&self) -> T {
        self.empty
    }

    /// Tile at `pos`, or the empty sentinel outside the grid
    #[inline]
    pub fn get(&self, pos: Position) -> T {
        self.grid
            .checked_index(pos)
            .map_or(self.empty, |i| self.tiles[i])
    }

    /// Write a tile
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside the grid.
    #[inline]
    pub fn set(&mut self, pos: Position, tile: T) {
        let i = self.grid.index(pos);
        self.tiles[i] = tile;
    }

    /// Every position holding `tile`, row by row from the bottom
    pub fn positions_of(&self, tile: T) -> Vec<Position> {
        self.iter()
            .filter(|&(_, t)| t == tile)
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn count(&self, tile: T) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// `(position, tile)` pairs, row by row from the bottom
    pub fn iter(&self) -> impl Iterator<Item = (Position, T)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, &t)| (self.grid.position(i), t))
    }
}

impl fmt::Display for TileGrid<BasicTile> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height()).rev() {
            let row: String = (0..self.width())
                .map(|x| self.get(Position::new(x, y)).glyph())
                .collect();
            writeln!(f, "{}", row.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_reads_return_empty() {
        let tiles = TileGrid::new(Grid::new(4, 3), BasicTile::Nothing);
        assert_eq!(tiles.get(Position::new(-1, 0)), BasicTile::Nothing);
        assert_eq!(tiles.get(Position::new(4, 2)), BasicTile::Nothing);
        assert_eq!(tiles.count(BasicTile::Nothing), 12);
    }

    #[test]
    fn test_set_and_query() {
        let mut tiles = TileGrid::new(Grid::new(4, 3), BasicTile::Nothing);
        tiles.set(Position::new(1, 1), BasicTile::Floor);
        tiles.set(Position::new(3, 0), BasicTile::Floor);
        assert_eq!(tiles.get(Position::new(1, 1)), BasicTile::Floor);
        assert_eq!(
            tiles.positions_of(BasicTile::Floor),
            vec![Position::new(3, 0), Position::new(1, 1)]
        );
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_out_of_bounds_write_panics() {
        let mut tiles = TileGrid::new(Grid::new(4, 3), BasicTile::Nothing);
        tiles.set(Position::new(0, 3), BasicTile::Wall);
    }

    #[test]
    fn test_display_prints_top_row_first() {
        let mut tiles = TileGrid::new(Grid::new(3, 2), BasicTile::Nothing);
        tiles.set(Position::new(0, 1), BasicTile::Wall);
        tiles.set(Position::new(2, 0), BasicTile::Floor);
        assert_eq!(tiles.to_string(), "#\n  ·\n");
    }
}
