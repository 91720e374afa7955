//! Mapping structural tile roles onto a caller's tile type

use super::BasicTile;

/// Structural role of a tile in a generated layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutTile {
    Empty,
    Floor,
    Wall,
}

/// Trait for mapping layout roles to concrete tiles
pub trait TilePalette {
    /// The tile type painted by this palette
    type Tile: Copy + PartialEq;

    /// Map a layout role to a tile
    fn tile(&self, role: LayoutTile) -> Self::Tile;
}

/// Default palette producing [`BasicTile`]
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicPalette;

impl TilePalette for BasicPalette {
    type Tile = BasicTile;

    fn tile(&self, role: LayoutTile) -> BasicTile {
        match role {
            LayoutTile::Empty => BasicTile::Nothing,
            LayoutTile::Floor => BasicTile::Floor,
            LayoutTile::Wall => BasicTile::Wall,
        }
    }
}

/// Palette with one caller-chosen tile per role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomPalette<T> {
    pub empty: T,
    pub floor: T,
    pub wall: T,
}

impl<T: Copy + PartialEq> TilePalette for CustomPalette<T> {
    type Tile = T;

    fn tile(&self, role: LayoutTile) -> T {
        match role {
            LayoutTile::Empty => self.empty,
            LayoutTile::Floor => self.floor,
            LayoutTile::Wall => self.wall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_palette() {
        let palette = BasicPalette;
        assert_eq!(palette.tile(LayoutTile::Empty), BasicTile::Nothing);
        assert_eq!(palette.tile(LayoutTile::Floor), BasicTile::Floor);
        assert_eq!(palette.tile(LayoutTile::Wall), BasicTile::Wall);
    }

    #[test]
    fn test_custom_palette() {
        let palette = CustomPalette {
            empty: ' ',
            floor: '.',
            wall: '#',
        };
        assert_eq!(palette.tile(LayoutTile::Floor), '.');
        assert_eq!(palette.tile(LayoutTile::Wall), '#');
    }
}
