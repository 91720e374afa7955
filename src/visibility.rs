//! Field-of-view over a painted tile grid
//!
//! Light spreads through floor-like tiles up to a step radius. Walls are lit
//! but stop the spread; empty space is never lit.

use std::collections::{HashSet, VecDeque};

use crate::grid::Position;
use crate::tiles::{BasicTile, TileGrid};

/// Tiles lit from `origin` within `radius` orthogonal steps
pub fn visible_from(
    tiles: &TileGrid<BasicTile>,
    origin: Position,
    radius: u32,
) -> HashSet<Position> {
    let mut visible = HashSet::new();
    if tiles.get(origin) == BasicTile::Nothing {
        return visible;
    }

    // Breadth-first, so a tile is first reached with the most light left
    let mut queue = VecDeque::from([(origin, radius)]);
    visible.insert(origin);
    while let Some((pos, light)) = queue.pop_front() {
        if light == 0 || tiles.get(pos) == BasicTile::Wall {
            continue;
        }
        for next in tiles.grid().neighbors(pos) {
            if tiles.get(next) != BasicTile::Nothing && visible.insert(next) {
                queue.push_back((next, light - 1));
            }
        }
    }
    visible
}

/// Grid showing only the tiles lit from any of `origins`
///
/// Unlit tiles come back as [`BasicTile::Nothing`].
pub fn field_of_view(
    tiles: &TileGrid<BasicTile>,
    origins: &[Position],
    radius: u32,
) -> TileGrid<BasicTile> {
    let mut view = TileGrid::new(*tiles.grid(), BasicTile::Nothing);
    for &origin in origins {
        for pos in visible_from(tiles, origin, radius) {
            view.set(pos, tiles.get(pos));
        }
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    /// 7x3 corridor: walls on rows 0 and 2, floor on row 1, a wall at x = 4
    fn corridor() -> TileGrid<BasicTile> {
        let mut tiles = TileGrid::new(Grid::new(7, 3), BasicTile::Nothing);
        for x in 0..7 {
            tiles.set(Position::new(x, 0), BasicTile::Wall);
            tiles.set(Position::new(x, 1), BasicTile::Floor);
            tiles.set(Position::new(x, 2), BasicTile::Wall);
        }
        tiles.set(Position::new(4, 1), BasicTile::Wall);
        tiles
    }

    #[test]
    fn test_radius_limits_spread() {
        let tiles = corridor();
        let seen = visible_from(&tiles, Position::new(0, 1), 2);
        assert!(seen.contains(&Position::new(2, 1)));
        assert!(!seen.contains(&Position::new(3, 1)));
        assert!(seen.contains(&Position::new(1, 0)));
    }

    #[test]
    fn test_walls_block_light() {
        let tiles = corridor();
        let seen = visible_from(&tiles, Position::new(1, 1), 10);
        assert!(seen.contains(&Position::new(4, 1)));
        assert!(!seen.contains(&Position::new(5, 1)));
        assert!(!seen.contains(&Position::new(6, 1)));
    }

    #[test]
    fn test_zero_radius() {
        let tiles = corridor();
        let seen = visible_from(&tiles, Position::new(2, 1), 0);
        assert_eq!(seen, HashSet::from([Position::new(2, 1)]));
    }

    #[test]
    fn test_origin_in_empty_space() {
        let tiles = TileGrid::new(Grid::new(4, 4), BasicTile::Nothing);
        assert!(visible_from(&tiles, Position::new(1, 1), 5).is_empty());
    }

    #[test]
    fn test_field_of_view_merges_origins() {
        let tiles = corridor();
        let view = field_of_view(&tiles, &[Position::new(0, 1), Position::new(6, 1)], 1);
        assert_eq!(view.get(Position::new(0, 1)), BasicTile::Floor);
        assert_eq!(view.get(Position::new(6, 1)), BasicTile::Floor);
        assert_eq!(view.get(Position::new(5, 2)), BasicTile::Nothing);
        assert_eq!(view.get(Position::new(3, 1)), BasicTile::Nothing);
        assert_eq!(view.count(BasicTile::Floor), 4);
    }
}
