//! Tile grid coordinates
//!
//! Every other module addresses tiles either as a [`Position`] or as a linear
//! vertex index `x + width * y`. [`Grid`] converts between the two and answers
//! the boundary and neighbourhood questions corridor routing depends on.

use glam::IVec2;

/// Integer tile coordinate, `x` to the right and `y` upwards
pub type Position = IVec2;

/// The four lattice directions: right, up, left, down
pub const DIRECTIONS: [Position; 4] = [IVec2::X, IVec2::Y, IVec2::NEG_X, IVec2::NEG_Y];

/// Euclidean distance between two tiles
#[inline]
pub fn distance(a: Position, b: Position) -> f64 {
    ((a - b).length_squared() as f64).sqrt()
}

/// Fixed-size rectangular tile space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    /// Create a grid of `width` columns and `height` rows
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or does not fit in an `i32`.
    pub fn new(width: u32, height: u32) -> Self {
        let limit = 1..=i32::MAX as u32;
        assert!(
            limit.contains(&width) && limit.contains(&height),
            "grid dimensions must be positive and fit in i32 (got {}x{})",
            width,
            height
        );
        Self {
            width: width as i32,
            height: height as i32,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of tiles (and graph vertices)
    #[inline]
    pub fn len(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Upper-right tile of the grid
    #[inline]
    pub fn max_position(&self) -> Position {
        Position::new(self.width - 1, self.height - 1)
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// Linear index of a tile, or `None` when it lies outside the grid
    #[inline]
    pub fn checked_index(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.x as usize + self.width as usize * pos.y as usize)
    }

    /// Linear index of a tile
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside the grid.
    #[inline]
    pub fn index(&self, pos: Position) -> usize {
        match self.checked_index(pos) {
            Some(index) => index,
            None => panic!(
                "position {} outside {}x{} grid",
                pos, self.width, self.height
            ),
        }
    }

    /// Tile coordinate of a linear index
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a vertex of this grid.
    #[inline]
    pub fn position(&self, index: usize) -> Position {
        assert!(
            index < self.len(),
            "vertex {} is not between 0 and {}",
            index,
            self.len() - 1
        );
        let width = self.width as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }

    /// Whether a tile lies on the outermost ring of the grid
    #[inline]
    pub fn is_boundary(&self, pos: Position) -> bool {
        pos.x == 0 || pos.y == 0 || pos.x == self.width - 1 || pos.y == self.height - 1
    }

    /// In-bounds 4-neighbours of a tile, in [`DIRECTIONS`] order
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        DIRECTIONS
            .iter()
            .map(move |&dir| pos + dir)
            .filter(move |&p| self.contains(p))
    }

    /// The tile plus every in-bounds tile within Manhattan distance `clearance`
    ///
    /// With a clearance of 1 this is the tile and its four neighbours.
    pub fn periphery(&self, pos: Position, clearance: u32) -> impl Iterator<Item = Position> + '_ {
        let r = clearance as i32;
        (-r..=r)
            .flat_map(move |dy| {
                let span = r - dy.abs();
                (-span..=span).map(move |dx| pos + Position::new(dx, dy))
            })
            .filter(move |&p| self.contains(p))
    }
}
