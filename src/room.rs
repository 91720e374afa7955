//! Room Structure
//!
//! A room is an axis-aligned rectangle whose border ring is wall and whose
//! inside is floor. Both corners are inclusive and lie on the wall ring.

use crate::grid::Position;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A placed rectangular room
///
/// Rooms are immutable once placed. Their index in the level's room list is
/// stable and used as the room identifier everywhere else.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Room {
    /// Lower-left wall corner
    pub lower_left: Position,
    /// Upper-right wall corner
    pub upper_right: Position,
}

impl Room {
    /// Create a room from its two wall corners
    ///
    /// # Panics
    ///
    /// Panics if the room would have no floor tile, i.e. it is narrower or
    /// shorter than 3 tiles.
    pub fn new(lower_left: Position, upper_right: Position) -> Self {
        let span = upper_right - lower_left;
        assert!(
            span.x >= 2 && span.y >= 2,
            "room {}-{} has no interior",
            lower_left,
            upper_right
        );
        Self {
            lower_left,
            upper_right,
        }
    }

    /// Width in tiles, walls included
    #[inline]
    pub fn width(&self) -> i32 {
        self.upper_right.x - self.lower_left.x + 1
    }

    /// Height in tiles, walls included
    #[inline]
    pub fn height(&self) -> i32 {
        self.upper_right.y - self.lower_left.y + 1
    }

    /// Center tile, rounded towards the lower-left corner
    ///
    /// Always a floor tile because rooms are at least 3x3.
    #[inline]
    pub fn center(&self) -> Position {
        (self.lower_left + self.upper_right) / 2
    }

    /// Number of floor tiles
    pub fn floor_area(&self) -> usize {
        ((self.width() - 2) * (self.height() - 2)) as usize
    }

    /// Whether `pos` is part of the room, walls included
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.cmpge(self.lower_left).all() && pos.cmple(self.upper_right).all()
    }

    /// Whether `pos` is a floor tile of the room
    #[inline]
    pub fn interior_contains(&self, pos: Position) -> bool {
        pos.cmpgt(self.lower_left).all() && pos.cmplt(self.upper_right).all()
    }

    /// Whether `pos` lies on the wall ring
    #[inline]
    pub fn on_perimeter(&self, pos: Position) -> bool {
        self.contains(pos) && !self.interior_contains(pos)
    }

    /// Whether `pos` is one of the four wall corners
    pub fn is_corner(&self, pos: Position) -> bool {
        (pos.x == self.lower_left.x || pos.x == self.upper_right.x)
            && (pos.y == self.lower_left.y || pos.y == self.upper_right.y)
    }

    /// Every wall tile, counter-clockwise from the lower-left corner
    pub fn perimeter(&self) -> Vec<Position> {
        let (ll, ur) = (self.lower_left, self.upper_right);
        let mut tiles = Vec::with_capacity((2 * (self.width() + self.height()) - 4) as usize);
        tiles.extend((ll.x..ur.x).map(|x| Position::new(x, ll.y)));
        tiles.extend((ll.y..ur.y).map(|y| Position::new(ur.x, y)));
        tiles.extend((ll.x + 1..=ur.x).rev().map(|x| Position::new(x, ur.y)));
        tiles.extend((ll.y + 1..=ur.y).rev().map(|y| Position::new(ll.x, y)));
        tiles
    }

    /// Every floor tile, row by row from the bottom
    pub fn interior(&self) -> impl Iterator<Item = Position> + '_ {
        let (ll, ur) = (self.lower_left, self.upper_right);
        (ll.y + 1..ur.y).flat_map(move |y| (ll.x + 1..ur.x).map(move |x| Position::new(x, y)))
    }

    /// Whether the two rooms share any tile, walls included
    pub fn overlaps(&self, other: &Room) -> bool {
        self.lower_left.cmple(other.upper_right).all()
            && other.lower_left.cmple(self.upper_right).all()
    }
}
