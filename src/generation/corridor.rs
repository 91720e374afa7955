//! Corridor building
//!
//! Routes a masked shortest path between two room centers, cuts it down to
//! the stretch between the two rooms' walls and derives the wall tiles that
//! line it.
//!
//! # Walls
//!
//! The path is walked one step at a time. With `prev` the tile being emitted,
//! `delta` the step leaving it and `prev_delta` the step that reached it:
//!
//! - first tile: both sides of `prev`, plus both sides of the tile behind it
//! - straight step: both sides of `prev`
//! - turn: the tile opposite the new heading, the tile ahead on the old
//!   heading, and the outer diagonal between them
//! - last tile: both sides of `prev` and both sides of the tile ahead of it
//!
//! "Sides" are the two perpendicular neighbours of the heading.

use std::collections::HashSet;

use crate::generation::dijkstra::MaskedShortestPaths;
use crate::generation::graph::TileGraph;
use crate::grid::Position;
use crate::room::Room;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A one-tile-wide corridor between two rooms
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hallway {
    /// Index of the room the corridor was routed from
    pub source: usize,
    /// Index of the room the corridor was routed to
    pub target: usize,
    /// Walkable tiles from the source room's wall to the target room's wall
    pub path: Vec<Position>,
    /// Tiles lining the path, never overlapping it
    pub walls: Vec<Position>,
}

impl Hallway {
    /// Number of walkable tiles
    #[inline]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Whether the corridor joins rooms `a` and `b`, in either direction
    pub fn connects(&self, a: usize, b: usize) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }

    /// Path tiles followed by wall tiles
    pub fn tiles(&self) -> impl Iterator<Item = Position> + '_ {
        self.path.iter().chain(&self.walls).copied()
    }
}

/// Sides of a heading, in lookup order
#[inline]
fn sides(heading: Position) -> [Position; 2] {
    let left = Position::new(-heading.y, heading.x);
    [left, -left]
}

/// Wall candidates for emitting `prev`
///
/// `before` is the tile preceding `prev` on the path (`None` at the first
/// tile) and `after` the tile following it (`None` at the last tile).
/// Returns up to four tiles; none at all for a path of a single tile.
pub fn wall_candidates(
    before: Option<Position>,
    prev: Position,
    after: Option<Position>,
) -> Vec<Position> {
    match (before, after) {
        (None, None) => Vec::new(),
        (Some(before), None) => {
            let prev_delta = prev - before;
            let [a, b] = sides(prev_delta);
            let ahead = prev + prev_delta;
            vec![prev + a, prev + b, ahead + a, ahead + b]
        }
        (None, Some(after)) => {
            let delta = after - prev;
            let [a, b] = sides(delta);
            let behind = prev - delta;
            vec![prev + a, prev + b, behind + a, behind + b]
        }
        (Some(before), Some(after)) => {
            let (prev_delta, delta) = (prev - before, after - prev);
            if delta == prev_delta {
                let [a, b] = sides(delta);
                vec![prev + a, prev + b]
            } else {
                vec![prev - delta, prev + prev_delta, prev + prev_delta - delta]
            }
        }
    }
}

/// Indices of the path stretch between the two rooms' walls
///
/// `start` is the last source wall tile before the path leaves the source
/// wall; when that tile is a corner the stretch starts one tile earlier.
/// `end` is the first target wall tile the path enters from outside; when
/// that tile is a corner the stretch ends one tile later. Both indices are
/// inclusive.
pub fn truncate_path(path: &[Position], source: &Room, target: &Room) -> (usize, usize) {
    let (mut start, mut end) = (0, 0);

    for (i, pair) in path.windows(2).enumerate() {
        let (here, next) = (pair[0], pair[1]);
        if source.on_perimeter(here) && !source.on_perimeter(next) {
            start = if source.is_corner(here) {
                i.saturating_sub(1)
            } else {
                i
            };
        }
        if target.on_perimeter(next) && !target.on_perimeter(here) {
            end = if target.is_corner(next) { i + 2 } else { i + 1 };
            break;
        }
    }

    (start, end.min(path.len().saturating_sub(1)))
}

/// Routes corridors between rooms and tracks the tiles they claim
///
/// A claimed tile belongs to an earlier corridor (path outside the rooms, or
/// wall) and is off limits to every later corridor.
#[derive(Debug, Clone)]
pub struct CorridorRouter<'a> {
    graph: &'a TileGraph,
    rooms: &'a [Room],
    claimed: Vec<bool>,
    clearance: u32,
}

impl<'a> CorridorRouter<'a> {
    pub fn new(graph: &'a TileGraph, rooms: &'a [Room], clearance: u32) -> Self {
        Self {
            graph,
            rooms,
            claimed: vec![false; graph.vertex_count()],
            clearance,
        }
    }

    #[inline]
    pub fn rooms(&self) -> &'a [Room] {
        self.rooms
    }

    /// Whether an earlier corridor owns the tile
    pub fn is_claimed(&self, pos: Position) -> bool {
        self.graph
            .grid()
            .checked_index(pos)
            .is_some_and(|v| self.claimed[v])
    }

    /// Route a corridor from room `source` to room `target`
    ///
    /// Returns `None` when the mask leaves no route between the two centers.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range or both are the same room.
    pub fn connect(&mut self, source: usize, target: usize) -> Option<Hallway> {
        assert!(
            source < self.rooms.len() && target < self.rooms.len(),
            "room pair ({}, {}) out of range for {} rooms",
            source,
            target,
            self.rooms.len()
        );
        assert_ne!(source, target, "cannot connect room {} to itself", source);

        let grid = *self.graph.grid();
        let rooms = self.rooms;
        let (src_room, tgt_room) = (&rooms[source], &rooms[target]);
        let mask = self.mask_for(source, target);
        let tgt_v = grid.index(tgt_room.center());
        let src_v = grid.index(src_room.center());
        let search = MaskedShortestPaths::new(self.graph, src_v, &mask, self.clearance);

        let path: Vec<Position> = search
            .path_to(tgt_v)
            .into_iter()
            .map(|v| grid.position(v))
            .collect();
        if path.is_empty() {
            log::trace!("no route from room {} to room {}", source, target);
            return None;
        }

        let (start, end) = truncate_path(&path, src_room, tgt_room);
        Some(self.build(source, target, &path[start..=end.max(start)]))
    }

    /// Claimed tiles plus the walls of every room but the two endpoints
    fn mask_for(&self, source: usize, target: usize) -> Vec<bool> {
        let grid = self.graph.grid();
        let mut mask = self.claimed.clone();
        for (i, room) in self.rooms.iter().enumerate() {
            if i == source || i == target {
                continue;
            }
            for pos in room.perimeter() {
                mask[grid.index(pos)] = true;
            }
        }
        mask
    }

    fn build(&mut self, source: usize, target: usize, stretch: &[Position]) -> Hallway {
        let grid = *self.graph.grid();
        let mut walls = Vec::new();
        let mut seen = HashSet::new();

        for (j, &prev) in stretch.iter().enumerate() {
            let before = j.checked_sub(1).map(|k| stretch[k]);
            let after = stretch.get(j + 1).copied();
            for wall in wall_candidates(before, prev, after) {
                let free = grid.contains(wall)
                    && !self.claimed[grid.index(wall)]
                    && !self.rooms.iter().any(|room| room.contains(wall));
                if free && seen.insert(wall) {
                    walls.push(wall);
                }
            }
        }

        let on_path: HashSet<Position> = stretch.iter().copied().collect();
        walls.retain(|wall| !on_path.contains(wall));

        let rooms = self.rooms;
        let (src_room, tgt_room) = (&rooms[source], &rooms[target]);
        for &pos in stretch {
            if !src_room.contains(pos) && !tgt_room.contains(pos) {
                self.claimed[grid.index(pos)] = true;
            }
        }
        for &wall in &walls {
            self.claimed[grid.index(wall)] = true;
        }

        Hallway {
            source,
            target,
            path: stretch.to_vec(),
            walls,
        }
    }
}
