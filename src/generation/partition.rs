//! Space Partitioning
//!
//! Splits the world into disjoint rectangles with a depth-capped 2D KD-tree
//! built from randomly sampled anchor positions.
//!
//! # Algorithm
//!
//! Anchors are inserted at leaves. Each node splits on its axis (x at the root,
//! alternating with depth); a candidate whose coordinate on that axis is `>=`
//! the node's goes to the upper branch, anything else to the lower branch.
//! An insertion is dropped when the layer budget runs out along its path or
//! when the candidate sits closer than the minimum spacing to its would-be
//! parent.
//!
//! Partitions are read back with a pre-order walk from the world bounding box:
//! the upper branch raises the box's lower bound on the node's axis to the
//! node's coordinate, the lower branch lowers the upper bound to it, and every
//! empty child emits the box accumulated so far. A tree of `n` nodes therefore
//! yields `n + 1` partitions.

use rand::Rng;
use std::time::Instant;

use crate::config::LevelConfig;
use crate::grid::{distance, Grid, Position};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Splitting axis of a partition node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Coordinate index into a [`Position`]
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }

    /// Axis used one level further down the tree
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// Axis-aligned region of the world produced by the partition tree
///
/// The lower-left corner is inclusive and the upper-right corner exclusive, so
/// neighbouring partitions share a bound but no tile.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub lower_left: Position,
    pub upper_right: Position,
}

impl Partition {
    pub fn new(lower_left: Position, upper_right: Position) -> Self {
        Self {
            lower_left,
            upper_right,
        }
    }

    /// Box the partition walk starts from: `(0, 0)` to the grid's last tile
    pub fn world(grid: &Grid) -> Self {
        Self::new(Position::ZERO, grid.max_position())
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.upper_right.x - self.lower_left.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.upper_right.y - self.lower_left.y
    }

    /// Number of tiles covered
    #[inline]
    pub fn area(&self) -> i64 {
        self.width().max(0) as i64 * self.height().max(0) as i64
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.cmpge(self.lower_left).all() && pos.cmplt(self.upper_right).all()
    }

    /// Whether the two partitions share a tile
    pub fn intersects(&self, other: &Partition) -> bool {
        self.lower_left.cmplt(other.upper_right).all()
            && other.lower_left.cmplt(self.upper_right).all()
    }

    fn upper_split(&self, at: Position, axis: Axis) -> Self {
        let mut lower_left = self.lower_left;
        lower_left[axis.index()] = at[axis.index()];
        Self::new(lower_left, self.upper_right)
    }

    fn lower_split(&self, at: Position, axis: Axis) -> Self {
        let mut upper_right = self.upper_right;
        upper_right[axis.index()] = at[axis.index()];
        Self::new(self.lower_left, upper_right)
    }
}

/// A node of the partition tree
#[derive(Debug, Clone)]
pub struct PartitionNode {
    pub pos: Position,
    pub axis: Axis,
    /// Nodes with `coord >= pos[axis]`
    pub upper: Option<Box<PartitionNode>>,
    /// Nodes with `coord < pos[axis]`
    pub lower: Option<Box<PartitionNode>>,
    /// Number of nodes in this subtree, itself included
    pub size: usize,
}

impl PartitionNode {
    fn leaf(pos: Position, axis: Axis) -> Self {
        Self {
            pos,
            axis,
            upper: None,
            lower: None,
            size: 1,
        }
    }

    #[inline]
    fn goes_upper(&self, pos: Position) -> bool {
        pos[self.axis.index()] >= self.pos[self.axis.index()]
    }
}

/// Depth-capped 2D KD-tree over partition anchors
///
/// # Example
///
/// ```
/// use rust_maze_level::generation::{Partition, PartitionTree};
/// use rust_maze_level::Position;
///
/// let mut tree = PartitionTree::new(5, 18f64.sqrt());
/// assert!(tree.insert(Position::new(5, 5)));
/// assert!(tree.insert(Position::new(2, 2)));
/// assert!(!tree.insert(Position::new(6, 6))); // too close to (5, 5)
///
/// let world = Partition::new(Position::ZERO, Position::new(49, 49));
/// assert_eq!(tree.partitions(world).len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct PartitionTree {
    root: Option<Box<PartitionNode>>,
    max_layers: u32,
    min_spacing: f64,
}

impl PartitionTree {
    /// Create an empty tree
    ///
    /// * `max_layers` - number of levels a path may have, root included
    /// * `min_spacing` - minimum distance between a node and its parent
    pub fn new(max_layers: u32, min_spacing: f64) -> Self {
        Self {
            root: None,
            max_layers,
            min_spacing,
        }
    }

    /// Number of anchors in the tree
    #[inline]
    pub fn size(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.size)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[inline]
    pub fn root(&self) -> Option<&PartitionNode> {
        self.root.as_deref()
    }

    /// Number of levels on the deepest path
    pub fn depth(&self) -> u32 {
        fn depth_of(node: Option<&PartitionNode>) -> u32 {
            node.map_or(0, |n| {
                1 + depth_of(n.upper.as_deref()).max(depth_of(n.lower.as_deref()))
            })
        }
        depth_of(self.root())
    }

    /// Insert an anchor at a leaf
    ///
    /// Returns `false` and leaves the tree untouched when the layer cap is
    /// exhausted along the insertion path or the anchor is closer than the
    /// minimum spacing to its would-be parent.
    pub fn insert(&mut self, pos: Position) -> bool {
        insert_at(&mut self.root, pos, None, Axis::X, self.max_layers, self.min_spacing)
    }

    /// The node an insertion of `pos` would attach under
    ///
    /// `None` for an empty tree.
    pub fn insertion_parent(&self, pos: Position) -> Option<Position> {
        let mut current = self.root()?;
        loop {
            let next = if current.goes_upper(pos) {
                current.upper.as_deref()
            } else {
                current.lower.as_deref()
            };
            match next {
                Some(child) => current = child,
                None => return Some(current.pos),
            }
        }
    }

    /// Rectangles left empty by the tree inside `world`, in pre-order
    ///
    /// Upper branches are visited before lower ones.
    pub fn partitions(&self, world: Partition) -> Vec<Partition> {
        let mut out = Vec::with_capacity(self.size() + 1);
        collect_partitions(self.root(), world, &mut out);
        out
    }
}

fn insert_at(
    slot: &mut Option<Box<PartitionNode>>,
    pos: Position,
    parent: Option<Position>,
    axis: Axis,
    layers_left: u32,
    min_spacing: f64,
) -> bool {
    if layers_left == 0 {
        return false;
    }

    let node = match slot {
        Some(node) => node,
        None => {
            if parent.is_some_and(|parent| distance(pos, parent) < min_spacing) {
                return false;
            }
            *slot = Some(Box::new(PartitionNode::leaf(pos, axis)));
            return true;
        }
    };

    let (anchor, child_axis) = (node.pos, node.axis.flip());
    let child = if node.goes_upper(pos) {
        &mut node.upper
    } else {
        &mut node.lower
    };

    let inserted = insert_at(child, pos, Some(anchor), child_axis, layers_left - 1, min_spacing);
    if inserted {
        node.size += 1;
    }
    inserted
}

fn collect_partitions(node: Option<&PartitionNode>, bounds: Partition, out: &mut Vec<Partition>) {
    match node {
        None => out.push(bounds),
        Some(node) => {
            collect_partitions(node.upper.as_deref(), bounds.upper_split(node.pos, node.axis), out);
            collect_partitions(node.lower.as_deref(), bounds.lower_split(node.pos, node.axis), out);
        }
    }
}

/// Grow a partition tree from random anchors
///
/// Anchors are drawn from the grid's inner tiles (x first, then y) until the
/// tree would yield `target_partition_count` partitions or the attempt budget is
/// spent. Callers must tolerate fewer partitions than requested.
///
/// A grid narrower or shorter than 3 tiles has no inner tile, and the tree
/// comes back empty.
pub fn sample_partition_tree<R: Rng>(
    rng: &mut R,
    grid: &Grid,
    config: &LevelConfig,
) -> PartitionTree {
    let start = Instant::now();
    let mut tree = PartitionTree::new(config.max_partition_layers, config.min_anchor_spacing);
    let mut attempts = 0;
    if grid.width() < 3 || grid.height() < 3 {
        log::debug!("partition tree: {}x{} grid has no inner tile", grid.width(), grid.height());
        return tree;
    }

    while attempts < config.anchor_attempts && tree.size() + 1 < config.target_partition_count {
        attempts += 1;
        let x = rng.gen_range(1..grid.width() - 1);
        let y = rng.gen_range(1..grid.height() - 1);
        tree.insert(Position::new(x, y));
    }

    log::debug!(
        "partition tree: {} anchors from {} attempts, depth {} ({:.2?})",
        tree.size(),
        attempts,
        tree.depth(),
        start.elapsed()
    );
    tree
}
