//! Spatial indexing for fast position-to-room lookups
//!
//! This module is only available with the `spatial-index` feature.

#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;

#[cfg(feature = "spatial-index")]
use crate::grid::Position;

/// KD-tree over room centers
///
/// Answers "which room is closest to this tile" in O(log n), which is what
/// spawn logic and debug tooling need when a position falls outside every
/// room.
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SpatialIndex {
    tree: Option<ImmutableKdTree<f32, usize, 2, 32>>,
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex {
    /// Build spatial index from room centers
    ///
    /// # Example
    ///
    /// ```
    /// use rust_maze_level::*;
    ///
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let centers = vec![Position::new(5, 5), Position::new(40, 12), Position::new(20, 25)];
    ///
    /// let index = SpatialIndex::new(&centers);
    /// assert_eq!(index.find_nearest(Position::new(37, 10)), Some(1));
    /// # }
    /// ```
    pub fn new(centers: &[Position]) -> Self {
        if centers.is_empty() {
            return Self { tree: None };
        }

        let points: Vec<[f32; 2]> = centers
            .iter()
            .map(|c| [c.x as f32, c.y as f32])
            .collect();

        Self {
            tree: Some(ImmutableKdTree::new_from_slice(&points)),
        }
    }

    /// Index of the center nearest to `position`
    ///
    /// `None` only for an index built from no centers.
    pub fn find_nearest(&self, position: Position) -> Option<usize> {
        let tree = self.tree.as_ref()?;
        let query = [position.x as f32, position.y as f32];
        let result = tree.nearest_one::<SquaredEuclidean>(&query);
        Some(result.item as usize)
    }
}
