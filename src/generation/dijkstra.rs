//! Masked single-source shortest paths
//!
//! Dijkstra's algorithm over a [`TileGraph`] with an indexed priority queue
//! supporting decrease-key. Relaxation refuses to leave boundary tiles and
//! refuses to enter any tile whose periphery touches a masked tile, which
//! keeps corridors off the grid edge and clear of foreign rooms and earlier
//! corridors.

use crate::generation::graph::{Edge, TileGraph};

/// Indexed binary min-heap over keys `0..capacity`
///
/// Each index appears at most once; its key can be lowered in place.
#[derive(Debug, Clone)]
pub struct IndexMinPq<K> {
    heap: Vec<usize>,
    slot: Vec<Option<usize>>,
    keys: Vec<Option<K>>,
}

impl<K: Ord + Copy> IndexMinPq<K> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            slot: vec![None; capacity],
            keys: vec![None; capacity],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.validate(index);
        self.slot[index].is_some()
    }

    pub fn key_of(&self, index: usize) -> Option<K> {
        self.validate(index);
        self.keys[index]
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range or already queued.
    pub fn insert(&mut self, index: usize, key: K) {
        assert!(!self.contains(index), "index {} is already queued", index);
        let pos = self.heap.len();
        self.heap.push(index);
        self.slot[index] = Some(pos);
        self.keys[index] = Some(key);
        self.swim(pos);
    }

    /// # Panics
    ///
    /// Panics if `index` is not queued or `key` is not strictly smaller.
    pub fn decrease_key(&mut self, index: usize, key: K) {
        self.validate(index);
        let (Some(pos), Some(current)) = (self.slot[index], self.keys[index]) else {
            panic!("index {} is not queued", index);
        };
        assert!(key < current, "decrease_key would not lower the key of {}", index);
        self.keys[index] = Some(key);
        self.swim(pos);
    }

    /// Remove and return the index with the smallest key
    pub fn pop_min(&mut self) -> Option<(usize, K)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.exchange(0, last);
        let index = self.heap.pop()?;
        self.slot[index] = None;
        if !self.heap.is_empty() {
            self.sink(0);
        }
        self.keys[index].take().map(|key| (index, key))
    }

    fn validate(&self, index: usize) {
        assert!(
            index < self.slot.len(),
            "index {} is not between 0 and {}",
            index,
            self.slot.len().saturating_sub(1)
        );
    }

    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        self.keys[self.heap[a]] < self.keys[self.heap[b]]
    }

    fn exchange(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.slot[self.heap[a]] = Some(a);
        self.slot[self.heap[b]] = Some(b);
    }

    fn swim(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.less(pos, parent) {
                break;
            }
            self.exchange(pos, parent);
            pos = parent;
        }
    }

    fn sink(&mut self, mut pos: usize) {
        loop {
            let left = 2 * pos + 1;
            if left >= self.heap.len() {
                break;
            }
            let right = left + 1;
            let child = if right < self.heap.len() && self.less(right, left) {
                right
            } else {
                left
            };
            if !self.less(child, pos) {
                break;
            }
            self.exchange(pos, child);
            pos = child;
        }
    }
}

/// Priority of a queued vertex: tentative distance, then discovery order
type Priority = (u32, u64);

/// Shortest-path tree from one source under a vertex mask
///
/// # Example
///
/// ```
/// use rust_maze_level::generation::{MaskedShortestPaths, TileGraph};
/// use rust_maze_level::{Grid, Position};
///
/// let grid = Grid::new(10, 10);
/// let graph = TileGraph::new(grid);
/// let mask = vec![false; grid.len()];
///
/// let from = grid.index(Position::new(2, 2));
/// let to = grid.index(Position::new(6, 5));
/// let sp = MaskedShortestPaths::new(&graph, from, &mask, 1);
/// assert_eq!(sp.dist_to(to), Some(7));
/// assert_eq!(sp.path_to(to).len(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct MaskedShortestPaths {
    source: usize,
    dist_to: Vec<u32>,
    edge_to: Vec<Option<Edge>>,
}

impl MaskedShortestPaths {
    /// Run the search from `source`
    ///
    /// * `mask` - one flag per vertex; a tile within `clearance` of a flagged
    ///   tile cannot be entered
    ///
    /// # Panics
    ///
    /// Panics if `source` is not a vertex or `mask` does not cover every vertex.
    pub fn new(graph: &TileGraph, source: usize, mask: &[bool], clearance: u32) -> Self {
        graph.validate_vertex(source);
        assert_eq!(
            mask.len(),
            graph.vertex_count(),
            "mask covers {} of {} vertices",
            mask.len(),
            graph.vertex_count()
        );

        let grid = *graph.grid();
        let mut dist_to = vec![u32::MAX; graph.vertex_count()];
        let mut edge_to: Vec<Option<Edge>> = vec![None; graph.vertex_count()];
        let mut pq: IndexMinPq<Priority> = IndexMinPq::with_capacity(graph.vertex_count());
        let mut discovered = 0u64;

        dist_to[source] = 0;
        pq.insert(source, (0, discovered));

        while let Some((v, _)) = pq.pop_min() {
            if grid.is_boundary(grid.position(v)) {
                continue;
            }
            for edge in graph.adj(v) {
                let w = edge.other(v);
                let candidate = dist_to[v].saturating_add(edge.weight);
                if candidate >= dist_to[w] {
                    continue;
                }
                let blocked = grid
                    .periphery(grid.position(w), clearance)
                    .any(|p| mask[grid.index(p)]);
                if blocked {
                    continue;
                }

                dist_to[w] = candidate;
                edge_to[w] = Some(*edge);
                discovered += 1;
                if pq.contains(w) {
                    pq.decrease_key(w, (candidate, discovered));
                } else {
                    pq.insert(w, (candidate, discovered));
                }
            }
        }

        Self {
            source,
            dist_to,
            edge_to,
        }
    }

    #[inline]
    pub fn source(&self) -> usize {
        self.source
    }

    /// Length of the shortest path to `v`, or `None` when unreachable
    pub fn dist_to(&self, v: usize) -> Option<u32> {
        self.validate_vertex(v);
        (self.dist_to[v] != u32::MAX).then_some(self.dist_to[v])
    }

    pub fn has_path_to(&self, v: usize) -> bool {
        self.dist_to(v).is_some()
    }

    /// Vertices from the source to `v`, both included
    ///
    /// Empty when `v` is unreachable.
    pub fn path_to(&self, v: usize) -> Vec<usize> {
        if !self.has_path_to(v) {
            return Vec::new();
        }
        let mut path = vec![v];
        let mut current = v;
        while let Some(edge) = self.edge_to[current] {
            current = edge.other(current);
            path.push(current);
        }
        path.reverse();
        path
    }

    fn validate_vertex(&self, v: usize) {
        assert!(
            v < self.dist_to.len(),
            "vertex {} is not between 0 and {}",
            v,
            self.dist_to.len() - 1
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid, Position};

    #[test]
    fn test_pq_orders_and_decreases() {
        let mut pq = IndexMinPq::with_capacity(6);
        pq.insert(0, 50);
        pq.insert(3, 10);
        pq.insert(5, 30);
        pq.insert(1, 20);
        pq.decrease_key(0, 5);
        assert!(pq.contains(5));
        assert_eq!(pq.key_of(1), Some(20));

        let order: Vec<_> = std::iter::from_fn(|| pq.pop_min()).collect();
        assert_eq!(order, vec![(0, 5), (3, 10), (1, 20), (5, 30)]);
        assert!(pq.is_empty());
        assert!(!pq.contains(0));
    }

    #[test]
    fn test_pq_equal_distances_pop_in_discovery_order() {
        let mut pq: IndexMinPq<Priority> = IndexMinPq::with_capacity(8);
        pq.insert(6, (3, 4));
        pq.insert(2, (3, 1));
        pq.insert(7, (2, 9));
        pq.insert(0, (3, 3));
        pq.insert(4, (3, 2));
        pq.decrease_key(6, (3, 0));

        let order: Vec<_> = std::iter::from_fn(|| pq.pop_min()).map(|(i, _)| i).collect();
        assert_eq!(order, vec![7, 6, 2, 4, 0]);
    }

    #[test]
    fn test_first_discovered_route_wins_ties() {
        // Every monotone staircase from (2, 2) to (5, 5) is a shortest path.
        // Adjacency runs down, left, right, up, so x steps are discovered
        // first and the first discoverer of a tile keeps it.
        let grid = Grid::new(10, 10);
        let graph = TileGraph::new(grid);
        let mask = vec![false; grid.len()];
        let from = grid.index(Position::new(2, 2));
        let to = grid.index(Position::new(5, 5));
        let sp = MaskedShortestPaths::new(&graph, from, &mask, 1);

        let path: Vec<_> = sp.path_to(to).into_iter().map(|v| grid.position(v)).collect();
        let expected: Vec<_> = [(2, 2), (3, 2), (4, 2), (5, 2), (5, 3), (5, 4), (5, 5)]
            .into_iter()
            .map(|(x, y)| Position::new(x, y))
            .collect();
        assert_eq!(path, expected);
        assert_eq!(sp.dist_to(to), Some(6));
    }

    #[test]
    #[should_panic(expected = "already queued")]
    fn test_pq_rejects_duplicate_insert() {
        let mut pq = IndexMinPq::with_capacity(2);
        pq.insert(1, 1);
        pq.insert(1, 0);
    }

    #[test]
    #[should_panic(expected = "not between")]
    fn test_pq_rejects_out_of_range() {
        let mut pq = IndexMinPq::with_capacity(2);
        pq.insert(2, 1);
    }

    #[test]
    fn test_unmasked_distances_are_manhattan() {
        let grid = Grid::new(12, 9);
        let graph = TileGraph::new(grid);
        let mask = vec![false; grid.len()];
        let source = grid.index(Position::new(3, 3));
        let sp = MaskedShortestPaths::new(&graph, source, &mask, 1);

        assert_eq!(sp.dist_to(source), Some(0));
        assert_eq!(sp.dist_to(grid.index(Position::new(8, 6))), Some(8));
        assert_eq!(sp.path_to(source), vec![source]);

        let path = sp.path_to(grid.index(Position::new(8, 6)));
        assert_eq!(path.first(), Some(&source));
        for pair in path.windows(2) {
            let step = grid.position(pair[1]) - grid.position(pair[0]);
            assert_eq!(step.abs().element_sum(), 1);
        }
    }

    #[test]
    fn test_boundary_tiles_are_dead_ends() {
        let grid = Grid::new(8, 8);
        let graph = TileGraph::new(grid);
        let mask = vec![false; grid.len()];
        let sp = MaskedShortestPaths::new(&graph, grid.index(Position::new(3, 3)), &mask, 1);

        // Reachable as a final hop, but never expanded further
        assert!(sp.has_path_to(grid.index(Position::new(0, 3))));
        assert!(!sp.has_path_to(grid.index(Position::new(0, 0))));
    }

    #[test]
    fn test_mask_blocks_periphery() {
        let grid = Grid::new(11, 11);
        let graph = TileGraph::new(grid);
        let mut mask = vec![false; grid.len()];
        // Wall across the grid at x = 5, leaving no gap
        for y in 0..11 {
            mask[grid.index(Position::new(5, y))] = true;
        }
        let sp = MaskedShortestPaths::new(&graph, grid.index(Position::new(2, 5)), &mask, 1);
        assert!(!sp.has_path_to(grid.index(Position::new(8, 5))));
        // x = 4 is adjacent to the wall, so it cannot be entered either
        assert!(!sp.has_path_to(grid.index(Position::new(4, 5))));
        assert!(sp.has_path_to(grid.index(Position::new(3, 5))));
        assert!(sp.path_to(grid.index(Position::new(8, 5))).is_empty());
    }

    #[test]
    fn test_detour_around_mask() {
        let grid = Grid::new(15, 15);
        let graph = TileGraph::new(grid);
        let mut mask = vec![false; grid.len()];
        for y in 0..10 {
            mask[grid.index(Position::new(7, y))] = true;
        }
        let from = grid.index(Position::new(3, 3));
        let to = grid.index(Position::new(11, 3));
        let sp = MaskedShortestPaths::new(&graph, from, &mask, 1);

        // Must climb to y = 11 to pass the masked column and its periphery
        assert_eq!(sp.dist_to(to), Some(8 + 2 * 8));
        assert!(sp
            .path_to(to)
            .iter()
            .all(|&v| grid.periphery(grid.position(v), 1).all(|p| !mask[grid.index(p)])
                || v == from));
    }

    #[test]
    #[should_panic(expected = "not between")]
    fn test_invalid_vertex_panics() {
        let grid = Grid::new(4, 4);
        let graph = TileGraph::new(grid);
        let sp = MaskedShortestPaths::new(&graph, 5, &vec![false; 16], 1);
        sp.dist_to(16);
    }
}
