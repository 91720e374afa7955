//! Corridor graph
//!
//! Undirected 4-neighbour lattice over every tile of the grid. Vertex `v` is
//! the tile with linear index `v` (see [`Grid::index`]).

use crate::grid::Grid;

/// Weight of every lattice edge
pub const UNIT_WEIGHT: u32 = 1;

/// Undirected weighted edge between two vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub v: usize,
    pub w: usize,
    pub weight: u32,
}

impl Edge {
    #[inline]
    pub fn new(v: usize, w: usize, weight: u32) -> Self {
        Self { v, w, weight }
    }

    /// The endpoint opposite `vertex`
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is not an endpoint of this edge.
    #[inline]
    pub fn other(&self, vertex: usize) -> usize {
        if vertex == self.v {
            self.w
        } else if vertex == self.w {
            self.v
        } else {
            panic!("vertex {} is not an endpoint of edge {}-{}", vertex, self.v, self.w)
        }
    }
}

/// Fixed-topology lattice graph over a [`Grid`]
///
/// Each vertex gets an edge to its right neighbour and one to the neighbour
/// directly above, which covers every lattice adjacency exactly once.
/// Adjacency lists are filled in vertex order, right edge before up edge.
#[derive(Debug, Clone)]
pub struct TileGraph {
    grid: Grid,
    adj: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl TileGraph {
    pub fn new(grid: Grid) -> Self {
        let mut graph = Self {
            grid,
            adj: vec![Vec::with_capacity(4); grid.len()],
            edge_count: 0,
        };

        let width = grid.width() as usize;
        for v in 0..grid.len() {
            let pos = grid.position(v);
            if pos.x + 1 < grid.width() {
                graph.add_edge(Edge::new(v, v + 1, UNIT_WEIGHT));
            }
            if pos.y + 1 < grid.height() {
                graph.add_edge(Edge::new(v, v + width, UNIT_WEIGHT));
            }
        }
        graph
    }

    fn add_edge(&mut self, edge: Edge) {
        self.adj[edge.v].push(edge);
        self.adj[edge.w].push(edge);
        self.edge_count += 1;
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Edges incident to `v`
    ///
    /// # Panics
    ///
    /// Panics if `v` is not a vertex of the graph.
    pub fn adj(&self, v: usize) -> &[Edge] {
        self.validate_vertex(v);
        &self.adj[v]
    }

    pub(crate) fn validate_vertex(&self, v: usize) {
        assert!(
            v < self.adj.len(),
            "vertex {} is not between 0 and {}",
            v,
            self.adj.len() - 1
        );
    }
}
