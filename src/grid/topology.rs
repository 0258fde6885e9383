//! Checkerboard sublattice topology on a regular M x N grid.
//!
//! Dense indices are row-major (`row * N + col`). A sublattice holds the cells
//! whose colour `(row + col) % 2` matches its parity; its staggered index
//! enumerates those cells in ascending dense order. The U and V sublattices of
//! the same shape partition the grid.

use serde::{Deserialize, Serialize};

/// Lattice shape: `rows` (M) by `cols` (N).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of dense cells, M * N.
    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn dense_index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    #[inline]
    pub fn row_col(&self, dense: usize) -> (usize, usize) {
        (dense / self.cols, dense % self.cols)
    }

    /// Half-width and half-height of the physical domain: ((N-1)dx/2, (M-1)dy/2).
    pub fn physical_extent(&self, dx: f64, dy: f64) -> (f64, f64) {
        let half_width = self.cols.saturating_sub(1) as f64 * dx / 2.0;
        let half_height = self.rows.saturating_sub(1) as f64 * dy / 2.0;
        (half_width, half_height)
    }
}

/// Which checkerboard colour a field lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sublattice {
    /// Cells with `(row + col)` even.
    U,
    /// Cells with `(row + col)` odd.
    V,
}

impl Sublattice {
    fn parity(self) -> usize {
        match self {
            Sublattice::U => 0,
            Sublattice::V => 1,
        }
    }

    /// The complementary colour.
    pub fn partner(self) -> Self {
        match self {
            Sublattice::U => Sublattice::V,
            Sublattice::V => Sublattice::U,
        }
    }

    #[inline]
    pub fn owns(self, row: usize, col: usize) -> bool {
        (row + col) % 2 == self.parity()
    }
}

/// Orthogonal neighbours of a dense cell, as staggered indices on one sublattice.
///
/// An entry is `None` when the neighbour falls off an open boundary, or when a
/// periodic wrap across an odd extent lands on the other colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Neighbours {
    /// col - 1
    pub left: Option<usize>,
    /// col + 1
    pub right: Option<usize>,
    /// row - 1
    pub up: Option<usize>,
    /// row + 1
    pub down: Option<usize>,
}

impl Neighbours {
    /// Neighbours in `[left, right, up, down]` order.
    pub fn as_array(&self) -> [Option<usize>; 4] {
        [self.left, self.right, self.up, self.down]
    }

    /// Iterate over the neighbours that exist.
    pub fn present(&self) -> impl Iterator<Item = usize> {
        self.as_array().into_iter().flatten()
    }

    pub fn count(&self) -> usize {
        self.present().count()
    }

    /// True when all four neighbours exist.
    pub fn is_complete(&self) -> bool {
        self.count() == 4
    }
}

/// One checkerboard sublattice of a shape, with precomputed index tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TopologyParams", into = "TopologyParams")]
pub struct Topology {
    shape: Shape,
    periodic: bool,
    sublattice: Sublattice,
    stag_to_dense: Vec<usize>,
    dense_to_stag: Vec<Option<usize>>,
}

/// Serialised form; the index tables are rebuilt on load.
#[derive(Serialize, Deserialize)]
struct TopologyParams {
    shape: Shape,
    periodic: bool,
    sublattice: Sublattice,
}

impl From<TopologyParams> for Topology {
    fn from(params: TopologyParams) -> Self {
        Topology::new(params.shape, params.periodic, params.sublattice)
    }
}

impl From<Topology> for TopologyParams {
    fn from(topology: Topology) -> Self {
        TopologyParams {
            shape: topology.shape,
            periodic: topology.periodic,
            sublattice: topology.sublattice,
        }
    }
}

impl Topology {
    pub fn new(shape: Shape, periodic: bool, sublattice: Sublattice) -> Self {
        let mut stag_to_dense = Vec::with_capacity(shape.cells() / 2);
        let mut dense_to_stag = vec![None; shape.cells()];

        for row in 0..shape.rows {
            for col in 0..shape.cols {
                if sublattice.owns(row, col) {
                    let dense = shape.dense_index(row, col);
                    dense_to_stag[dense] = Some(stag_to_dense.len());
                    stag_to_dense.push(dense);
                }
            }
        }

        Self {
            shape,
            periodic,
            sublattice,
            stag_to_dense,
            dense_to_stag,
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn is_periodic(&self) -> bool {
        self.periodic
    }

    pub fn sublattice(&self) -> Sublattice {
        self.sublattice
    }

    /// Number of cells on this sublattice (M * N / 2 for an even cell count).
    pub fn num(&self) -> usize {
        self.stag_to_dense.len()
    }

    /// Dense index of the given staggered index.
    #[inline]
    pub fn to_dense(&self, staggered: usize) -> usize {
        self.stag_to_dense[staggered]
    }

    /// Dense indices of every staggered index, in staggered order.
    pub fn to_dense_all(&self) -> &[usize] {
        &self.stag_to_dense
    }

    /// Staggered index of a dense cell, if the cell belongs to this sublattice.
    #[inline]
    pub fn to_staggered(&self, dense: usize) -> Option<usize> {
        self.dense_to_stag[dense]
    }

    pub fn contains(&self, dense: usize) -> bool {
        self.dense_to_stag[dense].is_some()
    }

    /// Dense indices not on this sublattice, ascending.
    pub fn complement(&self) -> Vec<usize> {
        (0..self.shape.cells())
            .filter(|&dense| !self.contains(dense))
            .collect()
    }

    /// The same shape and boundary on the other colour.
    pub fn partner(&self) -> Topology {
        Topology::new(self.shape, self.periodic, self.sublattice.partner())
    }

    fn step(&self, coord: usize, delta: isize, extent: usize) -> Option<usize> {
        let next = coord as isize + delta;
        if (0..extent as isize).contains(&next) {
            Some(next as usize)
        } else if self.periodic && extent > 0 {
            Some(next.rem_euclid(extent as isize) as usize)
        } else {
            None
        }
    }

    fn lookup(&self, row: Option<usize>, col: Option<usize>) -> Option<usize> {
        let dense = self.shape.dense_index(row?, col?);
        self.to_staggered(dense)
    }

    /// Orthogonal neighbours of `dense` that lie on this sublattice.
    pub fn neighbours(&self, dense: usize) -> Neighbours {
        let (row, col) = self.shape.row_col(dense);
        let (rows, cols) = (self.shape.rows, self.shape.cols);

        Neighbours {
            left: self.lookup(Some(row), self.step(col, -1, cols)),
            right: self.lookup(Some(row), self.step(col, 1, cols)),
            up: self.lookup(self.step(row, -1, rows), Some(col)),
            down: self.lookup(self.step(row, 1, rows), Some(col)),
        }
    }

    /// Neighbours for a batch of dense indices.
    pub fn neighbours_of(&self, dense: &[usize]) -> Vec<Neighbours> {
        dense.iter().map(|&d| self.neighbours(d)).collect()
    }

    /// Own-sublattice neighbours of every cell of the complementary sublattice,
    /// in the complement's staggered order.
    ///
    /// Entry `k` is the finite-difference stencil a stepper needs to update
    /// staggered cell `k` of the partner field from this field's values.
    pub fn all_neighbours(&self) -> Vec<Neighbours> {
        self.neighbours_of(&self.complement())
    }

    pub fn physical_extent(&self, dx: f64, dy: f64) -> (f64, f64) {
        self.shape.physical_extent(dx, dy)
    }
}
