//! Staggered field storage and dense reconstruction.
//!
//! A `StaggeredField` keeps only the cells of its own sublattice. The other
//! half of the grid is recovered on demand by averaging the orthogonal
//! neighbours, which all lie on the stored sublattice.

use std::sync::Arc;

use nalgebra::DMatrix;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::grid::{Neighbours, Shape, Sublattice, Topology};

/// Divisor rule used when reconstructing unstored cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interpolation {
    /// Always divide the neighbour sum by 4, even where an open boundary
    /// leaves fewer neighbours.
    #[default]
    #[serde(rename = "fixed")]
    Fixed,
    /// Divide by the number of neighbours actually present.
    #[serde(rename = "neighbour count")]
    NeighbourCount,
}

impl Interpolation {
    fn divisor(self, neighbours: &Neighbours) -> f64 {
        match self {
            Interpolation::Fixed => 4.0,
            Interpolation::NeighbourCount => neighbours.count() as f64,
        }
    }
}

/// Complex amplitudes on one sublattice, in staggered order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawField")]
pub struct StaggeredField {
    pub(super) data: Vec<Complex64>,
    pub(super) topology: Arc<Topology>,
    #[serde(default)]
    pub(super) interpolation: Interpolation,
}

/// Decoded form, checked before it becomes a `StaggeredField`.
#[derive(Deserialize)]
struct RawField {
    data: Vec<Complex64>,
    topology: Arc<Topology>,
    #[serde(default)]
    interpolation: Interpolation,
}

impl TryFrom<RawField> for StaggeredField {
    type Error = String;

    fn try_from(raw: RawField) -> Result<Self, Self::Error> {
        if raw.data.len() != raw.topology.num() {
            return Err(format!(
                "staggered data length {} does not match the {:?} sublattice size {}",
                raw.data.len(),
                raw.topology.sublattice(),
                raw.topology.num()
            ));
        }
        Ok(Self {
            data: raw.data,
            topology: raw.topology,
            interpolation: raw.interpolation,
        })
    }
}

impl StaggeredField {
    /// Wrap staggered data; `data.len()` must equal the sublattice size.
    pub fn new(data: Vec<Complex64>, shape: Shape, periodic: bool, sublattice: Sublattice) -> Self {
        Self::on_topology(data, Arc::new(Topology::new(shape, periodic, sublattice)))
    }

    pub(crate) fn on_topology(data: Vec<Complex64>, topology: Arc<Topology>) -> Self {
        assert_eq!(
            data.len(),
            topology.num(),
            "staggered data length does not match the {:?} sublattice",
            topology.sublattice()
        );
        Self {
            data,
            topology,
            interpolation: Interpolation::default(),
        }
    }

    /// Build a field with the same topology and interpolation but new data.
    pub(crate) fn with_data(&self, data: Vec<Complex64>) -> Self {
        debug_assert_eq!(data.len(), self.data.len());
        Self {
            data,
            topology: Arc::clone(&self.topology),
            interpolation: self.interpolation,
        }
    }

    /// Keep the cells of `sublattice` from a dense M x N array; the rest is dropped.
    pub fn from_dense(dense: &DMatrix<Complex64>, periodic: bool, sublattice: Sublattice) -> Self {
        let shape = Shape::new(dense.nrows(), dense.ncols());
        let topology = Topology::new(shape, periodic, sublattice);
        let data = topology
            .to_dense_all()
            .iter()
            .map(|&d| {
                let (row, col) = shape.row_col(d);
                dense[(row, col)]
            })
            .collect();
        Self::on_topology(data, Arc::new(topology))
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn data(&self) -> &[Complex64] {
        &self.data
    }

    pub fn into_data(self) -> Vec<Complex64> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn shape(&self) -> Shape {
        self.topology.shape()
    }

    pub fn is_periodic(&self) -> bool {
        self.topology.is_periodic()
    }

    pub fn sublattice(&self) -> Sublattice {
        self.topology.sublattice()
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Sum of |psi|^2 over the stored cells.
    pub fn norm_squared(&self) -> f64 {
        self.data.iter().map(|z| z.norm_sqr()).sum()
    }

    /// Reconstruct values at dense cells from their same-sublattice neighbours.
    ///
    /// Real and imaginary parts are summed separately and divided according to
    /// the field's `Interpolation` rule. A cell with no neighbours yields zero.
    pub fn interpolate(&self, dense: &[usize]) -> Vec<Complex64> {
        dense
            .iter()
            .map(|&d| {
                let neighbours = self.topology.neighbours(d);
                let divisor = self.interpolation.divisor(&neighbours);
                if divisor == 0.0 {
                    return Complex64::new(0.0, 0.0);
                }
                let (re, im) = neighbours
                    .present()
                    .map(|k| self.data[k])
                    .fold((0.0, 0.0), |(re, im), z| (re + z.re, im + z.im));
                Complex64::new(re / divisor, im / divisor)
            })
            .collect()
    }

    /// The full M x N array: stored cells verbatim, the rest interpolated.
    pub fn to_dense(&self) -> DMatrix<Complex64> {
        let shape = self.shape();
        let mut full = DMatrix::from_element(shape.rows, shape.cols, Complex64::new(0.0, 0.0));

        for (&d, &value) in self.topology.to_dense_all().iter().zip(&self.data) {
            full[shape.row_col(d)] = value;
        }

        let missing = self.topology.complement();
        for (&d, value) in missing.iter().zip(self.interpolate(&missing)) {
            full[shape.row_col(d)] = value;
        }

        full
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand_distr::{Distribution, Normal};

    fn random_dense(rows: usize, cols: usize) -> DMatrix<Complex64> {
        let mut rng = rand::thread_rng();
        let dist = Normal::new(0.0, 1.0).unwrap();
        DMatrix::from_fn(rows, cols, |_, _| {
            Complex64::new(dist.sample(&mut rng), dist.sample(&mut rng))
        })
    }

    #[test]
    fn test_from_dense_keeps_own_cells() {
        let dense = random_dense(4, 6);
        let field = StaggeredField::from_dense(&dense, false, Sublattice::V);
        assert_eq!(field.len(), 12);
        for (k, &value) in field.data().iter().enumerate() {
            let (row, col) = field.shape().row_col(field.topology().to_dense(k));
            assert_eq!((row + col) % 2, 1);
            assert_eq!(value, dense[(row, col)]);
        }
    }

    #[test]
    fn test_to_dense_reconstruction() {
        for &periodic in &[false, true] {
            let dense = random_dense(6, 4);
            let field = StaggeredField::from_dense(&dense, periodic, Sublattice::U);
            let full = field.to_dense();
            let shape = field.shape();

            for row in 0..shape.rows {
                for col in 0..shape.cols {
                    if Sublattice::U.owns(row, col) {
                        assert_eq!(full[(row, col)], dense[(row, col)]);
                        continue;
                    }
                    let neighbours = field.topology().neighbours(shape.dense_index(row, col));
                    let sum: Complex64 = neighbours
                        .present()
                        .map(|k| dense[shape.row_col(field.topology().to_dense(k))])
                        .sum();
                    assert_relative_eq!(full[(row, col)].re, sum.re / 4.0, epsilon = 1e-12);
                    assert_relative_eq!(full[(row, col)].im, sum.im / 4.0, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_constant_field_interior_is_exact() {
        let dense = DMatrix::from_element(4, 4, Complex64::new(2.0, -1.0));
        let field = StaggeredField::from_dense(&dense, false, Sublattice::U);
        let full = field.to_dense();
        assert_eq!(full[(1, 2)], Complex64::new(2.0, -1.0));
        // Top edge cell has three neighbours; the fixed rule still divides by 4.
        assert_relative_eq!(full[(0, 1)].re, 1.5, epsilon = 1e-12);
        assert_relative_eq!(full[(0, 1)].im, -0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_interpolation_rules_agree_when_periodic() {
        let dense = random_dense(6, 8);
        let fixed = StaggeredField::from_dense(&dense, true, Sublattice::V);
        let counted = fixed.clone().with_interpolation(Interpolation::NeighbourCount);
        let (a, b) = (fixed.to_dense(), counted.to_dense());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_relative_eq!(x.re, y.re, epsilon = 1e-12);
            assert_relative_eq!(x.im, y.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_interpolation_rules_differ_on_open_edges() {
        let dense = DMatrix::from_element(4, 4, Complex64::new(1.0, 1.0));
        let counted = StaggeredField::from_dense(&dense, false, Sublattice::U)
            .with_interpolation(Interpolation::NeighbourCount);
        let full = counted.to_dense();
        for value in full.iter() {
            assert_relative_eq!(value.re, 1.0, epsilon = 1e-12);
            assert_relative_eq!(value.im, 1.0, epsilon = 1e-12);
        }

        let fixed = counted.with_interpolation(Interpolation::Fixed).to_dense();
        assert_relative_eq!(fixed[(3, 0)].re, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        let field = StaggeredField::new(vec![Complex64::new(1.0, 0.0); 2], Shape::new(2, 2), true, Sublattice::V);
        let bytes = bincode::serialize(&field).unwrap();
        assert_eq!(bincode::deserialize::<StaggeredField>(&bytes).unwrap(), field);

        let short = StaggeredField {
            data: vec![Complex64::new(1.0, 0.0)],
            ..field
        };
        let bytes = bincode::serialize(&short).unwrap();
        let err = bincode::deserialize::<StaggeredField>(&bytes).unwrap_err();
        assert!(err.to_string().contains("staggered data length"));
    }

    #[test]
    #[should_panic(expected = "staggered data length")]
    fn test_wrong_length_panics() {
        let _ = StaggeredField::new(vec![Complex64::new(0.0, 0.0); 3], Shape::new(2, 2), false, Sublattice::U);
    }
}
