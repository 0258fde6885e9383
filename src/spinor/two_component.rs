//! Two-component spinor: U on the even checkerboard, V on the odd one.

use nalgebra::DMatrix;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use super::Mesh;
use crate::field::{Interpolation, StaggeredField};
use crate::grid::{Neighbours, Shape, Sublattice};

/// The (U, V) Dirac wavefunction on a staggered lattice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSpinor")]
pub struct Spinor {
    u: StaggeredField,
    v: StaggeredField,
}

#[derive(Deserialize)]
struct RawSpinor {
    u: StaggeredField,
    v: StaggeredField,
}

impl TryFrom<RawSpinor> for Spinor {
    type Error = String;

    fn try_from(raw: RawSpinor) -> Result<Self, Self::Error> {
        check_pair(&raw.u, &raw.v)?;
        Ok(Self { u: raw.u, v: raw.v })
    }
}

/// Both fields must describe one lattice: U and V halves of the same even
/// shape, with one boundary and one interpolation rule.
fn check_pair(u: &StaggeredField, v: &StaggeredField) -> Result<(), String> {
    if u.sublattice() != Sublattice::U {
        return Err("first component must live on U".into());
    }
    if v.sublattice() != Sublattice::V {
        return Err("second component must live on V".into());
    }
    if u.shape() != v.shape() {
        return Err(format!("u and v must share one shape, got {:?} and {:?}", u.shape(), v.shape()));
    }
    if u.shape().cells() % 2 != 0 {
        return Err("lattice must have an even number of cells".into());
    }
    if u.is_periodic() != v.is_periodic() {
        return Err("u and v must share one boundary".into());
    }
    if u.interpolation() != v.interpolation() {
        return Err(format!(
            "u and v must share one interpolation rule, got {:?} and {:?}",
            u.interpolation(),
            v.interpolation()
        ));
    }
    Ok(())
}

impl Spinor {
    /// Split two dense M x N arrays onto the U and V sublattices.
    ///
    /// Panics if the shapes differ or the cell count is odd.
    pub fn new(u: &DMatrix<Complex64>, v: &DMatrix<Complex64>, periodic: bool) -> Self {
        assert_eq!(u.shape(), v.shape(), "u and v must share one shape");
        assert!(u.len() % 2 == 0, "lattice must have an even number of cells");

        Self {
            u: StaggeredField::from_dense(u, periodic, Sublattice::U),
            v: StaggeredField::from_dense(v, periodic, Sublattice::V),
        }
    }

    /// Like `new` but from real-valued amplitudes.
    pub fn from_real(u: &DMatrix<f64>, v: &DMatrix<f64>, periodic: bool) -> Self {
        let to_complex = |m: &DMatrix<f64>| m.map(|re| Complex64::new(re, 0.0));
        Self::new(&to_complex(u), &to_complex(v), periodic)
    }

    /// Pair existing fields, e.g. the output of a time step.
    ///
    /// Panics unless both fields describe the same lattice with one
    /// interpolation rule.
    pub fn from_components(u: StaggeredField, v: StaggeredField) -> Self {
        if let Err(reason) = check_pair(&u, &v) {
            panic!("{reason}");
        }
        Self { u, v }
    }

    pub fn with_interpolation(self, interpolation: Interpolation) -> Self {
        Self {
            u: self.u.with_interpolation(interpolation),
            v: self.v.with_interpolation(interpolation),
        }
    }

    pub fn u(&self) -> &StaggeredField {
        &self.u
    }

    pub fn v(&self) -> &StaggeredField {
        &self.v
    }

    pub fn into_components(self) -> (StaggeredField, StaggeredField) {
        (self.u, self.v)
    }

    pub fn shape(&self) -> Shape {
        self.u.shape()
    }

    pub fn is_periodic(&self) -> bool {
        self.u.is_periodic()
    }

    pub fn interpolation(&self) -> Interpolation {
        self.u.interpolation()
    }

    /// Per-cell probability amplitude sqrt(|u|^2 + |v|^2) on the dense grid.
    pub fn density(&self) -> DMatrix<f64> {
        let u = self.u.to_dense();
        let v = self.v.to_dense();
        u.zip_map(&v, |a, b| (a * a.conj() + b * b.conj()).re.sqrt())
    }

    /// Sum of |u|^2 + |v|^2 over the stored cells, times the cell area.
    pub fn total_probability(&self, dx: f64, dy: f64) -> f64 {
        (self.u.norm_squared() + self.v.norm_squared()) * dx * dy
    }

    pub fn coordinate_mesh(shape: Shape, dx: f64, dy: f64) -> Mesh {
        Mesh::new(shape, dx, dy)
    }

    /// Stencils for a stepper: `.0[k]` are U's neighbours of V cell `k`,
    /// `.1[k]` are V's neighbours of U cell `k`.
    pub fn neighbours(&self) -> (Vec<Neighbours>, Vec<Neighbours>) {
        (self.u.topology().all_neighbours(), self.v.topology().all_neighbours())
    }
}
