//! Value-semantics arithmetic on staggered fields.
//!
//! Every operation returns a new field on the same topology; operands are
//! never mutated.

use std::ops::{Add, Mul, Sub};

use num_complex::Complex64;

use super::{MaskedUpdate, StaggeredField};

/// Right-hand side of `StaggeredField::multiply`.
#[derive(Debug, Clone, Copy)]
pub enum Factor<'a> {
    Scalar(Complex64),
    Field(&'a StaggeredField),
    Values(&'a [Complex64]),
}

impl From<f64> for Factor<'_> {
    fn from(value: f64) -> Self {
        Factor::Scalar(Complex64::new(value, 0.0))
    }
}

impl From<Complex64> for Factor<'_> {
    fn from(value: Complex64) -> Self {
        Factor::Scalar(value)
    }
}

impl<'a> From<&'a StaggeredField> for Factor<'a> {
    fn from(field: &'a StaggeredField) -> Self {
        Factor::Field(field)
    }
}

impl<'a> From<&'a [Complex64]> for Factor<'a> {
    fn from(values: &'a [Complex64]) -> Self {
        Factor::Values(values)
    }
}

impl StaggeredField {
    /// Elementwise sum; masked (`None`) cells of `update` leave `self` unchanged.
    pub fn add(&self, update: &MaskedUpdate) -> StaggeredField {
        assert_eq!(update.len(), self.len(), "update length does not match field");
        let data: Vec<Complex64> = self
            .data
            .iter()
            .zip(update.iter())
            .map(|(&value, delta)| match delta {
                Some(delta) => value + delta,
                None => value,
            })
            .collect();
        self.with_data(data)
    }

    /// `add(-update)`: masked cells are skipped, not negated.
    pub fn subtract(&self, update: &MaskedUpdate) -> StaggeredField {
        self.add(&-update)
    }

    /// Elementwise product against a field on the same sublattice, a scalar, or
    /// a staggered-order slice.
    pub fn multiply<'a>(&self, factor: impl Into<Factor<'a>>) -> StaggeredField {
        let data: Vec<Complex64> = match factor.into() {
            Factor::Scalar(scalar) => self.data.iter().map(|&z| z * scalar).collect(),
            Factor::Field(other) => {
                assert_eq!(other.topology(), self.topology(), "fields live on different topologies");
                self.data.iter().zip(&other.data).map(|(&a, &b)| a * b).collect()
            }
            Factor::Values(values) => {
                assert_eq!(values.len(), self.len(), "factor length does not match field");
                self.data.iter().zip(values).map(|(&a, &b)| a * b).collect()
            }
        };
        self.with_data(data)
    }
}

impl Add<&MaskedUpdate> for &StaggeredField {
    type Output = StaggeredField;

    fn add(self, rhs: &MaskedUpdate) -> StaggeredField {
        StaggeredField::add(self, rhs)
    }
}

impl Add<&StaggeredField> for &StaggeredField {
    type Output = StaggeredField;

    fn add(self, rhs: &StaggeredField) -> StaggeredField {
        StaggeredField::add(self, &MaskedUpdate::from(rhs))
    }
}

impl Sub<&MaskedUpdate> for &StaggeredField {
    type Output = StaggeredField;

    fn sub(self, rhs: &MaskedUpdate) -> StaggeredField {
        self.subtract(rhs)
    }
}

impl Sub<&StaggeredField> for &StaggeredField {
    type Output = StaggeredField;

    fn sub(self, rhs: &StaggeredField) -> StaggeredField {
        self.subtract(&MaskedUpdate::from(rhs))
    }
}

impl Mul<&StaggeredField> for &StaggeredField {
    type Output = StaggeredField;

    fn mul(self, rhs: &StaggeredField) -> StaggeredField {
        self.multiply(rhs)
    }
}

impl Mul<f64> for &StaggeredField {
    type Output = StaggeredField;

    fn mul(self, rhs: f64) -> StaggeredField {
        self.multiply(rhs)
    }
}

impl Mul<Complex64> for &StaggeredField {
    type Output = StaggeredField;

    fn mul(self, rhs: Complex64) -> StaggeredField {
        self.multiply(rhs)
    }
}

impl Mul<&[Complex64]> for &StaggeredField {
    type Output = StaggeredField;

    fn mul(self, rhs: &[Complex64]) -> StaggeredField {
        self.multiply(rhs)
    }
}

impl Mul<&StaggeredField> for f64 {
    type Output = StaggeredField;

    fn mul(self, rhs: &StaggeredField) -> StaggeredField {
        rhs.multiply(self)
    }
}

impl Mul<&StaggeredField> for Complex64 {
    type Output = StaggeredField;

    fn mul(self, rhs: &StaggeredField) -> StaggeredField {
        rhs.multiply(self)
    }
}
