//! Per-cell optional increments for masked field updates.

use std::ops::Neg;

use num_complex::Complex64;

use super::StaggeredField;

/// A staggered-order increment where `None` means "leave this cell untouched".
///
/// Steppers use it to apply partial updates (e.g. skipping open-boundary cells
/// whose stencil is incomplete) without erasing the cells they do not touch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MaskedUpdate(Vec<Option<Complex64>>);

impl MaskedUpdate {
    /// An update that touches nothing.
    pub fn untouched(len: usize) -> Self {
        Self(vec![None; len])
    }

    /// An update where every cell is present.
    pub fn from_values(values: Vec<Complex64>) -> Self {
        Self(values.into_iter().map(Some).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Complex64> {
        self.0.get(index).copied().flatten()
    }

    pub fn set(&mut self, index: usize, value: Option<Complex64>) {
        self.0[index] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<Complex64>> + '_ {
        self.0.iter().copied()
    }

    /// Number of present (non-masked) cells.
    pub fn present_count(&self) -> usize {
        self.0.iter().filter(|v| v.is_some()).count()
    }
}

impl From<Vec<Option<Complex64>>> for MaskedUpdate {
    fn from(values: Vec<Option<Complex64>>) -> Self {
        Self(values)
    }
}

impl From<&StaggeredField> for MaskedUpdate {
    fn from(field: &StaggeredField) -> Self {
        Self::from_values(field.data().to_vec())
    }
}

impl FromIterator<Option<Complex64>> for MaskedUpdate {
    fn from_iter<I: IntoIterator<Item = Option<Complex64>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Neg for &MaskedUpdate {
    type Output = MaskedUpdate;

    fn neg(self) -> MaskedUpdate {
        self.iter().map(|v| v.map(|z| -z)).collect()
    }
}

impl Neg for MaskedUpdate {
    type Output = MaskedUpdate;

    fn neg(self) -> MaskedUpdate {
        -&self
    }
}
