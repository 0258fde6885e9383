//! Field module - complex amplitudes stored on one checkerboard sublattice.

mod masked;
mod ops;
mod staggered;

pub use masked::MaskedUpdate;
pub use ops::Factor;
pub use staggered::{Interpolation, StaggeredField};
