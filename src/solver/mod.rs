//! Solver module - time integration of spinors on the staggered lattice.

mod leapfrog;
mod traits;

pub use leapfrog::LeapfrogStepper;
pub use traits::{Progress, ProgressCallback, Spacing, Stepper};
