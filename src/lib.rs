//! Rust Dirac - a 2D Dirac equation solver on a staggered lattice.
//!
//! The two spinor components live on complementary checkerboard sublattices,
//! halving storage and giving a natural leapfrog finite-difference stencil.
//! This crate provides the staggered field representation, the two-component
//! spinor, a leapfrog stepper and the simulation driver.

pub mod error;
pub mod field;
pub mod grid;
pub mod io;
pub mod model;
pub mod solver;
pub mod spinor;

// Re-export commonly used types at crate root
pub use error::{ArchiveError, DiracError, Result};
pub use field::{Factor, Interpolation, MaskedUpdate, StaggeredField};
pub use grid::{Neighbours, Shape, Sublattice, Topology};
pub use io::{load_spinor, save_spinor, SimulationConfig};
pub use model::DiracModel;
pub use solver::{LeapfrogStepper, Progress, ProgressCallback, Spacing, Stepper};
pub use spinor::{Mesh, Spinor};
