//! Spinor module - the two-component (U, V) Dirac wavefunction.

mod mesh;
mod two_component;

pub use mesh::Mesh;
pub use two_component::Spinor;
