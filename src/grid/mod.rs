//! Grid module - checkerboard topology underlying the staggered fields.

mod topology;

pub use topology::{Neighbours, Shape, Sublattice, Topology};
