//! Stepper contract consumed by the simulation driver.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::spinor::Spinor;

/// Lattice spacing and time step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    pub dx: f64,
    pub dy: f64,
    pub dt: f64,
}

/// Reported to the progress callback after each advanced step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Steps completed so far (1-based).
    pub step: usize,
    pub total: usize,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.step as f64 / self.total as f64
        }
    }
}

/// Invoked synchronously once per step; an `Err` aborts the run.
pub type ProgressCallback<'a> = &'a mut dyn FnMut(Progress) -> Result<()>;

/// Advances a spinor through time.
///
/// Implementations interact with the fields only through their arithmetic and
/// `Spinor::neighbours`. Zero steps must return `initial` unchanged.
pub trait Stepper {
    fn solve(
        &self,
        initial: Spinor,
        steps: usize,
        spacing: Spacing,
        callback: Option<ProgressCallback<'_>>,
    ) -> Result<Spinor>;
}
