//! Staggered leapfrog integrator for the 2D Dirac equation (hbar = c = 1).
//!
//!   du/dt = -(d/dx - i d/dy) v - i m u
//!   dv/dt = -(d/dx + i d/dy) u + i m v
//!
//! U and V live on complementary checkerboards, so each component's spatial
//! derivative is a central difference over the other component's four
//! neighbours. U is advanced first, then V from the updated U. The mass term
//! is applied as an exact phase, split into two half steps around the kinetic
//! update.

use num_complex::Complex64;

use super::traits::{Progress, ProgressCallback, Spacing, Stepper};
use crate::error::Result;
use crate::field::{MaskedUpdate, StaggeredField};
use crate::grid::Neighbours;
use crate::spinor::Spinor;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LeapfrogStepper {
    pub mass: f64,
}

impl LeapfrogStepper {
    pub fn new(mass: f64) -> Self {
        Self { mass }
    }

    /// Increment `-dt (d/dx + i*chirality d/dy) source` at each target cell.
    ///
    /// Cells with an incomplete stencil (open boundary) are masked out and
    /// keep their current value.
    fn kinetic_increment(
        stencils: &[Neighbours],
        source: &StaggeredField,
        spacing: Spacing,
        chirality: f64,
    ) -> MaskedUpdate {
        let values = source.data();
        let i = Complex64::i();
        stencils
            .iter()
            .map(|n| {
                let (left, right, up, down) = (n.left?, n.right?, n.up?, n.down?);
                let d_x = (values[right] - values[left]) / (2.0 * spacing.dx);
                let d_y = (values[down] - values[up]) / (2.0 * spacing.dy);
                Some(-(d_x + i * chirality * d_y) * spacing.dt)
            })
            .collect()
    }

    fn mass_half_step(&self, u: StaggeredField, v: StaggeredField, dt: f64) -> (StaggeredField, StaggeredField) {
        if self.mass == 0.0 {
            return (u, v);
        }
        let phase = Complex64::from_polar(1.0, -0.5 * self.mass * dt);
        (&u * phase, &v * phase.conj())
    }

    /// One full step. `n_u[k]` / `n_v[k]` are the U / V neighbours of V / U cell `k`.
    fn step(&self, spinor: Spinor, n_u: &[Neighbours], n_v: &[Neighbours], spacing: Spacing) -> Spinor {
        let (u, v) = spinor.into_components();
        let (u, v) = self.mass_half_step(u, v, spacing.dt);

        let u = u.add(&Self::kinetic_increment(n_v, &v, spacing, -1.0));
        let v = v.add(&Self::kinetic_increment(n_u, &u, spacing, 1.0));

        let (u, v) = self.mass_half_step(u, v, spacing.dt);
        Spinor::from_components(u, v)
    }
}

impl Stepper for LeapfrogStepper {
    fn solve(
        &self,
        initial: Spinor,
        steps: usize,
        spacing: Spacing,
        mut callback: Option<ProgressCallback<'_>>,
    ) -> Result<Spinor> {
        let (n_u, n_v) = initial.neighbours();
        let mut state = initial;

        for step in 1..=steps {
            state = self.step(state, &n_u, &n_v, spacing);
            log::trace!("leapfrog step {}/{}", step, steps);

            if let Some(callback) = callback.as_deref_mut() {
                callback(Progress { step, total: steps })?;
            }
        }

        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiracError;
    use crate::spinor::Spinor;
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;

    fn gaussian(rows: usize, cols: usize, dx: f64, periodic: bool) -> Spinor {
        let mesh = Spinor::coordinate_mesh(crate::grid::Shape::new(rows, cols), dx, dx);
        let u = mesh.map(|x, y| (-(x * x + y * y) / 5.0).exp());
        Spinor::from_real(&u, &DMatrix::zeros(rows, cols), periodic)
    }

    const SPACING: Spacing = Spacing { dx: 0.25, dy: 0.25, dt: 0.025 };

    #[test]
    fn test_zero_steps_returns_input() {
        let initial = gaussian(8, 8, 0.25, false);
        let result = LeapfrogStepper::new(1.0)
            .solve(initial.clone(), 0, SPACING, None)
            .unwrap();
        assert_eq!(result, initial);
    }

    #[test]
    fn test_probability_approximately_conserved() {
        let initial = gaussian(40, 40, 0.25, true);
        let before = initial.total_probability(0.25, 0.25);
        let result = LeapfrogStepper::new(0.5)
            .solve(initial, 10, SPACING, None)
            .unwrap();
        let after = result.total_probability(0.25, 0.25);
        assert_relative_eq!(after, before, max_relative = 1e-2);
        assert!(result.v().norm_squared() > 0.0);
    }

    #[test]
    fn test_open_boundary_cells_are_left_untouched() {
        let initial = gaussian(10, 10, 0.25, false);
        let result = LeapfrogStepper::default()
            .solve(initial.clone(), 3, SPACING, None)
            .unwrap();
        // Staggered index 0 of U is the top-left corner.
        assert_eq!(result.u().data()[0], initial.u().data()[0]);
        assert_eq!(result.v().data()[0], initial.v().data()[0]);
    }

    #[test]
    fn test_callback_invoked_once_per_step() {
        let mut seen = Vec::new();
        let mut record = |p: Progress| -> Result<()> {
            seen.push(p.step);
            Ok(())
        };
        LeapfrogStepper::default()
            .solve(gaussian(6, 6, 0.25, true), 4, SPACING, Some(&mut record))
            .unwrap();
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_callback_error_aborts() {
        let mut calls = 0;
        let mut stop = |p: Progress| -> Result<()> {
            calls += 1;
            if p.step == 2 {
                Err(DiracError::Aborted { step: p.step, reason: "stop".into() })
            } else {
                Ok(())
            }
        };
        let result = LeapfrogStepper::default().solve(gaussian(6, 6, 0.25, true), 5, SPACING, Some(&mut stop));
        assert!(matches!(result, Err(DiracError::Aborted { step: 2, .. })));
        assert_eq!(calls, 2);
    }
}
