//! The Dirac simulation driver.
//!
//! Builds a Gaussian particle at rest from a `SimulationConfig`, hands it to a
//! `Stepper`, and optionally persists the final spinor.

use std::fs;
use std::path::{Path, PathBuf};

use nalgebra::DMatrix;

use crate::error::{DiracError, Result};
use crate::io::{load_spinor, save_spinor, SimulationConfig};
use crate::solver::{LeapfrogStepper, ProgressCallback, Stepper};
use crate::spinor::Spinor;

/// Width parameter of the initial Gaussian, `exp(-(x^2 + y^2) / GAUSS_WIDTH)`.
const GAUSS_WIDTH: f64 = 5.0;

pub struct DiracModel<S: Stepper = LeapfrogStepper> {
    config: SimulationConfig,
    stepper: S,
}

impl DiracModel<LeapfrogStepper> {
    /// Driver with the default leapfrog stepper using the configured mass.
    pub fn new(config: SimulationConfig) -> Self {
        let stepper = LeapfrogStepper::new(config.mass);
        Self { config, stepper }
    }

    /// Read a previously persisted result.
    pub fn load(path: impl AsRef<Path>) -> Result<Spinor> {
        let path = path.as_ref();
        load_spinor(path).map_err(|source| DiracError::Load {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl<S: Stepper> DiracModel<S> {
    pub fn with_stepper(config: SimulationConfig, stepper: S) -> Self {
        Self { config, stepper }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// U is the real Gaussian `exp(-(x^2 + y^2) / 5)` centred on the origin, V is zero.
    pub fn initial_spinor(&self) -> Spinor {
        let shape = self.config.shape();
        let mesh = Spinor::coordinate_mesh(shape, self.config.dx, self.config.dy);
        let gauss = mesh.map(|x, y| (-(x * x + y * y) / GAUSS_WIDTH).exp());
        let zeros = DMatrix::zeros(shape.rows, shape.cols);

        Spinor::from_real(&gauss, &zeros, self.config.periodic).with_interpolation(self.config.interpolation)
    }

    /// Perform one complete simulation and return the final spinor.
    pub fn run(&self, callback: Option<ProgressCallback<'_>>) -> Result<Spinor> {
        let spacing = self.config.spacing();
        let steps = self.config.time_steps;
        let initial = self.initial_spinor();

        log::info!(
            "running {}x{} lattice for {} steps (dx={}, dy={}, dt={}, periodic={})",
            self.config.rows,
            self.config.cols,
            steps,
            spacing.dx,
            spacing.dy,
            spacing.dt,
            self.config.periodic
        );
        log::debug!(
            "initial total probability {:.6}",
            initial.total_probability(spacing.dx, spacing.dy)
        );

        let result = self.stepper.solve(initial, steps, spacing, callback)?;

        log::info!(
            "finished; total probability {:.6}",
            result.total_probability(spacing.dx, spacing.dy)
        );

        self.persist(&result)?;
        Ok(result)
    }

    /// Write `result` to `<output directory>/<file name>` if saving is enabled.
    pub fn persist(&self, result: &Spinor) -> Result<Option<PathBuf>> {
        let Some(path) = self.config.output_path() else {
            return Ok(None);
        };

        let dir = &self.config.output_dir;
        fs::create_dir_all(dir).map_err(|source| DiracError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        save_spinor(&path, result).map_err(|source| DiracError::Save {
            path: path.clone(),
            source,
        })?;
        log::info!("saved result to {}", path.display());

        Ok(Some(path))
    }
}
