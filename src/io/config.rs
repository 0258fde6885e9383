//! YAML simulation configuration.
//!
//! Example:
//!
//! ```yaml
//! dt: 0.01
//! dx: 0.1
//! dy: 0.1
//! M: 20
//! N: 20
//! time steps: 100
//! boundary condition: false
//! is save: true
//! file name: gauss.zip
//! output directory: output
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DiracError, Result};
use crate::field::Interpolation;
use crate::grid::Shape;
use crate::solver::Spacing;

pub const DEFAULT_OUTPUT_DIR: &str = "output";

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub dt: f64,
    pub dx: f64,
    pub dy: f64,
    /// Rows (M).
    #[serde(rename = "M")]
    pub rows: usize,
    /// Columns (N).
    #[serde(rename = "N")]
    pub cols: usize,
    #[serde(rename = "time steps")]
    pub time_steps: usize,
    /// `true` for periodic, `false` for open boundaries.
    #[serde(rename = "boundary condition")]
    pub periodic: bool,
    #[serde(rename = "is save")]
    pub is_save: bool,
    #[serde(rename = "file name", default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(rename = "output directory", default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub mass: f64,
    #[serde(default)]
    pub interpolation: Interpolation,
}

impl SimulationConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: SimulationConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DiracError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let config: SimulationConfig = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let cells = self.rows * self.cols;
        if cells == 0 || cells % 2 != 0 {
            return Err(DiracError::InvalidConfig(format!(
                "M * N must be even and non-zero, got {} x {}",
                self.rows, self.cols
            )));
        }
        for (name, value) in [("dt", self.dt), ("dx", self.dx), ("dy", self.dy)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(DiracError::InvalidConfig(format!("{name} must be positive, got {value}")));
            }
        }
        if !self.mass.is_finite() {
            return Err(DiracError::InvalidConfig("mass must be finite".into()));
        }
        if self.is_save && self.file_name.as_deref().map_or(true, str::is_empty) {
            return Err(DiracError::InvalidConfig("`file name` is required when `is save` is set".into()));
        }
        Ok(())
    }

    pub fn shape(&self) -> Shape {
        Shape::new(self.rows, self.cols)
    }

    pub fn spacing(&self) -> Spacing {
        Spacing {
            dx: self.dx,
            dy: self.dy,
            dt: self.dt,
        }
    }

    /// `<output directory>/<file name>` when saving is enabled.
    pub fn output_path(&self) -> Option<PathBuf> {
        if !self.is_save {
            return None;
        }
        self.file_name.as_ref().map(|name| self.output_dir.join(name))
    }
}
