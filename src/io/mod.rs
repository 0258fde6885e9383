//! IO module - configuration and result archive handling.

mod archive;
mod config;

pub use archive::{load_spinor, save_spinor, ARCHIVE_ENTRY};
pub use config::{SimulationConfig, DEFAULT_OUTPUT_DIR};
