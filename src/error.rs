//! Error types for the Dirac solver.

use std::path::PathBuf;

use thiserror::Error;

/// Low-level failure while reading or writing a result archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip container failure: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("payload codec failure: {0}")]
    Codec(#[from] bincode::Error),
}

/// Errors surfaced by the simulation driver and its IO layer.
#[derive(Debug, Error)]
pub enum DiracError {
    #[error("unable to load result archive {}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: ArchiveError,
    },

    #[error("unable to save result archive {}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: ArchiveError,
    },

    #[error("unable to create output directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to read config file {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("run aborted by progress callback at step {step}: {reason}")]
    Aborted { step: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, DiracError>;
