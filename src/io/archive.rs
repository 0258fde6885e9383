//! Compressed result archive: a deflated zip holding one bincode-encoded spinor.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::ArchiveError;
use crate::spinor::Spinor;

/// Name of the single entry inside the archive.
pub const ARCHIVE_ENTRY: &str = "spinor.bin";

pub fn save_spinor(path: &Path, spinor: &Spinor) -> Result<(), ArchiveError> {
    let bytes = bincode::serialize(spinor)?;

    let file = File::create(path)?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    zip.start_file(ARCHIVE_ENTRY, options)?;
    zip.write_all(&bytes)?;
    zip.finish()?.flush()?;
    Ok(())
}

pub fn load_spinor(path: &Path) -> Result<Spinor, ArchiveError> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;
    let mut entry = archive.by_name(ARCHIVE_ENTRY)?;
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes)?;
    Ok(bincode::deserialize(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Interpolation;
    use crate::grid::{Shape, Sublattice, Topology};
    use nalgebra::DMatrix;
    use num_complex::Complex64;
    use serde::Serialize;
    use tempfile::tempdir;

    /// Same wire layout as `StaggeredField`, without its checks.
    #[derive(Serialize)]
    struct LooseField {
        data: Vec<Complex64>,
        topology: Topology,
        interpolation: Interpolation,
    }

    #[derive(Serialize)]
    struct LooseSpinor {
        u: LooseField,
        v: LooseField,
    }

    fn loose_field(len: usize, sublattice: Sublattice, interpolation: Interpolation) -> LooseField {
        LooseField {
            data: vec![Complex64::new(1.0, 0.0); len],
            topology: Topology::new(Shape::new(4, 6), false, sublattice),
            interpolation,
        }
    }

    fn write_entry(path: &Path, bytes: &[u8]) {
        let mut zip = ZipWriter::new(File::create(path).unwrap());
        zip.start_file(ARCHIVE_ENTRY, FileOptions::default()).unwrap();
        zip.write_all(bytes).unwrap();
        zip.finish().unwrap();
    }

    fn sample() -> Spinor {
        let u = DMatrix::from_fn(4, 6, |i, j| Complex64::new(i as f64 * 0.5, -(j as f64)));
        let v = DMatrix::from_fn(4, 6, |i, j| Complex64::new((i + j) as f64, 1.0));
        Spinor::new(&u, &v, true).with_interpolation(Interpolation::NeighbourCount)
    }

    #[test]
    fn test_save_then_load_is_exact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("result.zip");
        let spinor = sample();

        save_spinor(&path, &spinor).unwrap();
        let restored = load_spinor(&path).unwrap();
        assert_eq!(restored, spinor);
        assert_eq!(restored.density(), spinor.density());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_spinor(&dir.path().join("absent.zip")).unwrap_err();
        assert!(matches!(err, ArchiveError::Io(_)));
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corrupt.zip");
        std::fs::write(&path, b"definitely not a zip archive").unwrap();
        let err = load_spinor(&path).unwrap_err();
        assert!(matches!(err, ArchiveError::Zip(_)));
    }

    #[test]
    fn test_malformed_payload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("payload.zip");
        write_entry(&path, &[1, 2, 3]);

        let err = load_spinor(&path).unwrap_err();
        assert!(matches!(err, ArchiveError::Codec(_)));
    }

    #[test]
    fn test_wrong_data_length_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.zip");
        // A 4 x 6 lattice holds 12 cells per sublattice.
        let spinor = LooseSpinor {
            u: loose_field(3, Sublattice::U, Interpolation::Fixed),
            v: loose_field(12, Sublattice::V, Interpolation::Fixed),
        };
        write_entry(&path, &bincode::serialize(&spinor).unwrap());

        let err = load_spinor(&path).unwrap_err();
        assert!(matches!(err, ArchiveError::Codec(_)));
        assert!(err.to_string().contains("staggered data length"));
    }

    #[test]
    fn test_inconsistent_components_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mixed.zip");
        let spinor = LooseSpinor {
            u: loose_field(12, Sublattice::U, Interpolation::Fixed),
            v: loose_field(12, Sublattice::V, Interpolation::NeighbourCount),
        };
        write_entry(&path, &bincode::serialize(&spinor).unwrap());
        assert!(matches!(load_spinor(&path).unwrap_err(), ArchiveError::Codec(_)));

        let swapped = LooseSpinor {
            u: loose_field(12, Sublattice::V, Interpolation::Fixed),
            v: loose_field(12, Sublattice::U, Interpolation::Fixed),
        };
        write_entry(&path, &bincode::serialize(&swapped).unwrap());
        assert!(matches!(load_spinor(&path).unwrap_err(), ArchiveError::Codec(_)));
    }
}
