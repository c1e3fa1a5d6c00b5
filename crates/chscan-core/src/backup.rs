//! Pre-run backup of the input manifest.
//!
//! The backup is taken once, before any row is processed. When it
//! cannot be taken, the whole run stops: extraction must never proceed
//! against un-backed-up source data.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::BackupError;

/// Byte-copy `src` to `dst` and verify the copied size against the
/// source.
pub fn backup(src: &Path, dst: &Path) -> Result<(), BackupError> {
    let copied = fs::copy(src, dst).map_err(|source| BackupError::Copy {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        source,
    })?;

    let expected = fs::metadata(src)
        .map_err(|source| BackupError::Copy {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
            source,
        })?
        .len();

    if copied != expected {
        return Err(BackupError::SizeMismatch {
            dst: dst.to_path_buf(),
            expected,
            actual: copied,
        });
    }

    info!(backup = %dst.display(), "backup created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_backup_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("input.csv");
        let dst = dir.path().join("input_backup.csv");
        std::fs::write(&src, "File Path\n/data/a.html\n").unwrap();

        backup(&src, &dst).unwrap();

        assert_eq!(
            std::fs::read(&src).unwrap(),
            std::fs::read(&dst).unwrap()
        );
    }

    #[test]
    fn test_missing_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("missing.csv");
        let dst = dir.path().join("backup.csv");

        assert!(matches!(
            backup(&src, &dst),
            Err(BackupError::Copy { .. })
        ));
    }

    #[test]
    fn test_unwritable_destination_fails() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("input.csv");
        std::fs::write(&src, "data").unwrap();
        let dst = dir.path().join("no-such-dir").join("backup.csv");

        assert!(matches!(
            backup(&src, &dst),
            Err(BackupError::Copy { .. })
        ));
    }
}
