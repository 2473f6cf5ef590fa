//! Artifact file output.

use std::path::{Path, PathBuf};

use super::ArtifactKind;
use crate::error::{GenError, Result};

/// Path of an artifact under the output root.
pub fn artifact_path(output_dir: &Path, kind: ArtifactKind, stem: &str) -> PathBuf {
    output_dir.join(kind.subdir()).join(kind.file_name(stem))
}

/// Write `content` to `path`, creating parent directories.
///
/// The content goes to a sibling `.tmp` file that is then renamed over the
/// target. The temp file is removed when either step fails.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| GenError::write(parent, e))?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    if let Err(e) = std::fs::write(&temp_path, content) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(GenError::write(path, e));
    }
    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(GenError::write(path, e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_artifact_paths() {
        let root = Path::new("out");
        assert_eq!(
            artifact_path(root, ArtifactKind::Record, "order_items"),
            Path::new("out/model/order_items.go")
        );
        assert_eq!(
            artifact_path(root, ArtifactKind::Dao, "order_items"),
            Path::new("out/dao/order_items_dao.go")
        );
        assert_eq!(
            artifact_path(root, ArtifactKind::Mapper, "order_items"),
            Path::new("out/mapper/order_items_mapper.xml")
        );
        assert_eq!(
            artifact_path(root, ArtifactKind::Sql, "order_items"),
            Path::new("out/sql/order_items.sql")
        );
    }

    #[test]
    fn test_write_creates_directories_and_replaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model").join("users.go");

        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("users.go")]);
    }

    #[test]
    fn test_write_failure_is_a_write_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("model");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = write_atomic(&blocker.join("users.go"), "x").unwrap_err();
        assert!(matches!(err, GenError::Write { .. }));
        assert_eq!(err.exit_code(), 4);
    }
}
