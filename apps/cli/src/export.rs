//! Writing rendered receipts to disk.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::render::Snapshot;

/// Destination for exported receipts.
pub trait Exporter: Send + Sync {
    /// Writes `snapshot` as `file_name` and returns where it went.
    fn export(&self, snapshot: &Snapshot, file_name: &str) -> AppResult<PathBuf>;
}

/// Writes exports into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct FileExporter {
    output_dir: PathBuf,
}

impl FileExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        FileExporter {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl Exporter for FileExporter {
    fn export(&self, snapshot: &Snapshot, file_name: &str) -> AppResult<PathBuf> {
        // Names come from export_filename; refuse anything that could escape the dir
        if file_name.is_empty() || file_name.contains(['/', '\\']) || file_name.starts_with('.') {
            return Err(AppError::ExportFailed(format!(
                "Refusing to write '{}'",
                file_name
            )));
        }

        fs::create_dir_all(&self.output_dir).map_err(|e| {
            AppError::ExportFailed(format!("{}: {}", self.output_dir.display(), e))
        })?;

        let path = self.output_dir.join(file_name);
        fs::write(&path, &snapshot.bytes)
            .map_err(|e| AppError::ExportFailed(format!("{}: {}", path.display(), e)))?;

        info!(path = %path.display(), bytes = snapshot.bytes.len(), "Receipt exported");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SnapshotFormat;

    fn snapshot() -> Snapshot {
        Snapshot {
            bytes: b"RENT RECEIPT".to_vec(),
            format: SnapshotFormat::Text,
        }
    }

    #[test]
    fn test_writes_into_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = FileExporter::new(dir.path().join("receipts").join("2025"));

        let path = exporter
            .export(&snapshot(), "Receipt-RR-2025-001-2025-01-05.txt")
            .unwrap();

        assert_eq!(path.parent().unwrap(), exporter.output_dir());
        assert_eq!(fs::read(&path).unwrap(), b"RENT RECEIPT");
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = FileExporter::new(dir.path());
        fs::write(dir.path().join("r.txt"), b"old").unwrap();

        exporter.export(&snapshot(), "r.txt").unwrap();
        assert_eq!(fs::read(dir.path().join("r.txt")).unwrap(), b"RENT RECEIPT");
    }

    #[test]
    fn test_rejects_path_like_names() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = FileExporter::new(dir.path());

        for name in ["", "../escape.txt", "a/b.txt", ".hidden"] {
            assert!(
                matches!(exporter.export(&snapshot(), name), Err(AppError::ExportFailed(_))),
                "{name}"
            );
        }
    }
}
