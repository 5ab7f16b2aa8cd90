//! Path-based file classification.
//!
//! No content sniffing is done: the extension comes from the file name and
//! media type and description stay unknown, so archive types are matched
//! by extension only.

use pkgnorm_core::utils::path::get_extension;
use pkgnorm_core::{PkgError, PkgResult};
use pkgnorm_registry::{FileClassifier, FileInfo};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Classifies paths from file system metadata
#[derive(Debug, Clone, Copy, Default)]
pub struct FsClassifier;

impl FileClassifier for FsClassifier {
    fn classify(&self, path: &Path) -> PkgResult<FileInfo> {
        let is_file = match fs::metadata(path) {
            Ok(metadata) => metadata.is_file(),
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => return Err(PkgError::io(format!("Failed to stat {}", path.display()), e)),
        };
        Ok(FileInfo {
            is_file,
            extension: get_extension(path),
            ..FileInfo::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_classify_file_and_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("widget-1.0.tar.gz");
        fs::write(&file, b"").unwrap();

        let info = FsClassifier.classify(&file).unwrap();
        assert!(info.is_file);
        assert_eq!(info.extension.as_deref(), Some(".tar.gz"));
        assert_eq!(info.media_type, None);

        let dir_info = FsClassifier.classify(dir.path()).unwrap();
        assert!(!dir_info.is_file);
    }

    #[test]
    fn test_missing_path_is_not_a_file() {
        let dir = TempDir::new().unwrap();
        let info = FsClassifier.classify(&dir.path().join("gone.json")).unwrap();
        assert!(!info.is_file);
    }
}
