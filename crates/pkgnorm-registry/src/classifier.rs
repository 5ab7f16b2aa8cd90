//! File classification inputs for type matching.
//!
//! Content sniffing lives outside this crate: a [`FileClassifier`] supplies
//! the extension, media type and content description of a path, and a
//! [`Candidate`] bundles those signals for [`crate::TypeRegistry::match_type`].

use pkgnorm_core::utils::path::{file_name, get_extension};
use pkgnorm_core::PkgResult;
use std::path::Path;

/// What a classifier knows about one path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInfo {
    pub is_file: bool,
    /// Lowercase extension with its leading dot, possibly compound
    pub extension: Option<String>,
    pub media_type: Option<String>,
    /// Free-text content description such as "Zip archive data"
    pub description: Option<String>,
}

/// Supplies file signals for a path
pub trait FileClassifier: Send + Sync {
    fn classify(&self, path: &Path) -> PkgResult<FileInfo>;
}

/// The signals a registry matches against
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    pub file_name: String,
    pub extension: Option<String>,
    pub media_type: Option<String>,
    pub description: Option<String>,
    /// Names a metafile pattern may match: the file name and its
    /// `parent/file` form (for patterns such as `META-INF/MANIFEST.MF`)
    pub metafiles: Vec<String>,
}

impl Candidate {
    /// Build a candidate from a classified path
    pub fn new(path: &Path, info: &FileInfo) -> Self {
        let name = file_name(path);
        let mut metafiles = Vec::new();

        if info.is_file && !name.is_empty() {
            metafiles.push(name.clone());
            if let Some(parent) = path.parent().and_then(|p| p.file_name()) {
                metafiles.push(format!("{}/{}", parent.to_string_lossy(), name));
            }
        }

        Self {
            extension: info
                .extension
                .clone()
                .or_else(|| get_extension(path))
                .map(|ext| ext.to_ascii_lowercase()),
            media_type: info.media_type.clone(),
            description: info.description.clone(),
            file_name: name,
            metafiles,
        }
    }

    /// Classify a path and build its candidate
    pub fn from_path(path: &Path, classifier: &dyn FileClassifier) -> PkgResult<Self> {
        let info = classifier.classify(path)?;
        Ok(Self::new(path, &info))
    }
}
