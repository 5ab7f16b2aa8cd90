//! Path utilities for package recognition.
//!
//! Extensions are returned with their leading dot and may be compound,
//! such as `.tar.gz`.

use std::path::{Path, PathBuf};

/// Double extensions that name a single archive format
const COMPOUND_EXTENSIONS: &[&str] = &[
    ".tar.gz", ".tar.bz2", ".tar.xz", ".tar.lzma", ".tar.lz", ".tar.zst", ".tar.z",
];

/// Get the final path component as a string
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Get the directory containing a path, or the path itself for a directory
pub fn parent_directory(path: &Path) -> PathBuf {
    if path.is_dir() {
        return path.to_path_buf();
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Split a file name into base name and extension, keeping compound extensions whole
pub fn split_extension(name: &str) -> (&str, &str) {
    let lower = name.to_ascii_lowercase();
    for compound in COMPOUND_EXTENSIONS {
        if lower.len() > compound.len() && lower.ends_with(compound) {
            let split = name.len() - compound.len();
            return (&name[..split], &name[split..]);
        }
    }

    match name.rfind('.') {
        // a leading dot marks a hidden file, not an extension
        Some(0) | None => (name, ""),
        Some(index) => (&name[..index], &name[index..]),
    }
}

/// Get the file name of a path without its extension
pub fn base_name(path: &Path) -> String {
    let name = file_name(path);
    split_extension(&name).0.to_string()
}

/// Get the (possibly compound) file extension as a lowercase string
pub fn get_extension(path: &Path) -> Option<String> {
    let name = file_name(path);
    let (_, extension) = split_extension(&name);
    (!extension.is_empty()).then(|| extension.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("widget-1.0.tar.gz"), ("widget-1.0", ".tar.gz"));
        assert_eq!(split_extension("Widget.TAR.BZ2"), ("Widget", ".TAR.BZ2"));
        assert_eq!(split_extension("foo.jar"), ("foo", ".jar"));
        assert_eq!(split_extension("composer.json"), ("composer", ".json"));
        assert_eq!(split_extension("README"), ("README", ""));
        assert_eq!(split_extension(".bashrc"), (".bashrc", ""));
        assert_eq!(split_extension(".tar.gz"), (".tar", ".gz"));
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name(Path::new("dist/widget-1.0.tar.gz")), "widget-1.0");
        assert_eq!(base_name(Path::new("/tmp/foo.deb")), "foo");
        assert_eq!(base_name(Path::new("Makefile")), "Makefile");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(Path::new("a/b/composer.json")), "composer.json");
        assert_eq!(file_name(Path::new("/")), "");
    }

    #[test]
    fn test_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("composer.json");
        std::fs::write(&manifest, "{}").unwrap();

        assert_eq!(parent_directory(&manifest), dir.path());
        assert_eq!(parent_directory(dir.path()), dir.path());
        assert_eq!(parent_directory(Path::new("package.json")), Path::new("."));
    }

    #[test]
    fn test_get_extension() {
        assert_eq!(get_extension(Path::new("file.rs")), Some(".rs".to_string()));
        assert_eq!(
            get_extension(Path::new("file.tar.gz")),
            Some(".tar.gz".to_string())
        );
        assert_eq!(get_extension(Path::new("FILE.JAR")), Some(".jar".to_string()));
        assert_eq!(get_extension(Path::new("no_extension")), None);
    }
}
