//! Unit tests for type matching

use super::*;
use crate::classifier::FileInfo;
use pkgnorm_core::Packaging;
use std::path::PathBuf;
use std::sync::Mutex;

fn candidate(name: &str) -> Candidate {
    Candidate::new(
        Path::new(name),
        &FileInfo {
            is_file: true,
            ..FileInfo::default()
        },
    )
}

fn described(name: &str, media_type: Option<&str>, description: Option<&str>) -> Candidate {
    Candidate::new(
        Path::new(name),
        &FileInfo {
            is_file: true,
            extension: None,
            media_type: media_type.map(str::to_string),
            description: description.map(str::to_string),
        },
    )
}

fn matched(registry: &TypeRegistry, candidate: &Candidate) -> Option<String> {
    registry
        .match_type(candidate)
        .map(|d| d.package_type().to_string())
}

/// Classifier that answers from a fixed table and records the paths asked for
struct TableClassifier {
    infos: Vec<(PathBuf, FileInfo)>,
    asked: Mutex<Vec<PathBuf>>,
}

impl FileClassifier for TableClassifier {
    fn classify(&self, path: &Path) -> PkgResult<FileInfo> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(path.to_path_buf());
        }
        Ok(self
            .infos
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, info)| info.clone())
            .unwrap_or_default())
    }
}

#[test]
fn test_builtin_registry_loads() {
    let registry = TypeRegistry::builtin().unwrap();
    assert_eq!(registry.len(), builtin_descriptors().len());
    assert!(!registry.is_empty());
    assert!(registry.get("phpcomposer").is_some());
    assert!(registry.get("no such type").is_none());
}

#[test]
fn test_match_by_metafile() {
    let registry = TypeRegistry::builtin().unwrap();
    assert_eq!(matched(&registry, &candidate("acme/composer.json")).as_deref(), Some("phpcomposer"));
    assert_eq!(matched(&registry, &candidate("COMPOSER.JSON")).as_deref(), Some("phpcomposer"));
    assert_eq!(matched(&registry, &candidate("widget/package.json")).as_deref(), Some("npm"));
    assert_eq!(matched(&registry, &candidate("rails.gemspec")).as_deref(), Some("RubyGem"));
    assert_eq!(matched(&registry, &candidate("bash.spec")).as_deref(), Some("RPM"));
    assert_eq!(matched(&registry, &candidate("x/ivy.xml")).as_deref(), Some("Apache IVY package"));
}

#[test]
fn test_match_nested_metafile_pattern() {
    let registry = TypeRegistry::builtin().unwrap();
    assert_eq!(
        matched(&registry, &candidate("app/META-INF/MANIFEST.MF")).as_deref(),
        Some("Java Jar")
    );
    assert_eq!(
        matched(&registry, &candidate("app/WEB-INF/web.xml")).as_deref(),
        Some("Java Web application")
    );
    // same file name outside WEB-INF is not a metafile
    assert_eq!(matched(&registry, &candidate("docs/web.xml")), None);
}

#[test]
fn test_match_by_extension() {
    let registry = TypeRegistry::builtin().unwrap();
    assert_eq!(matched(&registry, &candidate("foo.deb")).as_deref(), Some("Debian package"));
    assert_eq!(matched(&registry, &candidate("FOO.JAR")).as_deref(), Some("Java Jar"));
    assert_eq!(matched(&registry, &candidate("app.apk")).as_deref(), Some("Android app"));
    assert_eq!(matched(&registry, &candidate("w-1.0.tar.gz")).as_deref(), Some("plain tarball"));
    assert_eq!(matched(&registry, &candidate("w-1.0.tar.bzip2")).as_deref(), Some("plain tarball"));
    assert_eq!(matched(&registry, &candidate("w.zip")).as_deref(), Some("plain zip"));
    assert_eq!(matched(&registry, &candidate("notes.txt")), None);
}

#[test]
fn test_match_by_media_type() {
    let registry = TypeRegistry::builtin().unwrap();
    let rpm = described("download", Some("Application/X-RPM"), None);
    assert_eq!(matched(&registry, &rpm).as_deref(), Some("RPM"));

    let zip = described("download", Some("application/zip"), None);
    assert_eq!(matched(&registry, &zip).as_deref(), Some("plain zip"));
}

#[test]
fn test_match_by_description_containment() {
    let registry = TypeRegistry::builtin().unwrap();
    let nsis = described("setup.exe", None, Some("PE32 executable, Nullsoft Installer self-extracting archive"));
    assert_eq!(matched(&registry, &nsis).as_deref(), Some("Nullsoft Installer"));

    let jar = described("download", None, Some("Java archive data (JAR)"));
    assert_eq!(matched(&registry, &jar).as_deref(), Some("Java Jar"));

    let tar = described("download", None, Some("POSIX tar archive (GNU)"));
    assert_eq!(matched(&registry, &tar).as_deref(), Some("plain tarball"));
}

#[test]
fn test_specific_wins_over_generic() {
    let registry = TypeRegistry::builtin().unwrap();
    // a jar is also a zip archive
    let jar = described("lib.jar", Some("application/zip"), Some("Zip archive data"));
    assert_eq!(matched(&registry, &jar).as_deref(), Some("Java Jar"));

    let wheel = described("six-1.0-py2.py3-none-any.whl", Some("application/zip"), None);
    assert_eq!(matched(&registry, &wheel).as_deref(), Some("Python package"));
}

#[test]
fn test_registration_order_breaks_ties() {
    let mut registry = TypeRegistry::new();
    registry
        .register(TypeDescriptor::new("first").extensions(&[".pkg"]))
        .unwrap();
    registry
        .register(TypeDescriptor::new("second").extensions(&[".pkg"]))
        .unwrap();
    assert_eq!(matched(&registry, &candidate("a.pkg")).as_deref(), Some("first"));

    let names: Vec<_> = registry.iter().map(|d| d.package_type()).collect();
    assert_eq!(names, vec!["first", "second"]);
}

#[test]
fn test_signal_free_descriptor_never_matches() {
    let mut registry = TypeRegistry::new();
    registry.register(TypeDescriptor::new("bare")).unwrap();
    assert_eq!(registry.len(), 1);
    assert!(registry.match_type(&candidate("bare")).is_none());
    assert!(registry.match_type(&Candidate::default()).is_none());
}

#[test]
fn test_invalid_metafile_pattern_is_rejected() {
    let mut registry = TypeRegistry::new();
    let err = registry
        .register(TypeDescriptor::new("broken").metafiles(&["[unclosed"]))
        .unwrap_err();
    assert!(matches!(
        err,
        PkgError::InvalidSignature { ref package_type, ref pattern, .. }
            if package_type == "broken" && pattern == "[unclosed"
    ));
    assert!(registry.is_empty());
}

#[test]
fn test_recognize_default_package() {
    let registry = TypeRegistry::builtin().unwrap();
    let path = PathBuf::from("dist/tool-2.1.deb");
    let classifier = TableClassifier {
        infos: vec![(
            path.clone(),
            FileInfo {
                is_file: true,
                extension: Some(".deb".to_string()),
                media_type: None,
                description: None,
            },
        )],
        asked: Mutex::new(Vec::new()),
    };

    let package = registry.recognize(&path, &classifier).unwrap().unwrap();
    assert_eq!(package.package_type, "Debian package");
    assert_eq!(package.name, "tool-2.1");
    assert_eq!(package.packaging, Some(Packaging::Archive));
    assert_eq!(classifier.asked.lock().unwrap().as_slice(), &[path]);
}

#[test]
fn test_recognize_unknown_file() {
    let registry = TypeRegistry::builtin().unwrap();
    let classifier = TableClassifier {
        infos: Vec::new(),
        asked: Mutex::new(Vec::new()),
    };
    let result = registry.recognize(Path::new("README"), &classifier).unwrap();
    assert!(result.is_none());
}

#[test]
fn test_registry_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TypeRegistry>();
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn extension_match_is_case_insensitive(
            stem in "[a-z]{1,8}",
            upper in any::<bool>()
        ) {
            let registry = TypeRegistry::builtin().unwrap();
            let name = if upper { format!("{}.DEB", stem) } else { format!("{}.deb", stem) };
            let found = matched(&registry, &candidate(&name));
            prop_assert_eq!(found.as_deref(), Some("Debian package"));
        }
    }
}
