//! Package type descriptors.
//!
//! A descriptor is one row of the type catalogue: the file signals that
//! recognize a package type on disk, the default values of packages of that
//! type, and an optional [`Recognizer`] that builds a package from a file.

use pkgnorm_core::utils::path::{base_name, parent_directory};
use pkgnorm_core::{Package, Packaging, PkgResult, VersionScheme};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Builds a package from a file of a matched type
pub trait Recognizer: Send + Sync {
    /// Return `Ok(None)` when the file is not applicable to this recognizer
    fn recognize(&self, path: &Path, descriptor: &TypeDescriptor) -> PkgResult<Option<Package>>;
}

/// File signals of a package type.
///
/// All tokens are compared case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    /// Glob patterns of well-known metadata file names
    pub metafiles: Vec<String>,
    /// Extensions with their leading dot, possibly compound
    pub extensions: Vec<String>,
    /// Tokens contained in a content-type description
    pub filetypes: Vec<String>,
    pub mimetypes: Vec<String>,
}

impl Signature {
    /// Check if no signal is declared
    pub fn is_empty(&self) -> bool {
        self.metafiles.is_empty()
            && self.extensions.is_empty()
            && self.filetypes.is_empty()
            && self.mimetypes.is_empty()
    }

    /// Iterate over every declared token
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.metafiles
            .iter()
            .chain(&self.extensions)
            .chain(&self.filetypes)
            .chain(&self.mimetypes)
            .map(String::as_str)
    }
}

/// One package type of the catalogue
#[derive(Clone)]
pub struct TypeDescriptor {
    package_type: String,
    primary_language: Option<String>,
    packaging: Option<Packaging>,
    version_scheme: VersionScheme,
    signature: Signature,
    recognizer: Option<Arc<dyn Recognizer>>,
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl TypeDescriptor {
    /// Create a descriptor with no signals and no defaults
    pub fn new(package_type: impl Into<String>) -> Self {
        Self {
            package_type: package_type.into(),
            primary_language: None,
            packaging: None,
            version_scheme: VersionScheme::default(),
            signature: Signature::default(),
            recognizer: None,
        }
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.primary_language = Some(language.into());
        self
    }

    pub fn packaging(mut self, packaging: Packaging) -> Self {
        self.packaging = Some(packaging);
        self
    }

    pub fn version_scheme(mut self, scheme: VersionScheme) -> Self {
        self.version_scheme = scheme;
        self
    }

    pub fn metafiles(mut self, patterns: &[&str]) -> Self {
        self.signature.metafiles = owned(patterns);
        self
    }

    pub fn extensions(mut self, extensions: &[&str]) -> Self {
        self.signature.extensions = owned(extensions);
        self
    }

    pub fn filetypes(mut self, filetypes: &[&str]) -> Self {
        self.signature.filetypes = owned(filetypes);
        self
    }

    pub fn mimetypes(mut self, mimetypes: &[&str]) -> Self {
        self.signature.mimetypes = owned(mimetypes);
        self
    }

    /// Attach the recognizer that builds packages of this type
    pub fn with_recognizer(mut self, recognizer: Arc<dyn Recognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    pub fn package_type(&self) -> &str {
        &self.package_type
    }

    pub fn primary_language(&self) -> Option<&str> {
        self.primary_language.as_deref()
    }

    pub fn default_packaging(&self) -> Option<Packaging> {
        self.packaging
    }

    pub fn default_version_scheme(&self) -> VersionScheme {
        self.version_scheme
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn has_recognizer(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Create a package of this type carrying the descriptor defaults
    pub fn new_package(&self, name: impl Into<String>) -> Package {
        let mut package = Package::new(&self.package_type, name);
        package.primary_language = self.primary_language.clone();
        package.packaging = self.packaging;
        package.version_scheme = self.version_scheme;
        package
    }

    /// Build a package from a file of this type.
    ///
    /// Without a recognizer the package is named after the file's base name.
    pub fn recognize(&self, path: &Path) -> PkgResult<Option<Package>> {
        if let Some(recognizer) = &self.recognizer {
            return recognizer.recognize(path, self);
        }

        let name = base_name(path);
        if name.is_empty() {
            return Ok(None);
        }
        let mut package = self.new_package(name);
        package.location = Some(parent_directory(path));
        Ok(Some(package))
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("package_type", &self.package_type)
            .field("primary_language", &self.primary_language)
            .field("packaging", &self.packaging)
            .field("version_scheme", &self.version_scheme)
            .field("signature", &self.signature)
            .field("recognizer", &self.recognizer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl Recognizer for Fixed {
        fn recognize(&self, _path: &Path, descriptor: &TypeDescriptor) -> PkgResult<Option<Package>> {
            Ok(Some(descriptor.new_package("fixed")))
        }
    }

    #[test]
    fn test_new_package_carries_defaults() {
        let descriptor = TypeDescriptor::new("RubyGem")
            .language("Ruby")
            .packaging(Packaging::Archive)
            .extensions(&[".gem"]);

        let package = descriptor.new_package("rails");
        assert_eq!(package.package_type, "RubyGem");
        assert_eq!(package.name, "rails");
        assert_eq!(package.primary_language.as_deref(), Some("Ruby"));
        assert_eq!(package.packaging, Some(Packaging::Archive));
    }

    #[test]
    fn test_default_recognition_uses_base_name() {
        let descriptor = TypeDescriptor::new("plain tarball").extensions(&[".tar.gz"]);
        let package = descriptor
            .recognize(Path::new("dist/widget-1.0.tar.gz"))
            .unwrap()
            .unwrap();
        assert_eq!(package.name, "widget-1.0");
        assert_eq!(package.location.as_deref(), Some(Path::new("dist")));
    }

    #[test]
    fn test_recognizer_is_used() {
        let descriptor = TypeDescriptor::new("custom").with_recognizer(Arc::new(Fixed));
        assert!(descriptor.has_recognizer());
        let package = descriptor.recognize(Path::new("anything")).unwrap().unwrap();
        assert_eq!(package.name, "fixed");
        assert_eq!(package.package_type, "custom");
    }

    #[test]
    fn test_signature_is_empty() {
        assert!(TypeDescriptor::new("bare").signature().is_empty());
        let sig = TypeDescriptor::new("x").mimetypes(&["application/x-rpm"]);
        assert!(!sig.signature().is_empty());
        assert_eq!(sig.signature().tokens().count(), 1);
    }
}
