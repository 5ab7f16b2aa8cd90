//! The manifest-to-package mapping protocol.
//!
//! Every JSON manifest format is parsed by the same steps:
//!
//! 1. eligibility: a regular file named like the format's metafile
//! 2. decode the JSON document, keeping key order
//! 3. start from a package carrying the type's defaults
//! 4. copy the plain fields
//! 5. apply the structured field mappers, in table order
//! 6. run the format's derivations
//! 7. return the package
//!
//! A format only supplies data: its metafile name and two ordered field
//! tables, plus optional applicability and derivation hooks.

use crate::values::{is_blank, text, text_list, MapResult};
use pkgnorm_core::utils::path::{file_name, parent_directory};
use pkgnorm_core::{Package, PkgError, PkgResult};
use pkgnorm_registry::{Recognizer, TypeDescriptor};
use serde_json::{Map, Value};
use std::marker::PhantomData;
use std::path::Path;
use tracing::debug;

/// Structured field mapper: reads one manifest value into the package
pub type Mapper = fn(&Value, &mut Package) -> MapResult;

/// Package attributes a plain manifest field can be copied into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlainField {
    Name,
    Version,
    Summary,
    Description,
    Keywords,
    HomepageUrl,
}

impl PlainField {
    fn apply(self, value: &Value, package: &mut Package) -> MapResult {
        if self == PlainField::Keywords {
            package.keywords = match value {
                // some manifests use a comma separated string
                Value::String(s) => s
                    .split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(str::to_string)
                    .collect(),
                other => text_list(other)?,
            };
            return Ok(());
        }

        let Some(value) = text(value)? else {
            return Ok(());
        };
        match self {
            PlainField::Name => package.name = value,
            PlainField::Version => package.version = Some(value),
            PlainField::Summary => package.summary = Some(value),
            PlainField::Description => package.description = Some(value),
            PlainField::HomepageUrl => package.homepage_url = Some(value),
            PlainField::Keywords => {},
        }
        Ok(())
    }
}

/// Field tables and hooks of one manifest format
pub trait ManifestFormat: Send + Sync + 'static {
    /// Metafile name, compared case-insensitively
    const METAFILE: &'static str;

    /// Manifest key to package attribute, applied in order
    const PLAIN_FIELDS: &'static [(&'static str, PlainField)];

    /// Manifest key to mapper, applied in order after the plain fields
    const FIELD_MAPPERS: &'static [(&'static str, Mapper)];

    /// Check that a decoded document describes a usable package
    fn is_applicable(_document: &Map<String, Value>) -> bool {
        true
    }

    /// Fill fields derived from other fields
    fn derive(_package: &mut Package) {}
}

/// Parser for one manifest format
pub struct ManifestParser<F> {
    format: PhantomData<fn() -> F>,
}

impl<F: ManifestFormat> Default for ManifestParser<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ManifestFormat> ManifestParser<F> {
    pub fn new() -> Self {
        Self {
            format: PhantomData,
        }
    }

    /// Check if a path is this format's metafile
    pub fn is_metafile(path: &Path) -> bool {
        path.is_file() && file_name(path).eq_ignore_ascii_case(F::METAFILE)
    }

    /// Parse manifest text found at `path`
    pub fn parse_str(
        &self,
        path: &Path,
        content: &str,
        descriptor: &TypeDescriptor,
    ) -> PkgResult<Option<Package>> {
        let document: Value =
            serde_json::from_str(content).map_err(|e| PkgError::decode(path, e.to_string()))?;
        let Value::Object(document) = document else {
            return Err(PkgError::shape(
                path,
                "<root>",
                format!("expected an object, found {}", crate::values::kind(&document)),
            ));
        };

        if !F::is_applicable(&document) {
            debug!("{} is not a usable {} manifest", path.display(), F::METAFILE);
            return Ok(None);
        }

        let mut package = descriptor.new_package(String::new());
        package.location = Some(parent_directory(path));

        for (key, field) in F::PLAIN_FIELDS {
            if let Some(value) = document.get(*key).filter(|v| !is_blank(v)) {
                field
                    .apply(value, &mut package)
                    .map_err(|reason| PkgError::shape(path, *key, reason))?;
            }
        }

        for (key, mapper) in F::FIELD_MAPPERS {
            if let Some(value) = document.get(*key).filter(|v| !is_blank(v)) {
                debug!("Mapping '{}' from {}", key, path.display());
                mapper(value, &mut package).map_err(|reason| PkgError::shape(path, *key, reason))?;
            }
        }

        F::derive(&mut package);

        if package.name.is_empty() {
            // unpublished manifests may omit the name; fall back to the directory
            match parent_directory(path).canonicalize().ok().map(|dir| file_name(&dir)) {
                Some(dir_name) if !dir_name.is_empty() => package.name = dir_name,
                _ => return Ok(None),
            }
        }

        Ok(Some(package))
    }

    /// Read and parse the manifest at `path`
    pub fn parse(&self, path: &Path, descriptor: &TypeDescriptor) -> PkgResult<Option<Package>> {
        if !Self::is_metafile(path) {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| PkgError::io(format!("Failed to read {}", path.display()), e))?;
        self.parse_str(path, &content, descriptor)
    }
}

impl<F: ManifestFormat> Recognizer for ManifestParser<F> {
    fn recognize(&self, path: &Path, descriptor: &TypeDescriptor) -> PkgResult<Option<Package>> {
        self.parse(path, descriptor)
    }
}
