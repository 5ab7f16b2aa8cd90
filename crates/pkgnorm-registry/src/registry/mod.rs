//! Ordered package type registry.
//!
//! Registration order is the tie-break between overlapping signatures: the
//! first descriptor whose signature matches a candidate wins.

use crate::catalog::builtin_descriptors;
use crate::classifier::{Candidate, FileClassifier};
use crate::descriptor::TypeDescriptor;
use glob::{MatchOptions, Pattern};
use pkgnorm_core::{Package, PkgError, PkgResult};
use std::path::Path;
use tracing::debug;

const METAFILE_MATCH: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

struct Entry {
    descriptor: TypeDescriptor,
    patterns: Vec<Pattern>,
}

/// Read-mostly catalogue of package types
#[derive(Default)]
pub struct TypeRegistry {
    entries: Vec<Entry>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in catalogue
    pub fn builtin() -> PkgResult<Self> {
        Self::from_descriptors(builtin_descriptors())
    }

    /// Create a registry from descriptors, in order
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = TypeDescriptor>,
    ) -> PkgResult<Self> {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.register(descriptor)?;
        }
        Ok(registry)
    }

    /// Append a descriptor to the catalogue.
    ///
    /// Metafile patterns are compiled here; an invalid glob is rejected.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> PkgResult<()> {
        let patterns = descriptor
            .signature()
            .metafiles
            .iter()
            .map(|raw| {
                Pattern::new(raw).map_err(|e| PkgError::InvalidSignature {
                    package_type: descriptor.package_type().to_string(),
                    pattern: raw.clone(),
                    reason: e.msg.to_string(),
                })
            })
            .collect::<PkgResult<Vec<_>>>()?;

        debug!(
            "Registered package type '{}' at position {}",
            descriptor.package_type(),
            self.entries.len()
        );
        self.entries.push(Entry {
            descriptor,
            patterns,
        });
        Ok(())
    }

    /// Find the first descriptor whose signature matches the candidate
    pub fn match_type(&self, candidate: &Candidate) -> Option<&TypeDescriptor> {
        let found = self
            .entries
            .iter()
            .find(|entry| entry.matches(candidate))
            .map(|entry| &entry.descriptor);

        match found {
            Some(descriptor) => debug!(
                "Matched '{}' as {}",
                candidate.file_name,
                descriptor.package_type()
            ),
            None => debug!("No package type for '{}'", candidate.file_name),
        }
        found
    }

    /// Look up a descriptor by package type
    pub fn get(&self, package_type: &str) -> Option<&TypeDescriptor> {
        self.iter().find(|d| d.package_type() == package_type)
    }

    /// Iterate over descriptors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.entries.iter().map(|entry| &entry.descriptor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Classify a path, match its type and build a package from it
    pub fn recognize(
        &self,
        path: &Path,
        classifier: &dyn FileClassifier,
    ) -> PkgResult<Option<Package>> {
        let candidate = Candidate::from_path(path, classifier)?;
        match self.match_type(&candidate) {
            Some(descriptor) => descriptor.recognize(path),
            None => Ok(None),
        }
    }
}

impl Entry {
    fn matches(&self, candidate: &Candidate) -> bool {
        let signature = self.descriptor.signature();

        let by_extension = candidate.extension.as_deref().is_some_and(|ext| {
            let name = candidate.file_name.to_ascii_lowercase();
            signature.extensions.iter().any(|declared| {
                let declared = declared.to_ascii_lowercase();
                declared == ext || (name.len() > declared.len() && name.ends_with(&declared))
            })
        });

        let by_media_type = candidate.media_type.as_deref().is_some_and(|media| {
            signature
                .mimetypes
                .iter()
                .any(|declared| declared.eq_ignore_ascii_case(media))
        });

        let by_description = candidate.description.as_deref().is_some_and(|text| {
            let text = text.to_ascii_lowercase();
            signature
                .filetypes
                .iter()
                .any(|declared| text.contains(&declared.to_ascii_lowercase()))
        });

        let by_metafile = self.patterns.iter().any(|pattern| {
            candidate
                .metafiles
                .iter()
                .any(|name| pattern.matches_with(name, METAFILE_MATCH))
        });

        by_extension || by_media_type || by_description || by_metafile
    }
}

#[cfg(test)]
mod tests;
