//! # pkgnorm-manifest
//!
//! Parsers turning package manifests into normalized [`Package`] records.
//!
//! Each format is a [`ManifestFormat`]: a metafile name and ordered tables
//! mapping manifest keys to package attributes. [`ManifestParser`] runs the
//! shared mapping protocol and plugs into the type registry as a
//! [`Recognizer`](pkgnorm_registry::Recognizer).

pub mod formats;
pub mod license;
pub mod people;
pub mod protocol;
pub mod repo_url;
pub mod values;

// Re-export main types
pub use formats::{Composer, ComposerParser, Npm, NpmParser};
pub use license::LicenseValue;
pub use protocol::{ManifestFormat, ManifestParser, Mapper, PlainField};
pub use repo_url::{infer_vcs_tool, normalize_repo_url};

use pkgnorm_core::PkgResult;
use pkgnorm_registry::{builtin_descriptors, Recognizer, TypeRegistry};
use std::sync::Arc;

/// Build the built-in registry with the manifest parsers attached
pub fn standard_registry() -> PkgResult<TypeRegistry> {
    let descriptors = builtin_descriptors().into_iter().map(|descriptor| {
        let parser: Option<Arc<dyn Recognizer>> = match descriptor.package_type() {
            "phpcomposer" => Some(Arc::new(ComposerParser::new())),
            "npm" => Some(Arc::new(NpmParser::new())),
            _ => None,
        };
        match parser {
            Some(parser) => descriptor.with_recognizer(parser),
            None => descriptor,
        }
    });
    TypeRegistry::from_descriptors(descriptors)
}
