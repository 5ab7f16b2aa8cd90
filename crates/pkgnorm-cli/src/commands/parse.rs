//! `pkgnorm parse`: recognize one file

use super::{package_record, CommandContext};
use crate::classify::FsClassifier;
use crate::config::{CliOverrides, ConfigLoader};
use pkgnorm_core::{Package, PkgError, PkgResult};
use pkgnorm_manifest::standard_registry;
use pkgnorm_registry::TypeRegistry;
use std::io;
use std::path::Path;

/// Recognize a single file with the given registry
pub fn parse_file(path: &Path, registry: &TypeRegistry) -> PkgResult<Option<Package>> {
    if !path.is_file() {
        return Err(PkgError::io(
            format!("Cannot parse {}", path.display()),
            io::Error::new(io::ErrorKind::NotFound, "not a regular file"),
        ));
    }
    registry.recognize(path, &FsClassifier)
}

pub fn execute(path: impl AsRef<Path>, overrides: &CliOverrides, ctx: &CommandContext) -> PkgResult<()> {
    let path = path.as_ref();
    let settings = ConfigLoader::new(path).load(overrides)?;
    let registry = standard_registry()?;

    match parse_file(path, &registry)? {
        Some(package) => {
            let record = package_record(&package, settings.relations())?;
            ctx.output.records([&record])
        },
        None => {
            ctx.output
                .warn(&format!("{} is not a recognized package", path.display()));
            Ok(())
        },
    }
}
