//! `pkgnorm types`: list the package type catalogue

use super::CommandContext;
use pkgnorm_core::PkgResult;
use pkgnorm_manifest::standard_registry;
use pkgnorm_registry::{TypeDescriptor, TypeRegistry};
use serde_json::{json, Value};

/// Describe one descriptor as a JSON record
pub fn type_record(descriptor: &TypeDescriptor) -> Value {
    let signature = descriptor.signature();
    json!({
        "type": descriptor.package_type(),
        "primary_language": descriptor.primary_language(),
        "packaging": descriptor.default_packaging().map(|p| p.as_str()),
        "version_scheme": descriptor.default_version_scheme(),
        "metafiles": signature.metafiles,
        "extensions": signature.extensions,
        "filetypes": signature.filetypes,
        "mimetypes": signature.mimetypes,
        "parses_manifest": descriptor.has_recognizer(),
    })
}

pub fn type_records(registry: &TypeRegistry) -> Vec<Value> {
    registry.iter().map(type_record).collect()
}

pub fn execute(ctx: &CommandContext) -> PkgResult<()> {
    let registry = standard_registry()?;
    let records = type_records(&registry);
    ctx.output.records(&records)?;
    ctx.output.info(&format!("{} package types", records.len()));
    Ok(())
}
