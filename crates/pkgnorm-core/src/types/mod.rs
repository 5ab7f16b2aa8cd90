//! Canonical data types for normalized packages.
//!
//! - Identity and value types (package identifiers, package URLs, parties,
//!   dependencies)
//! - Closed enumerations for choice fields
//! - The package record and version comparison schemes

pub mod dependency;
pub mod identifier;
pub mod kinds;
pub mod package;
pub mod party;
pub mod purl;
pub mod version;

// Re-export all public types
pub use dependency::{Dependency, DependencyGroup};
pub use identifier::PackageId;
pub use kinds::{Packaging, PayloadType, VcsTool};
pub use package::{BasePackage, Package, Relations, FIELD_ORDER};
pub use party::{Party, PartyType};
pub use purl::PackageUrl;
pub use version::{rpmvercmp, sortable_version, Evr, VersionScheme};
