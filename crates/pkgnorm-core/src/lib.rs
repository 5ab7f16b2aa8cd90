//! # pkgnorm-core
//!
//! Canonical package model shared across all pkgnorm crates.
//!
//! This crate provides:
//! - `Package`, the format-agnostic record every manifest is normalized into
//! - Identity and value types: `PackageId`, `PackageUrl`, `Party`, `Dependency`
//! - Version comparison schemes (lexical, semantic, RPM EVR)
//! - `PkgError` enum for unified error handling
//! - Path helpers used by recognizers
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (Package, PackageId, Party, etc.)
//! - `error`: Error types and result aliases
//! - `utils`: Utility functions and helpers

pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{PkgError, PkgResult};
pub use types::{
    BasePackage, Dependency, DependencyGroup, PackageId, PackageUrl, Packaging, Package, Party,
    PartyType, PayloadType, Relations, VcsTool, VersionScheme,
};
