//! Declared dependency types.
//!
//! A dependency points to another package by name and version constraint.
//! It is what a manifest declares, never a resolved package.

use crate::error::PkgError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    /// Version, version range or constraint (such as ">= 3.4")
    pub version_constraint: Option<String>,
}

/// Why a dependency exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyGroup {
    /// Needed to run the package
    Runtime,
    /// Development-only dependency
    Development,
    Test,
    Build,
    /// Optional or peer dependency
    Optional,
    /// Shipped inside the package itself
    Bundled,
    ContinuousIntegration,
}

impl Dependency {
    /// Create a dependency with a version constraint
    pub fn new(name: impl Into<String>, version_constraint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version_constraint: Some(version_constraint.into()),
        }
    }

    /// Create a dependency on any version
    pub fn unconstrained(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version_constraint: None,
        }
    }
}

impl DependencyGroup {
    /// All groups, in canonical order
    pub const ALL: [DependencyGroup; 7] = [
        DependencyGroup::Runtime,
        DependencyGroup::Development,
        DependencyGroup::Test,
        DependencyGroup::Build,
        DependencyGroup::Optional,
        DependencyGroup::Bundled,
        DependencyGroup::ContinuousIntegration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyGroup::Runtime => "runtime",
            DependencyGroup::Development => "development",
            DependencyGroup::Test => "test",
            DependencyGroup::Build => "build",
            DependencyGroup::Optional => "optional",
            DependencyGroup::Bundled => "bundled",
            DependencyGroup::ContinuousIntegration => "continuous-integration",
        }
    }

    /// Check if this dependency is needed at runtime
    pub fn is_runtime(&self) -> bool {
        matches!(self, DependencyGroup::Runtime | DependencyGroup::Optional | DependencyGroup::Bundled)
    }
}

impl FromStr for DependencyGroup {
    type Err = PkgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DependencyGroup::ALL
            .into_iter()
            .find(|group| group.as_str() == s)
            .ok_or_else(|| PkgError::UnknownDependencyGroup {
                group: s.to_string(),
            })
    }
}

impl fmt::Display for DependencyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
