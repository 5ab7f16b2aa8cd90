//! Package identifier: the stable cross-reference key for a package.

use crate::error::PkgError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Immutable `(type, name, version)` triple.
///
/// Ordering is structural: type, then name, then version with an absent
/// version sorting first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageId {
    package_type: String,
    name: String,
    version: Option<String>,
}

impl PackageId {
    /// Create a new package identifier
    pub fn new(
        package_type: impl Into<String>,
        name: impl Into<String>,
        version: Option<String>,
    ) -> Self {
        Self {
            package_type: package_type.into(),
            name: name.into(),
            version,
        }
    }

    pub fn package_type(&self) -> &str {
        &self.package_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}",
            self.package_type,
            self.name,
            self.version.as_deref().unwrap_or("")
        )
    }
}

impl FromStr for PackageId {
    type Err = PkgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PkgError::InvalidPackageId {
            input: s.to_string(),
        };

        let mut parts = s.split('|');
        let (Some(package_type), Some(name), Some(version), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        if package_type.is_empty() || name.is_empty() {
            return Err(invalid());
        }

        let version = (!version.is_empty()).then(|| version.to_string());
        Ok(PackageId::new(package_type, name, version))
    }
}

impl Serialize for PackageId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PackageId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
