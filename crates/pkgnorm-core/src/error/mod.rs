//! Error types and result aliases for pkgnorm operations.
//!
//! One error type covers every failure the package model, the type
//! registry and the manifest parsers can report. Ineligible inputs are
//! not errors: recognizers return `Ok(None)` for those.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for all pkgnorm operations
#[derive(Error, Debug)]
pub enum PkgError {
    // Manifest errors
    #[error("Failed to decode manifest {}: {message}", .path.display())]
    ManifestDecode { path: PathBuf, message: String },

    #[error("Manifest field '{field}' in {} has an unexpected shape: {reason}", .path.display())]
    ManifestShape {
        path: PathBuf,
        field: String,
        reason: String,
    },

    // Model errors
    #[error("Unknown dependency group '{group}'")]
    UnknownDependencyGroup { group: String },

    #[error("Invalid package identifier '{input}': expected 'type|name|version'")]
    InvalidPackageId { input: String },

    #[error("Invalid package URL '{input}': {reason}")]
    InvalidPackageUrl { input: String, reason: String },

    // Registry errors
    #[error("Invalid signature pattern '{pattern}' for package type '{package_type}': {reason}")]
    InvalidSignature {
        package_type: String,
        pattern: String,
        reason: String,
    },

    // Config errors
    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // Output errors
    #[error("Failed to serialize package '{package}': {message}")]
    Serialize { package: String, message: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for pkgnorm operations
pub type PkgResult<T> = Result<T, PkgError>;

impl PkgError {
    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Create a decode error for the manifest at `path`
    pub fn decode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ManifestDecode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a shape error naming the offending manifest field
    pub fn shape(
        path: impl Into<PathBuf>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::ManifestShape {
            path: path.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error only concerns a single input file.
    ///
    /// A scan driver logs and skips recoverable errors instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PkgError::ManifestDecode { .. } | PkgError::ManifestShape { .. } | PkgError::Io { .. }
        )
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            PkgError::ManifestDecode { .. } => {
                Some("Check that the manifest is valid JSON (trailing commas are not allowed)")
            },
            PkgError::ManifestShape { .. } => {
                Some("Compare the field with the ecosystem's manifest schema")
            },
            PkgError::UnknownDependencyGroup { .. } => Some(
                "Use one of: runtime, development, test, build, optional, bundled, continuous-integration",
            ),
            PkgError::InvalidPackageUrl { .. } => {
                Some("Package URLs look like 'type:namespace/name@version?key=value#subpath'")
            },
            PkgError::InvalidSignature { .. } => {
                Some("Metafile patterns support glob wildcards such as '*.gemspec'")
            },
            PkgError::ConfigValidation { .. } => {
                Some("Check pkgnorm.toml and PKGNORM_* environment variables")
            },
            _ => None,
        }
    }
}
