//! Error message formatting with actionable suggestions.

use super::colors::ColorSupport;
use pkgnorm_core::PkgError;
use std::error::Error;
use std::path::Path;

/// Error formatter with suggestions
pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    pub fn new() -> Self {
        Self {
            colors: ColorSupport::detect(),
        }
    }

    /// Format a per-file failure that did not stop the run
    pub fn format_skipped(&self, path: &Path, error: &PkgError) -> String {
        let mut output = format!(
            "{}: skipped {}: {}\n",
            self.colors.yellow("warning"),
            path.display(),
            error
        );
        self.push_details(&mut output, error);
        output
    }

    fn push_details(&self, output: &mut String, error: &PkgError) {
        if let Some(suggestion) = error.suggestion() {
            output.push_str(&format!("{}: {}\n", self.colors.dim("help"), suggestion));
        }

        let mut source = error.source();
        while let Some(err) = source {
            output.push_str(&format!("{}: {}\n", self.colors.dim("caused by"), err));
            source = err.source();
        }
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}
