//! Terminal output formatting.
//!
//! Package records go to stdout as JSON lines. Everything meant for a
//! human (progress notes, warnings, the summary) goes to stderr.

pub mod colors;
pub mod errors;

use serde_json::Value;
use std::io::{self, Write};
use std::path::Path;

use pkgnorm_core::{PkgError, PkgResult};

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    colors: colors::ColorSupport,
    errors: errors::ErrorFormatter,
}

impl OutputHandler {
    pub fn new() -> Self {
        Self {
            colors: colors::ColorSupport::detect(),
            errors: errors::ErrorFormatter::new(),
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        eprintln!("{}", self.colors.dim(message));
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", self.colors.green("✓"), message);
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", self.colors.yellow("⚠"), message);
    }

    /// Report a file that failed to parse and was skipped
    pub fn skipped(&self, path: &Path, error: &PkgError) {
        eprint!("{}", self.errors.format_skipped(path, error));
    }

    /// Write JSON records to stdout, one per line
    pub fn records<'a>(&self, records: impl IntoIterator<Item = &'a Value>) -> PkgResult<()> {
        let stdout = io::stdout();
        let mut out = io::BufWriter::new(stdout.lock());
        for record in records {
            writeln!(out, "{}", record)
                .map_err(|e| PkgError::io("Failed to write to stdout".to_string(), e))?;
        }
        out.flush()
            .map_err(|e| PkgError::io("Failed to write to stdout".to_string(), e))
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new()
    }
}
