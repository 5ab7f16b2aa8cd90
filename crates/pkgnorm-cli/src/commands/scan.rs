//! `pkgnorm scan`: recognize every package below a directory

use super::{package_record, CommandContext};
use crate::classify::FsClassifier;
use crate::config::{CliOverrides, ConfigLoader, Settings};
use glob::Pattern;
use pkgnorm_core::{Package, PkgError, PkgResult};
use pkgnorm_manifest::standard_registry;
use pkgnorm_registry::TypeRegistry;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

type Outcome = (PathBuf, PkgResult<Option<Package>>);

/// Packages found by a scan, sorted by identity, and the files skipped
#[derive(Debug, Default)]
pub struct ScanReport {
    pub packages: Vec<Package>,
    pub failures: Vec<(PathBuf, PkgError)>,
}

fn is_ignored(root: &Path, path: &Path, patterns: &[Pattern]) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    if relative.as_os_str().is_empty() {
        return false;
    }
    let relative = relative.to_string_lossy().replace('\\', "/");
    patterns.iter().any(|pattern| pattern.matches(&relative))
}

/// List the regular files below `root`, in file name order
pub fn collect_files(root: &Path, settings: &Settings) -> PkgResult<Vec<PathBuf>> {
    fs::metadata(root).map_err(|e| PkgError::io(format!("Cannot scan {}", root.display()), e))?;
    let patterns = settings.ignore_patterns()?;

    let mut walker = WalkDir::new(root)
        .follow_links(settings.follow_links)
        .sort_by_file_name();
    if let Some(depth) = settings.max_depth {
        walker = walker.max_depth(depth);
    }

    let mut files = Vec::new();
    for entry in walker
        .into_iter()
        .filter_entry(|entry| !is_ignored(root, entry.path(), &patterns))
    {
        match entry {
            Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
            Ok(_) => {},
            Err(e) => warn!("Skipping unreadable entry: {}", e),
        }
    }
    Ok(files)
}

fn recognize_all(files: &[PathBuf], registry: &TypeRegistry) -> Vec<Outcome> {
    files
        .par_iter()
        .map(|path| (path.clone(), registry.recognize(path, &FsClassifier)))
        .collect()
}

/// Recognize every file below `root`.
///
/// Files that fail to parse are recorded in the report and skipped; any
/// other error stops the scan.
pub fn scan(root: &Path, settings: &Settings, registry: &TypeRegistry) -> PkgResult<ScanReport> {
    let files = collect_files(root, settings)?;
    debug!("{} candidate files below {}", files.len(), root.display());

    let outcomes = match settings.threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| PkgError::ConfigValidation {
                field: "threads".to_string(),
                reason: e.to_string(),
            })?
            .install(|| recognize_all(&files, registry)),
        None => recognize_all(&files, registry),
    };

    let mut report = ScanReport::default();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(Some(package)) => report.packages.push(package),
            Ok(None) => {},
            Err(e) if e.is_recoverable() => {
                warn!("Failed to parse {}: {}", path.display(), e);
                report.failures.push((path, e));
            },
            Err(e) => return Err(e),
        }
    }

    report.packages.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    Ok(report)
}

pub fn execute(root: PathBuf, overrides: &CliOverrides, ctx: &CommandContext) -> PkgResult<()> {
    let settings = ConfigLoader::new(&root).load(overrides)?;
    let registry = standard_registry()?;
    let report = scan(&root, &settings, &registry)?;

    let records = report
        .packages
        .iter()
        .map(|package| package_record(package, settings.relations()))
        .collect::<PkgResult<Vec<_>>>()?;
    ctx.output.records(&records)?;

    for (path, error) in &report.failures {
        ctx.output.skipped(path, error);
    }

    let summary = format!(
        "{} packages recognized, {} failed",
        report.packages.len(),
        report.failures.len()
    );
    if report.failures.is_empty() {
        ctx.output.success(&summary);
    } else {
        ctx.output.warn(&summary);
    }
    Ok(())
}
