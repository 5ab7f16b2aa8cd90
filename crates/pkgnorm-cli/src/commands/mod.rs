//! Command implementations and dispatch logic.

use pkgnorm_core::{Package, PkgError, PkgResult, Relations};
use serde_json::Value;
use std::path::PathBuf;
use tracing::info;

pub mod parse;
pub mod scan;
pub mod types;


use crate::config::CliOverrides;
use crate::output::OutputHandler;
use crate::Commands;

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: PathBuf,
    pub output: OutputHandler,
}

impl CommandContext {
    pub fn new() -> PkgResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| PkgError::io("Failed to get current directory".to_string(), e))?;
        Ok(Self {
            cwd,
            output: OutputHandler::new(),
        })
    }

    /// Resolve a command line path against the working directory
    pub fn resolve(&self, path: PathBuf) -> PathBuf {
        if path.is_absolute() {
            path
        } else {
            self.cwd.join(path)
        }
    }
}

/// Dispatch a command to its handler
pub fn dispatch_command(command: Commands, ctx: &CommandContext) -> PkgResult<()> {
    match command {
        Commands::Scan {
            path,
            no_deps,
            max_depth,
            threads,
        } => {
            info!("Scanning {}", path.display());
            let overrides = CliOverrides {
                max_depth,
                threads,
                no_deps,
            };
            scan::execute(ctx.resolve(path), &overrides, ctx)
        },
        Commands::Parse { file, no_deps } => {
            info!("Parsing {}", file.display());
            let overrides = CliOverrides {
                no_deps,
                ..CliOverrides::default()
            };
            parse::execute(ctx.resolve(file), &overrides, ctx)
        },
        Commands::Types => types::execute(ctx),
    }
}

/// Serialize a package into its JSON record
pub fn package_record(package: &Package, relations: Relations) -> PkgResult<Value> {
    package
        .to_value(relations)
        .map_err(|e| PkgError::Serialize {
            package: package.identifier().to_string(),
            message: e.to_string(),
        })
}
