//! # pkgnorm
//!
//! Scans directories for package manifests and archives and prints one
//! normalized package record per line as JSON.
//!
//! This is the main entry point for the pkgnorm CLI tool. It handles command
//! parsing, sets up logging and error handling, and dispatches to the
//! command handlers.

use clap::{Parser, Subcommand};
use pkgnorm_core::PkgResult;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod classify;
mod commands;
mod config;
mod output;

use commands::CommandContext;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("BUILD_DATE"),
    ", ",
    env!("RUSTC_VERSION"),
    ")"
);

/// Normalize package manifests into a common package model
#[derive(Parser)]
#[command(name = "pkgnorm", version, long_version = LONG_VERSION, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recognize every package below a directory
    Scan {
        path: PathBuf,
        /// Leave dependencies and related packages out of the records
        #[arg(long)]
        no_deps: bool,
        /// Maximum directory depth below PATH
        #[arg(long, value_name = "N")]
        max_depth: Option<usize>,
        /// Number of worker threads
        #[arg(long, value_name = "N")]
        threads: Option<usize>,
    },
    /// Recognize a single file
    Parse {
        file: PathBuf,
        /// Leave dependencies and related packages out of the record
        #[arg(long)]
        no_deps: bool,
    },
    /// List the known package types in recognition order
    Types,
}

fn main() -> PkgResult<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    info!("Starting pkgnorm v{}", env!("CARGO_PKG_VERSION"));

    let ctx = CommandContext::new()?;
    commands::dispatch_command(cli.command, &ctx)
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "pkgnorm={level},pkgnorm_core={level},pkgnorm_registry={level},pkgnorm_manifest={level}"
        ))
    });

    // stdout carries the JSON records
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("pkgnorm encountered an unexpected error: {}", panic_info);
        eprintln!("pkgnorm crashed! This is a bug.");
        eprintln!("Please report this at: {}/issues", env!("CARGO_PKG_REPOSITORY"));
        eprintln!("Error: {}", panic_info);
    }));
}
