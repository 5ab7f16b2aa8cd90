//! Utility functions and helpers.
//!
//! Common functionality used across multiple pkgnorm crates.

pub mod path;

// Re-export commonly used utilities
pub use path::{base_name, file_name, get_extension, parent_directory, split_extension};
