//! pkgnorm benchmarking suite
//!
//! Benchmarks for manifest parsing, type recognition and version
//! comparison.

pub mod common;

pub use common::*;
