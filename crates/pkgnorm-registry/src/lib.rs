//! # pkgnorm-registry
//!
//! Ordered catalogue of package types and the file-signature matching that
//! decides which type a file on disk belongs to.
//!
//! Content sniffing is not done here: callers supply file signals through
//! a [`FileClassifier`]. Manifest parsing is not done here either: parsers
//! plug into a descriptor as a [`Recognizer`].

pub mod catalog;
pub mod classifier;
pub mod descriptor;
pub mod registry;

// Re-export main types
pub use catalog::builtin_descriptors;
pub use classifier::{Candidate, FileClassifier, FileInfo};
pub use descriptor::{Recognizer, Signature, TypeDescriptor};
pub use registry::TypeRegistry;
