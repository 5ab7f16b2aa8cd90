//! Supported manifest formats

pub mod composer;
pub mod npm;

pub use composer::{Composer, ComposerParser};
pub use npm::{Npm, NpmParser};
