//! Closed enumerations for the choice fields of the package model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a package is packaged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Packaging {
    Archive,
    Directory,
    File,
}

/// The type of payload a package carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadType {
    Source,
    /// Binaries, including minified JavaScript and similar obfuscated text
    Binary,
    Doc,
}

/// Version control tool for a package repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VcsTool {
    Git,
    Svn,
    Hg,
    Bzr,
    Cvs,
    Fossil,
}

impl Packaging {
    pub fn as_str(&self) -> &'static str {
        match self {
            Packaging::Archive => "archive",
            Packaging::Directory => "directory",
            Packaging::File => "file",
        }
    }
}

impl PayloadType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadType::Source => "source",
            PayloadType::Binary => "binary",
            PayloadType::Doc => "doc",
        }
    }
}

impl VcsTool {
    pub fn as_str(&self) -> &'static str {
        match self {
            VcsTool::Git => "git",
            VcsTool::Svn => "svn",
            VcsTool::Hg => "hg",
            VcsTool::Bzr => "bzr",
            VcsTool::Cvs => "cvs",
            VcsTool::Fossil => "fossil",
        }
    }

    /// Map a manifest's free-text repository type to a known tool
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "git" => Some(VcsTool::Git),
            "svn" | "subversion" => Some(VcsTool::Svn),
            "hg" | "mercurial" => Some(VcsTool::Hg),
            "bzr" | "bazaar" => Some(VcsTool::Bzr),
            "cvs" => Some(VcsTool::Cvs),
            "fossil" => Some(VcsTool::Fossil),
            _ => None,
        }
    }
}

impl fmt::Display for Packaging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for VcsTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vcs_tool_from_name() {
        assert_eq!(VcsTool::from_name("git"), Some(VcsTool::Git));
        assert_eq!(VcsTool::from_name(" Mercurial "), Some(VcsTool::Hg));
        assert_eq!(VcsTool::from_name("SVN"), Some(VcsTool::Svn));
        assert_eq!(VcsTool::from_name("darcs"), None);
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(serde_json::to_string(&Packaging::Archive).unwrap(), "\"archive\"");
        assert_eq!(serde_json::to_string(&PayloadType::Doc).unwrap(), "\"doc\"");
        assert_eq!(serde_json::to_string(&VcsTool::Fossil).unwrap(), "\"fossil\"");
    }
}
