//! Version comparison schemes.
//!
//! Package versions are always stored and serialized as plain strings.
//! A [`VersionScheme`] decides how two of those strings compare and what
//! the component-level view of a version is.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;

/// Width every numeric run is padded to in a sortable version
const SORTABLE_DIGITS: usize = 20;

/// How the versions of a package type compare
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionScheme {
    /// Plain string comparison
    #[default]
    Lexical,
    /// Semantic versioning (major.minor.patch-prerelease+build)
    Semantic,
    /// RPM style `epoch:version-release`
    Evr,
}

impl VersionScheme {
    /// Compare two version strings under this scheme
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            VersionScheme::Lexical => a.cmp(b),
            VersionScheme::Semantic => compare_semantic(a, b),
            VersionScheme::Evr => compare_evr(a, b),
        }
    }

    /// Get the component-level view of a version
    pub fn component<'a>(&self, version: &'a str) -> Cow<'a, str> {
        match self {
            VersionScheme::Lexical => Cow::Borrowed(version),
            VersionScheme::Semantic => match version.split_once('+') {
                Some((core, _build)) => Cow::Borrowed(core),
                None => Cow::Borrowed(version),
            },
            VersionScheme::Evr => Cow::Borrowed(Evr::parse(version).version),
        }
    }
}

fn parse_semantic(version: &str) -> Option<semver::Version> {
    let trimmed = version.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
    semver::Version::parse(trimmed).ok()
}

/// Parsable versions sort after unparsable ones
fn compare_semantic(a: &str, b: &str) -> Ordering {
    match (parse_semantic(a), parse_semantic(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp(b),
    }
}

/// A parsed RPM `epoch:version-release` string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evr<'a> {
    pub epoch: &'a str,
    pub version: &'a str,
    pub release: &'a str,
}

impl<'a> Evr<'a> {
    /// Split an EVR string. A missing epoch reads as "0", a missing release as "".
    pub fn parse(input: &'a str) -> Self {
        let input = input.trim();
        let (epoch, rest) = match input.split_once(':') {
            Some((epoch, rest)) if !epoch.is_empty() && epoch.bytes().all(|b| b.is_ascii_digit()) => {
                (epoch, rest)
            },
            _ => ("0", input),
        };
        let (version, release) = match rest.rsplit_once('-') {
            Some((version, release)) => (version, release),
            None => (rest, ""),
        };
        Self {
            epoch,
            version,
            release,
        }
    }
}

fn compare_evr(a: &str, b: &str) -> Ordering {
    let x = Evr::parse(a);
    let y = Evr::parse(b);
    rpmvercmp(x.epoch, y.epoch)
        .then_with(|| rpmvercmp(x.version, y.version))
        .then_with(|| rpmvercmp(x.release, y.release))
}

/// Split into maximal runs of ASCII digits or ASCII letters; everything else separates
fn segments(version: &str) -> Vec<&str> {
    let bytes = version.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_alphanumeric() {
            i += 1;
            continue;
        }
        let numeric = bytes[i].is_ascii_digit();
        let start = i;
        while i < bytes.len()
            && bytes[i].is_ascii_alphanumeric()
            && bytes[i].is_ascii_digit() == numeric
        {
            i += 1;
        }
        out.push(&version[start..i]);
    }
    out
}

fn compare_segment(a: &str, b: &str) -> Ordering {
    let a_numeric = a.bytes().all(|c| c.is_ascii_digit());
    let b_numeric = b.bytes().all(|c| c.is_ascii_digit());
    match (a_numeric, b_numeric) {
        (true, true) => {
            let a = a.trim_start_matches('0');
            let b = b.trim_start_matches('0');
            a.len().cmp(&b.len()).then_with(|| a.cmp(b))
        },
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp(b),
    }
}

/// RPM segment comparison: numeric beats alpha, and the longer version wins a tie
pub fn rpmvercmp(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    let left = segments(a);
    let right = segments(b);
    for (x, y) in left.iter().zip(right.iter()) {
        let ordering = compare_segment(x, y);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    left.len().cmp(&right.len())
}

/// Zero-pad every digit run so plain string order follows numeric order.
///
/// "1.10" becomes "00000000000000000001.00000000000000000010".
pub fn sortable_version(version: &str) -> String {
    let mut out = String::with_capacity(version.len() * 2);
    let mut digits = String::new();

    let flush = |digits: &mut String, out: &mut String| {
        if digits.is_empty() {
            return;
        }
        let significant = digits.trim_start_matches('0');
        let significant = if significant.is_empty() { "0" } else { significant };
        for _ in significant.len()..SORTABLE_DIGITS {
            out.push('0');
        }
        out.push_str(significant);
        digits.clear();
    };

    for c in version.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else {
            flush(&mut digits, &mut out);
            out.push(c);
        }
    }
    flush(&mut digits, &mut out);
    out
}
