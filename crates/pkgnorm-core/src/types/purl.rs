//! Package URLs.
//!
//! A package URL names a package across ecosystems in one string:
//! `type:namespace/name@version?qualifiers#subpath`. See
//! <https://github.com/package-url/purl-spec>.
//!
//! Components are normalized when set, so two equal package URLs always
//! display the same way and parsing a displayed URL gives it back.

use crate::error::{PkgError, PkgResult};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Characters left as-is in an encoded component
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_');

/// Types whose names are case-insensitive
const CASE_INSENSITIVE_TYPES: &[&str] = &["bitbucket", "github", "pypi"];

/// A parsed package URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageUrl {
    package_type: String,
    namespace: Option<String>,
    name: String,
    version: Option<String>,
    qualifiers: BTreeMap<String, String>,
    subpath: Option<String>,
}

/// Split on `/`, dropping blank segments and, when `relative` is set, `.` and `..`
fn segments(path: &str, relative: bool) -> Vec<&str> {
    path.split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| !relative || !matches!(*s, "." | ".."))
        .collect()
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl PackageUrl {
    /// Create a package URL from a type and a name
    pub fn new(package_type: &str, name: &str) -> PkgResult<Self> {
        let package_type = package_type.trim().to_lowercase();
        if package_type.is_empty() {
            return Err(invalid(name, "a type is required"));
        }
        let mut name = name.trim().trim_matches('/').trim().to_string();
        if name.is_empty() {
            return Err(invalid(&package_type, "a name is required"));
        }
        if CASE_INSENSITIVE_TYPES.contains(&package_type.as_str()) {
            name = name.to_lowercase();
        }
        if package_type == "pypi" {
            name = name.replace('_', "-");
        }

        Ok(Self {
            package_type,
            namespace: None,
            name,
            version: None,
            qualifiers: BTreeMap::new(),
            subpath: None,
        })
    }

    /// Set the namespace; blank segments are dropped
    pub fn with_namespace(mut self, namespace: &str) -> Self {
        let mut namespace = segments(namespace, false).join("/");
        if matches!(self.package_type.as_str(), "bitbucket" | "github") {
            namespace = namespace.to_lowercase();
        }
        self.namespace = (!namespace.is_empty()).then_some(namespace);
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = non_blank(version);
        self
    }

    /// Add a qualifier; keys are case-insensitive and blank pairs are ignored
    pub fn with_qualifier(mut self, key: &str, value: &str) -> Self {
        if let (Some(key), Some(value)) = (non_blank(key), non_blank(value)) {
            self.qualifiers.insert(key.to_lowercase(), value);
        }
        self
    }

    /// Set the subpath; `.` and `..` segments are dropped
    pub fn with_subpath(mut self, subpath: &str) -> Self {
        let subpath = segments(subpath, true).join("/");
        self.subpath = (!subpath.is_empty()).then_some(subpath);
        self
    }

    pub fn package_type(&self) -> &str {
        &self.package_type
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn qualifiers(&self) -> &BTreeMap<String, String> {
        &self.qualifiers
    }

    pub fn subpath(&self) -> Option<&str> {
        self.subpath.as_deref()
    }
}

fn invalid(input: &str, reason: &str) -> PkgError {
    PkgError::InvalidPackageUrl {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

fn write_segments(f: &mut fmt::Formatter<'_>, path: &str) -> fmt::Result {
    for (i, segment) in path.split('/').enumerate() {
        if i > 0 {
            f.write_str("/")?;
        }
        write!(f, "{}", utf8_percent_encode(segment, SEGMENT))?;
    }
    Ok(())
}

impl fmt::Display for PackageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.package_type)?;
        if let Some(namespace) = &self.namespace {
            write_segments(f, namespace)?;
            f.write_str("/")?;
        }
        write!(f, "{}", utf8_percent_encode(&self.name, SEGMENT))?;

        if let Some(version) = &self.version {
            write!(f, "@{}", utf8_percent_encode(version, SEGMENT))?;
        }

        for (i, (key, value)) in self.qualifiers.iter().enumerate() {
            let separator = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", separator, key, utf8_percent_encode(value, SEGMENT))?;
        }

        if let Some(subpath) = &self.subpath {
            f.write_str("#")?;
            write_segments(f, subpath)?;
        }
        Ok(())
    }
}

impl FromStr for PackageUrl {
    type Err = PkgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decode = |raw: &str| -> PkgResult<String> {
            percent_decode_str(raw)
                .decode_utf8()
                .map(|decoded| decoded.into_owned())
                .map_err(|e| invalid(s, &format!("invalid percent-encoding: {}", e)))
        };

        let purl = s.trim().trim_matches('/');
        if purl.is_empty() {
            return Err(invalid(s, "a package URL is required"));
        }

        let (head, subpath) = match purl.rsplit_once('#') {
            Some((head, subpath)) => (head, Some(subpath)),
            None => (purl, None),
        };
        let (head, qualifiers) = match head.rsplit_once('?') {
            Some((head, qualifiers)) => (head, Some(qualifiers)),
            None => (head, None),
        };

        // only an `@` after the last `/` starts the version
        let name_start = head.rfind('/').map_or(0, |i| i + 1);
        let (head, version) = match head[name_start..].rfind('@') {
            Some(at) => (&head[..name_start + at], Some(&head[name_start + at + 1..])),
            None => (head, None),
        };

        let Some((package_type, path)) = head.split_once(':') else {
            return Err(invalid(s, "the type is missing"));
        };

        let mut parts = segments(path, false)
            .into_iter()
            .map(&decode)
            .collect::<PkgResult<Vec<_>>>()?;
        let name = parts.pop().ok_or_else(|| invalid(s, "the name is missing"))?;

        let mut package_url = PackageUrl::new(package_type, &name)
            .map_err(|_| invalid(s, "the type or name is blank"))?
            .with_namespace(&parts.join("/"));

        if let Some(version) = version {
            package_url = package_url.with_version(&decode(version)?);
        }
        for pair in qualifiers.into_iter().flat_map(|q| q.split('&')) {
            if let Some((key, value)) = pair.split_once('=') {
                package_url = package_url.with_qualifier(key, &decode(value)?);
            }
        }
        if let Some(subpath) = subpath {
            let decoded = segments(subpath, true)
                .into_iter()
                .map(&decode)
                .collect::<PkgResult<Vec<_>>>()?;
            package_url = package_url.with_subpath(&decoded.join("/"));
        }
        Ok(package_url)
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn parse_inverts_display(
            package_type in "[a-z]{1,8}",
            namespace in proptest::option::of("[A-Za-z0-9@ ._-]{1,8}(/[A-Za-z0-9._-]{1,8})?"),
            name in "[A-Za-z0-9@:+ ._-]{0,8}[A-Za-z0-9]",
            version in proptest::option::of("[A-Za-z0-9:+~ ._-]{1,10}"),
            qualifier in proptest::option::of(("[a-z]{1,6}", "[A-Za-z0-9=&?#/ ._-]{1,10}")),
        ) {
            let mut purl = PackageUrl::new(&package_type, &name).unwrap();
            if let Some(namespace) = &namespace {
                purl = purl.with_namespace(namespace);
            }
            if let Some(version) = &version {
                purl = purl.with_version(version);
            }
            if let Some((key, value)) = &qualifier {
                purl = purl.with_qualifier(key, value);
            }

            let parsed: PackageUrl = purl.to_string().parse().unwrap();
            prop_assert_eq!(parsed, purl);
        }
    }
}
