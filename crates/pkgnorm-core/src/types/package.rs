//! The canonical package record.
//!
//! Every manifest format is normalized into a [`Package`]. Fields serialize
//! in the fixed order of [`FIELD_ORDER`]; absent values serialize as `null`
//! and list fields as empty arrays so the output shape never varies.

use super::{
    sortable_version, Dependency, DependencyGroup, PackageId, PackageUrl, Packaging, Party,
    PayloadType, VcsTool, VersionScheme,
};
use crate::error::PkgResult;
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::PathBuf;

/// Serialized field order of a [`Package`]
pub const FIELD_ORDER: [&str; 37] = [
    "type",
    "name",
    "version",
    "primary_language",
    "packaging",
    "summary",
    "description",
    "payload_type",
    "size",
    "release_date",
    "authors",
    "maintainers",
    "contributors",
    "owners",
    "packagers",
    "distributors",
    "vendors",
    "keywords",
    "keywords_doc_url",
    "homepage_url",
    "download_urls",
    "download_sha1",
    "download_sha256",
    "download_md5",
    "bug_tracking_url",
    "support_contacts",
    "code_view_url",
    "vcs_tool",
    "vcs_repository",
    "vcs_revision",
    "copyrights",
    "asserted_license",
    "license_expression",
    "license_texts",
    "notice_text",
    "dependencies",
    "related_packages",
];

/// Whether serialization includes dependencies and related packages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Relations {
    #[default]
    Include,
    Omit,
}

/// Reduced package record used for related packages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasePackage {
    #[serde(rename = "type")]
    pub package_type: String,
    pub name: String,
    pub version: Option<String>,
    pub payload_type: Option<PayloadType>,
}

/// Canonical package record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    #[serde(rename = "type")]
    pub package_type: String,
    pub name: String,
    pub version: Option<String>,
    pub primary_language: Option<String>,
    pub packaging: Option<Packaging>,
    /// Short description
    pub summary: Option<String>,
    /// Long description, often several pages of text
    pub description: Option<String>,
    pub payload_type: Option<PayloadType>,
    /// Download size in bytes
    pub size: Option<u64>,
    pub release_date: Option<NaiveDate>,

    pub authors: Vec<Party>,
    pub maintainers: Vec<Party>,
    pub contributors: Vec<Party>,
    pub owners: Vec<Party>,
    pub packagers: Vec<Party>,
    pub distributors: Vec<Party>,
    pub vendors: Vec<Party>,

    pub keywords: Vec<String>,
    /// Reference documentation for keywords (such as a trove classifier map)
    pub keywords_doc_url: Option<String>,

    pub homepage_url: Option<String>,
    /// The first URL is the primary download URL
    pub download_urls: Vec<String>,
    pub download_sha1: Option<String>,
    pub download_sha256: Option<String>,
    pub download_md5: Option<String>,

    pub bug_tracking_url: Option<String>,
    /// Emails, URLs and similar support contacts
    pub support_contacts: Vec<String>,
    pub code_view_url: Option<String>,

    pub vcs_tool: Option<VcsTool>,
    pub vcs_repository: Option<String>,
    pub vcs_revision: Option<String>,

    pub copyrights: Vec<String>,

    /// License text as asserted by the package, never interpreted
    pub asserted_license: Option<String>,
    pub license_expression: Option<String>,
    pub license_texts: Vec<String>,
    pub notice_text: Option<String>,

    /// Declared dependencies by group, in manifest order
    pub dependencies: IndexMap<DependencyGroup, Vec<Dependency>>,
    pub related_packages: Vec<BasePackage>,

    /// Directory the package was found in
    #[serde(skip)]
    pub location: Option<PathBuf>,

    #[serde(skip)]
    pub version_scheme: VersionScheme,
}

impl BasePackage {
    pub fn new(package_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package_type: package_type.into(),
            name: name.into(),
            version: None,
            payload_type: None,
        }
    }

    pub fn identifier(&self) -> PackageId {
        PackageId::new(&self.package_type, &self.name, self.version.clone())
    }
}

impl Package {
    /// Create an empty package of a type
    pub fn new(package_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package_type: package_type.into(),
            name: name.into(),
            version: None,
            primary_language: None,
            packaging: None,
            summary: None,
            description: None,
            payload_type: None,
            size: None,
            release_date: None,
            authors: Vec::new(),
            maintainers: Vec::new(),
            contributors: Vec::new(),
            owners: Vec::new(),
            packagers: Vec::new(),
            distributors: Vec::new(),
            vendors: Vec::new(),
            keywords: Vec::new(),
            keywords_doc_url: None,
            homepage_url: None,
            download_urls: Vec::new(),
            download_sha1: None,
            download_sha256: None,
            download_md5: None,
            bug_tracking_url: None,
            support_contacts: Vec::new(),
            code_view_url: None,
            vcs_tool: None,
            vcs_repository: None,
            vcs_revision: None,
            copyrights: Vec::new(),
            asserted_license: None,
            license_expression: None,
            license_texts: Vec::new(),
            notice_text: None,
            dependencies: IndexMap::new(),
            related_packages: Vec::new(),
            location: None,
            version_scheme: VersionScheme::default(),
        }
    }

    /// Derive the identifier from the current type, name and version
    pub fn identifier(&self) -> PackageId {
        PackageId::new(&self.package_type, &self.name, self.version.clone())
    }

    /// Derive the package URL.
    ///
    /// The text before the last `/` of the name becomes the namespace and
    /// blanks in the type become dashes.
    pub fn purl(&self) -> PkgResult<PackageUrl> {
        let package_type = self.package_type.split_whitespace().collect::<Vec<_>>().join("-");
        let (namespace, name) = match self.name.rsplit_once('/') {
            Some((namespace, name)) => (namespace, name),
            None => ("", self.name.as_str()),
        };
        let mut purl = PackageUrl::new(&package_type, name)?.with_namespace(namespace);
        if let Some(version) = &self.version {
            purl = purl.with_version(version);
        }
        Ok(purl)
    }

    /// Reduce to the base record
    pub fn to_base(&self) -> BasePackage {
        BasePackage {
            package_type: self.package_type.clone(),
            name: self.name.clone(),
            version: self.version.clone(),
            payload_type: self.payload_type,
        }
    }

    /// Get the component-level version
    pub fn component_version(&self) -> Option<String> {
        self.version
            .as_deref()
            .map(|v| self.version_scheme.component(v).into_owned())
    }

    /// Compare this package's version with another package's version.
    ///
    /// Packages with different version schemes compare lexically. An absent
    /// version sorts before any present one.
    pub fn compare_version(&self, other: &Package, component_level: bool) -> Ordering {
        let scheme = if self.version_scheme == other.version_scheme {
            self.version_scheme
        } else {
            VersionScheme::Lexical
        };

        let (x, y) = if component_level {
            (self.component_version(), other.component_version())
        } else {
            (self.version.clone(), other.version.clone())
        };

        match (x, y) {
            (Some(x), Some(y)) => scheme.compare(&x, &y),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    /// Key for deterministic sorting: type, name, then numeric-aware version
    pub fn sort_key(&self) -> (String, String, String) {
        (
            self.package_type.clone(),
            self.name.clone(),
            self.version.as_deref().map(sortable_version).unwrap_or_default(),
        )
    }

    /// Append a dependency to a group, creating the group on first use
    pub fn add_dependency(&mut self, group: DependencyGroup, dependency: Dependency) {
        self.dependencies.entry(group).or_default().push(dependency);
    }

    /// Get the dependencies declared in a group
    pub fn dependencies_in(&self, group: DependencyGroup) -> &[Dependency] {
        self.dependencies
            .get(&group)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Serialize to a JSON value in field order
    pub fn to_value(&self, relations: Relations) -> serde_json::Result<serde_json::Value> {
        let mut value = serde_json::to_value(self)?;
        if relations == Relations::Omit {
            if let Some(map) = value.as_object_mut() {
                map.retain(|key, _| key != "dependencies" && key != "related_packages");
            }
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versioned(version: Option<&str>, scheme: VersionScheme) -> Package {
        let mut pkg = Package::new("RPM", "bash");
        pkg.version = version.map(str::to_string);
        pkg.version_scheme = scheme;
        pkg
    }

    #[test]
    fn test_new_package_defaults() {
        let pkg = Package::new("phpcomposer", "acme/widget");
        assert_eq!(pkg.package_type, "phpcomposer");
        assert!(pkg.authors.is_empty());
        assert!(pkg.dependencies.is_empty());
        assert_eq!(pkg.version_scheme, VersionScheme::Lexical);
    }

    #[test]
    fn test_fresh_containers_per_instance() {
        let mut a = Package::new("npm", "a");
        let b = Package::new("npm", "b");
        a.keywords.push("web".to_string());
        a.add_dependency(DependencyGroup::Runtime, Dependency::unconstrained("q"));
        assert!(b.keywords.is_empty());
        assert!(b.dependencies.is_empty());
    }

    #[test]
    fn test_identifier_is_derived_at_call_time() {
        let mut pkg = Package::new("npm", "q");
        assert_eq!(pkg.identifier(), pkg.identifier());
        assert_eq!(pkg.identifier().to_string(), "npm|q|");

        pkg.version = Some("1.4.1".to_string());
        assert_eq!(pkg.identifier().to_string(), "npm|q|1.4.1");
    }

    #[test]
    fn test_compare_version_uses_both_operands() {
        let one = versioned(Some("1"), VersionScheme::Lexical);
        let two = versioned(Some("2"), VersionScheme::Lexical);
        let zero = versioned(Some("0"), VersionScheme::Lexical);

        assert_eq!(one.compare_version(&two, false), Ordering::Less);
        assert_eq!(one.compare_version(&one, false), Ordering::Equal);
        assert_eq!(one.compare_version(&zero, false), Ordering::Greater);
    }

    #[test]
    fn test_compare_version_absent_sorts_first() {
        let none = versioned(None, VersionScheme::Evr);
        let some = versioned(Some("1.0-1"), VersionScheme::Evr);
        assert_eq!(none.compare_version(&some, false), Ordering::Less);
        assert_eq!(some.compare_version(&none, false), Ordering::Greater);
        assert_eq!(none.compare_version(&none, true), Ordering::Equal);
    }

    #[test]
    fn test_compare_version_component_level() {
        let a = versioned(Some("1:2.5-1"), VersionScheme::Evr);
        let b = versioned(Some("2.5-9"), VersionScheme::Evr);
        assert_eq!(a.compare_version(&b, false), Ordering::Greater);
        assert_eq!(a.compare_version(&b, true), Ordering::Equal);
    }

    #[test]
    fn test_mixed_schemes_compare_lexically() {
        let a = versioned(Some("1.10"), VersionScheme::Evr);
        let b = versioned(Some("1.9"), VersionScheme::Lexical);
        assert_eq!(a.compare_version(&b, false), Ordering::Less);
        assert_eq!(b.compare_version(&a, false), Ordering::Greater);
    }

    #[test]
    fn test_sort_key_orders_numerically() {
        let mut packages = vec![
            versioned(Some("1.10"), VersionScheme::Lexical),
            versioned(Some("1.9"), VersionScheme::Lexical),
            versioned(None, VersionScheme::Lexical),
        ];
        packages.sort_by_key(Package::sort_key);
        let versions: Vec<_> = packages.iter().map(|p| p.version.as_deref()).collect();
        assert_eq!(versions, vec![None, Some("1.9"), Some("1.10")]);
    }

    #[test]
    fn test_serialized_field_order() {
        let pkg = Package::new("npm", "q");
        let value = pkg.to_value(Relations::Include).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, FIELD_ORDER.to_vec());
    }

    #[test]
    fn test_omit_relations() {
        let mut pkg = Package::new("npm", "q");
        pkg.add_dependency(DependencyGroup::Runtime, Dependency::new("a", "^1"));
        pkg.related_packages.push(BasePackage::new("npm", "b"));

        let value = pkg.to_value(Relations::Omit).unwrap();
        let map = value.as_object().unwrap();
        assert!(!map.contains_key("dependencies"));
        assert!(!map.contains_key("related_packages"));
        assert_eq!(map.keys().last().map(String::as_str), Some("notice_text"));
    }

    #[test]
    fn test_dependencies_serialize_by_group() {
        let mut pkg = Package::new("phpcomposer", "acme/widget");
        pkg.add_dependency(DependencyGroup::Development, Dependency::new("phpunit/phpunit", "~4"));
        pkg.add_dependency(DependencyGroup::Runtime, Dependency::new("php", ">=5.3"));

        let value = pkg.to_value(Relations::Include).unwrap();
        let deps = value["dependencies"].as_object().unwrap();
        let groups: Vec<&str> = deps.keys().map(String::as_str).collect();
        assert_eq!(groups, vec!["development", "runtime"]);
        assert_eq!(deps["runtime"][0]["version_constraint"], ">=5.3");
        assert!(pkg.dependencies_in(DependencyGroup::Test).is_empty());
    }

    #[test]
    fn test_purl_splits_namespace() {
        let mut pkg = Package::new("phpcomposer", "acme/widget");
        pkg.version = Some("2.0.0".to_string());
        assert_eq!(pkg.purl().unwrap().to_string(), "phpcomposer:acme/widget@2.0.0");

        let scoped = Package::new("npm", "@babel/core");
        let purl = scoped.purl().unwrap();
        assert_eq!(purl.namespace(), Some("@babel"));
        assert_eq!(purl.to_string(), "npm:%40babel/core");

        let archive = Package::new("plain zip", "acme-widget-2.0.0");
        assert_eq!(archive.purl().unwrap().to_string(), "plain-zip:acme-widget-2.0.0");

        assert!(Package::new("npm", "").purl().is_err());
    }

    #[test]
    fn test_location_is_not_serialized() {
        let mut pkg = Package::new("npm", "q");
        pkg.location = Some(PathBuf::from("/tmp/q"));
        let json = serde_json::to_string(&pkg).unwrap();
        assert!(!json.contains("/tmp/q"));
        assert!(!json.contains("location"));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn any_scheme() -> impl Strategy<Value = VersionScheme> {
        prop_oneof![
            Just(VersionScheme::Lexical),
            Just(VersionScheme::Semantic),
            Just(VersionScheme::Evr),
        ]
    }

    fn package(version: Option<String>, scheme: VersionScheme) -> Package {
        let mut pkg = Package::new("generic", "pkg");
        pkg.version = version;
        pkg.version_scheme = scheme;
        pkg
    }

    proptest! {
        #[test]
        fn compare_version_is_reflexive(
            version in prop::option::of("[0-9a-z.:+-]{0,12}"),
            scheme in any_scheme(),
            component_level in any::<bool>()
        ) {
            let pkg = package(version, scheme);
            prop_assert_eq!(pkg.compare_version(&pkg, component_level), Ordering::Equal);
        }

        #[test]
        fn compare_version_is_antisymmetric(
            a in prop::option::of("[0-9a-z.:+-]{0,12}"),
            b in prop::option::of("[0-9a-z.:+-]{0,12}"),
            a_scheme in any_scheme(),
            b_scheme in any_scheme(),
            component_level in any::<bool>()
        ) {
            let x = package(a, a_scheme);
            let y = package(b, b_scheme);
            prop_assert_eq!(
                x.compare_version(&y, component_level),
                y.compare_version(&x, component_level).reverse()
            );
        }

        #[test]
        fn identifier_is_pure(
            name in "[a-z][a-z0-9-]{0,10}",
            version in prop::option::of("[0-9.]{1,8}")
        ) {
            let mut pkg = Package::new("npm", name);
            pkg.version = version;
            prop_assert_eq!(pkg.identifier(), pkg.identifier());
        }
    }
}
