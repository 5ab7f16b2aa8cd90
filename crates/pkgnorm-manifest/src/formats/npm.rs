//! npm `package.json` manifests.
//!
//! See <https://docs.npmjs.com/files/package.json>.

use crate::license::LicenseValue;
use crate::people::{person_from_value, persons_from_value};
use crate::protocol::{ManifestFormat, ManifestParser, Mapper, PlainField};
use crate::repo_url::normalize_repo_url;
use crate::values::{is_blank, kind, member, raw_text, text, MapResult};
use pkgnorm_core::{Dependency, DependencyGroup, Package, VcsTool};
use serde_json::{Map, Value};

const REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Field tables of `package.json`
pub struct Npm;

/// Parser for `package.json`
pub type NpmParser = ManifestParser<Npm>;

impl ManifestFormat for Npm {
    const METAFILE: &'static str = "package.json";

    const PLAIN_FIELDS: &'static [(&'static str, PlainField)] = &[
        ("name", PlainField::Name),
        ("version", PlainField::Version),
        ("description", PlainField::Summary),
        ("keywords", PlainField::Keywords),
        ("homepage", PlainField::HomepageUrl),
    ];

    const FIELD_MAPPERS: &'static [(&'static str, Mapper)] = &[
        ("author", map_author),
        ("bugs", map_bugs),
        ("contributors", map_contributors),
        ("maintainers", map_maintainers),
        ("license", map_license),
        ("licenses", map_license),
        ("dependencies", map_dependencies),
        ("devDependencies", map_dev_dependencies),
        ("peerDependencies", map_optional_dependencies),
        ("optionalDependencies", map_optional_dependencies),
        ("bundledDependencies", map_bundled_dependencies),
        ("bundleDependencies", map_bundled_dependencies),
        ("dist", map_dist),
        ("repository", map_repository),
    ];

    /// Only published packages carry both a name and a version
    fn is_applicable(document: &Map<String, Value>) -> bool {
        ["name", "version"]
            .iter()
            .all(|key| document.get(*key).is_some_and(|v| !is_blank(v)))
    }

    /// Point at the registry tarball when `dist` did not
    fn derive(package: &mut Package) {
        if !package.download_urls.is_empty() {
            return;
        }
        let Some(version) = package.version.as_deref() else {
            return;
        };
        let base = package.name.rsplit('/').next().unwrap_or(&package.name);
        let url = format!("{}/{}/-/{}-{}.tgz", REGISTRY_URL, package.name, base, version);
        package.download_urls.push(url);
    }
}

fn map_author(value: &Value, package: &mut Package) -> MapResult {
    let author = person_from_value(value, "url")?;
    if !author.is_empty() {
        package.authors.push(author);
    }
    Ok(())
}

fn map_contributors(value: &Value, package: &mut Package) -> MapResult {
    package.contributors.extend(persons_from_value(value, "url")?);
    Ok(())
}

fn map_maintainers(value: &Value, package: &mut Package) -> MapResult {
    package.maintainers.extend(persons_from_value(value, "url")?);
    Ok(())
}

fn map_bugs(value: &Value, package: &mut Package) -> MapResult {
    match value {
        Value::String(_) => package.bug_tracking_url = text(value)?,
        Value::Object(_) => {
            package.bug_tracking_url = member(value, "url")?;
            if let Some(email) = member(value, "email")? {
                package.support_contacts.push(email);
            }
        },
        other => return Err(format!("expected a url or an object, found {}", kind(other))),
    }
    Ok(())
}

/// Several licenses are listed one per line
fn map_license(value: &Value, package: &mut Package) -> MapResult {
    if let Some(license) = LicenseValue::from_legacy_value(value).join("\n") {
        package.asserted_license = Some(match package.asserted_license.take() {
            // both `license` and legacy `licenses` were declared
            Some(existing) => format!("{}\n{}", existing, license),
            None => license,
        });
    }
    Ok(())
}

fn map_links(value: &Value, package: &mut Package, group: DependencyGroup) -> MapResult {
    let Value::Object(links) = value else {
        return Err(format!("expected an object of dependencies, found {}", kind(value)));
    };
    for (name, constraint) in links {
        let dependency = Dependency {
            name: name.clone(),
            version_constraint: raw_text(constraint)
                .map_err(|e| format!("'{}' {}", name, e))?,
        };
        package.add_dependency(group, dependency);
    }
    Ok(())
}

fn map_dependencies(value: &Value, package: &mut Package) -> MapResult {
    map_links(value, package, DependencyGroup::Runtime)
}

fn map_dev_dependencies(value: &Value, package: &mut Package) -> MapResult {
    map_links(value, package, DependencyGroup::Development)
}

fn map_optional_dependencies(value: &Value, package: &mut Package) -> MapResult {
    map_links(value, package, DependencyGroup::Optional)
}

fn map_bundled_dependencies(value: &Value, package: &mut Package) -> MapResult {
    match value {
        // `true` bundles every runtime dependency; nothing new is declared
        Value::Bool(_) => Ok(()),
        Value::Array(names) => {
            for name in names {
                if let Some(name) = text(name)? {
                    package.add_dependency(DependencyGroup::Bundled, Dependency::unconstrained(name));
                }
            }
            Ok(())
        },
        other => Err(format!("expected a list of package names, found {}", kind(other))),
    }
}

fn map_dist(value: &Value, package: &mut Package) -> MapResult {
    let Value::Object(_) = value else {
        return Err(format!("expected an object, found {}", kind(value)));
    };
    package.download_sha1 = member(value, "shasum")?;
    if let Some(tarball) = member(value, "tarball")? {
        package.download_urls.push(tarball);
    }
    Ok(())
}

fn map_repository(value: &Value, package: &mut Package) -> MapResult {
    match value {
        Value::String(url) => {
            package.vcs_repository = normalize_repo_url(url);
            package.vcs_tool = package.vcs_repository.as_ref().map(|_| VcsTool::Git);
        },
        Value::Object(_) => {
            let Some(url) = member(value, "url")? else {
                return Ok(());
            };
            let tool = member(value, "type")?
                .and_then(|name| VcsTool::from_name(&name))
                .unwrap_or(VcsTool::Git);
            package.vcs_tool = Some(tool);
            package.vcs_repository = normalize_repo_url(&url);
        },
        other => return Err(format!("expected a url or an object, found {}", kind(other))),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgnorm_core::{PkgError, VersionScheme};
    use pkgnorm_registry::TypeDescriptor;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new("npm")
            .language("JavaScript")
            .version_scheme(VersionScheme::Semantic)
    }

    fn parse(content: &str) -> Option<Package> {
        NpmParser::new()
            .parse_str(Path::new("package.json"), content, &descriptor())
            .unwrap()
    }

    #[test]
    fn test_typical_manifest() {
        let package = parse(
            r#"{
                "name": "cookie-signature",
                "version": "1.0.3",
                "description": "Sign and unsign cookies",
                "keywords": ["cookie", "sign", "unsign"],
                "author": "TJ Holowaychuk <tj@learnboost.com>",
                "license": "MIT",
                "repository": {"type": "git", "url": "https://github.com/visionmedia/node-cookie-signature.git"},
                "dependencies": {},
                "devDependencies": {"mocha": "*", "should": "*"},
                "main": "index"
            }"#,
        )
        .unwrap();

        assert_eq!(package.package_type, "npm");
        assert_eq!(package.name, "cookie-signature");
        assert_eq!(package.version.as_deref(), Some("1.0.3"));
        assert_eq!(package.summary.as_deref(), Some("Sign and unsign cookies"));
        assert_eq!(package.keywords, vec!["cookie", "sign", "unsign"]);
        assert_eq!(package.asserted_license.as_deref(), Some("MIT"));
        assert_eq!(package.authors.len(), 1);
        assert_eq!(package.authors[0].email.as_deref(), Some("tj@learnboost.com"));
        assert_eq!(package.vcs_tool, Some(VcsTool::Git));
        assert_eq!(
            package.vcs_repository.as_deref(),
            Some("https://github.com/visionmedia/node-cookie-signature.git")
        );
        assert!(package.dependencies_in(DependencyGroup::Runtime).is_empty());
        assert_eq!(
            package.dependencies_in(DependencyGroup::Development),
            &[Dependency::new("mocha", "*"), Dependency::new("should", "*")]
        );
        assert_eq!(
            package.download_urls,
            vec!["https://registry.npmjs.org/cookie-signature/-/cookie-signature-1.0.3.tgz"]
        );
        assert_eq!(package.version_scheme, VersionScheme::Semantic);
    }

    #[test]
    fn test_requires_name_and_version() {
        assert!(parse(r#"{"name": "widget"}"#).is_none());
        assert!(parse(r#"{"version": "1.0.0"}"#).is_none());
        assert!(parse(r#"{"name": "", "version": "1.0.0"}"#).is_none());
    }

    #[test]
    fn test_scoped_tarball_url() {
        let package = parse(r#"{"name": "@babel/core", "version": "7.0.0"}"#).unwrap();
        assert_eq!(
            package.download_urls,
            vec!["https://registry.npmjs.org/@babel/core/-/core-7.0.0.tgz"]
        );
    }

    #[test]
    fn test_dist_wins_over_registry_url() {
        let package = parse(
            r#"{"name": "a", "version": "1.0.0",
                "dist": {"shasum": "abc123", "tarball": "https://example.com/a-1.0.0.tgz"}}"#,
        )
        .unwrap();
        assert_eq!(package.download_sha1.as_deref(), Some("abc123"));
        assert_eq!(package.download_urls, vec!["https://example.com/a-1.0.0.tgz"]);
    }

    #[test]
    fn test_people() {
        let package = parse(
            r#"{"name": "a", "version": "1.0.0",
                "author": {"name": "Isaac Z. Schlueter", "email": "i@izs.me", "url": "http://blog.izs.me"},
                "contributors": ["Ben <ben@example.com>", {"name": "Cat"}],
                "maintainers": {"name": "Dan"}}"#,
        )
        .unwrap();
        assert_eq!(package.authors[0].url.as_deref(), Some("http://blog.izs.me"));
        assert_eq!(package.contributors.len(), 2);
        assert_eq!(package.maintainers.len(), 1);
        assert_eq!(package.maintainers[0].name.as_deref(), Some("Dan"));
    }

    #[test]
    fn test_bugs() {
        let url = parse(r#"{"name": "a", "version": "1", "bugs": "https://example.com/issues"}"#).unwrap();
        assert_eq!(url.bug_tracking_url.as_deref(), Some("https://example.com/issues"));

        let object = parse(
            r#"{"name": "a", "version": "1", "bugs": {"url": "https://example.com/issues", "email": "bugs@example.com"}}"#,
        )
        .unwrap();
        assert_eq!(object.bug_tracking_url.as_deref(), Some("https://example.com/issues"));
        assert_eq!(object.support_contacts, vec!["bugs@example.com"]);

        let err = NpmParser::new()
            .parse_str(Path::new("package.json"), r#"{"name": "a", "version": "1", "bugs": 7}"#, &descriptor())
            .unwrap_err();
        assert!(matches!(err, PkgError::ManifestShape { ref field, .. } if field == "bugs"));
    }

    #[test]
    fn test_legacy_licenses() {
        let package = parse(
            r#"{"name": "a", "version": "1",
                "licenses": [{"type": "MIT", "url": "http://opensource.org/licenses/MIT"}, "BSD"]}"#,
        )
        .unwrap();
        assert_eq!(
            package.asserted_license.as_deref(),
            Some("MIT\nhttp://opensource.org/licenses/MIT\nBSD")
        );
    }

    #[test]
    fn test_dependency_groups() {
        let package = parse(
            r#"{"name": "a", "version": "1",
                "dependencies": {"express": "^4.0.0"},
                "peerDependencies": {"react": ">=16"},
                "optionalDependencies": {"fsevents": "*"},
                "bundledDependencies": ["express"],
                "bundleDependencies": true}"#,
        )
        .unwrap();
        let groups: Vec<_> = package.dependencies.keys().copied().collect();
        assert_eq!(
            groups,
            vec![DependencyGroup::Runtime, DependencyGroup::Optional, DependencyGroup::Bundled]
        );
        assert_eq!(package.dependencies_in(DependencyGroup::Optional).len(), 2);
        assert_eq!(
            package.dependencies_in(DependencyGroup::Bundled),
            &[Dependency::unconstrained("express")]
        );
    }

    #[test]
    fn test_repository_shortcuts() {
        let short = parse(r#"{"name": "q", "version": "1", "repository": "github:kriskowal/q"}"#).unwrap();
        assert_eq!(short.vcs_repository.as_deref(), Some("https://github.com/kriskowal/q"));
        assert_eq!(short.vcs_tool, Some(VcsTool::Git));

        let svn = parse(
            r#"{"name": "q", "version": "1", "repository": {"type": "svn", "url": "svn://example.org/q"}}"#,
        )
        .unwrap();
        assert_eq!(svn.vcs_tool, Some(VcsTool::Svn));
    }

    #[test]
    fn test_parse_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, r#"{"name": "left-pad", "version": "1.3.0"}"#).unwrap();

        let package = NpmParser::new().parse(&path, &descriptor()).unwrap().unwrap();
        assert_eq!(package.identifier().to_string(), "npm|left-pad|1.3.0");
        assert_eq!(package.location.as_deref(), Some(dir.path()));
    }
}
