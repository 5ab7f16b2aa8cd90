//! PHP Composer `composer.json` manifests.
//!
//! See <https://getcomposer.org/doc/04-schema.md>.

use crate::license::LicenseValue;
use crate::people::person_from_value;
use crate::protocol::{ManifestFormat, ManifestParser, Mapper, PlainField};
use crate::repo_url::{infer_vcs_tool, normalize_repo_url};
use crate::values::{kind, member, raw_text, text, MapResult};
use chrono::NaiveDate;
use pkgnorm_core::{Dependency, DependencyGroup, Package, Party};
use serde_json::Value;

/// Field tables of `composer.json`
pub struct Composer;

/// Parser for `composer.json`
pub type ComposerParser = ManifestParser<Composer>;

impl ManifestFormat for Composer {
    const METAFILE: &'static str = "composer.json";

    const PLAIN_FIELDS: &'static [(&'static str, PlainField)] = &[
        ("name", PlainField::Name),
        ("description", PlainField::Summary),
        ("keywords", PlainField::Keywords),
        ("version", PlainField::Version),
        ("homepage", PlainField::HomepageUrl),
    ];

    const FIELD_MAPPERS: &'static [(&'static str, Mapper)] = &[
        ("authors", map_authors),
        ("license", map_license),
        ("require", map_require),
        ("require-dev", map_require_dev),
        ("repositories", map_repositories),
        ("support", map_support),
        ("time", map_time),
    ];

    /// Composer names packages `vendor/project`
    fn derive(package: &mut Package) {
        if let Some((vendor, _)) = package.name.split_once('/') {
            if !vendor.is_empty() {
                let party = Party::named(vendor).with_role("vendor");
                package.vendors.push(party);
            }
        }
    }
}

fn map_authors(value: &Value, package: &mut Package) -> MapResult {
    let Value::Array(authors) = value else {
        return Err(format!("expected a list of authors, found {}", kind(value)));
    };
    for author in authors {
        package.authors.push(person_from_value(author, "homepage")?);
    }
    Ok(())
}

/// Several licenses are a disjunctive choice
fn map_license(value: &Value, package: &mut Package) -> MapResult {
    package.asserted_license = LicenseValue::from_value(value).join(" OR ");
    Ok(())
}

fn map_dependencies(value: &Value, package: &mut Package, group: DependencyGroup) -> MapResult {
    match value {
        Value::Object(links) => {
            for (name, constraint) in links {
                let dependency = Dependency {
                    name: name.clone(),
                    version_constraint: raw_text(constraint)
                        .map_err(|e| format!("'{}' {}", name, e))?,
                };
                package.add_dependency(group, dependency);
            }
            Ok(())
        },
        Value::Array(names) => {
            for name in names {
                if let Some(name) = text(name)? {
                    package.add_dependency(group, Dependency::unconstrained(name));
                }
            }
            Ok(())
        },
        other => Err(format!("expected an object of package links, found {}", kind(other))),
    }
}

fn map_require(value: &Value, package: &mut Package) -> MapResult {
    map_dependencies(value, package, DependencyGroup::Runtime)
}

fn map_require_dev(value: &Value, package: &mut Package) -> MapResult {
    map_dependencies(value, package, DependencyGroup::Development)
}

/// Record a `vcs` repository; other repository types describe package sources
fn map_repository(repo: &Value, package: &mut Package) -> MapResult {
    // `{"packagist.org": false}` disables a default repository
    let Value::Object(_) = repo else {
        return Ok(());
    };
    if member(repo, "type")?.as_deref() != Some("vcs") {
        return Ok(());
    }
    if let Some(url) = member(repo, "url")? {
        package.vcs_tool = Some(infer_vcs_tool(&url));
        package.vcs_repository = normalize_repo_url(&url);
    }
    Ok(())
}

fn map_repositories(value: &Value, package: &mut Package) -> MapResult {
    match value {
        Value::String(url) => {
            package.vcs_repository = normalize_repo_url(url);
            Ok(())
        },
        Value::Array(repos) => repos.iter().try_for_each(|repo| map_repository(repo, package)),
        Value::Object(repos) => repos
            .values()
            .try_for_each(|repo| map_repository(repo, package)),
        other => Err(format!("expected a list of repositories, found {}", kind(other))),
    }
}

fn map_support(value: &Value, package: &mut Package) -> MapResult {
    let Value::Object(_) = value else {
        return Err(format!("expected an object, found {}", kind(value)));
    };
    package.bug_tracking_url = member(value, "issues")?;
    package.code_view_url = member(value, "source")?;
    if let Some(email) = member(value, "email")? {
        package.support_contacts.push(email);
    }
    Ok(())
}

/// Release time such as "2016-02-18 11:06:27"; only the date is kept
fn map_time(value: &Value, package: &mut Package) -> MapResult {
    let Some(time) = text(value)? else {
        return Ok(());
    };
    let date = time.get(..10).unwrap_or(&time);
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| format!("expected a release date, found '{}': {}", time, e))?;
    package.release_date = Some(parsed);
    Ok(())
}
