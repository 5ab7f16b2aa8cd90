//! Person parsing shared by the manifest formats.
//!
//! A person is either an object with `name`, `email` and a url member, or a
//! string in the form `Name <email> (url)`.

use crate::values::{kind, member};
use pkgnorm_core::{Party, PartyType};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn person_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // name, then an optional <email>, then an optional (url)
        Regex::new(r"^(?P<name>[^(<]+)\s?(?P<email><[^>]+>)?\s?(?P<url>\([^)]+\))?$")
            .expect("person pattern is a valid regex")
    })
}

/// Strip wrapping characters and whitespace; "none" placeholders read as absent
fn clean(raw: Option<&str>, wrapping: &[char]) -> Option<String> {
    let cleaned = raw?.trim_matches(|c: char| c.is_whitespace() || wrapping.contains(&c));
    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("none") {
        return None;
    }
    Some(cleaned.to_string())
}

/// Split a `Name <email> (url)` string
pub fn parse_person_str(person: &str) -> (Option<String>, Option<String>, Option<String>) {
    let person = person.trim();
    let Some(captures) = person_pattern().captures(person) else {
        return (clean(Some(person), &[]), None, None);
    };

    (
        clean(captures.name("name").map(|m| m.as_str()), &[]),
        clean(captures.name("email").map(|m| m.as_str()), &['<', '>']),
        clean(captures.name("url").map(|m| m.as_str()), &['(', ')']),
    )
}

/// Build a person party from a manifest value.
///
/// `url_key` names the object member holding the url (`homepage` in
/// Composer, `url` in npm).
pub fn person_from_value(value: &Value, url_key: &str) -> Result<Party, String> {
    let (name, role, email, url) = match value {
        Value::String(s) => {
            let (name, email, url) = parse_person_str(s);
            (name, None, email, url)
        },
        Value::Object(_) => (
            clean(member(value, "name")?.as_deref(), &[]),
            clean(member(value, "role")?.as_deref(), &[]),
            clean(member(value, "email")?.as_deref(), &['<', '>']),
            clean(member(value, url_key)?.as_deref(), &['(', ')']),
        ),
        other => return Err(format!("expected a person string or object, found {}", kind(other))),
    };

    Ok(Party {
        party_type: Some(PartyType::Person),
        role,
        name,
        email,
        url,
    })
}

/// Build persons from a list, or from a single person
pub fn persons_from_value(value: &Value, url_key: &str) -> Result<Vec<Party>, String> {
    let parties = match value {
        Value::Array(items) => items
            .iter()
            .map(|item| person_from_value(item, url_key))
            .collect::<Result<Vec<_>, _>>()?,
        single => vec![person_from_value(single, url_key)?],
    };
    Ok(parties.into_iter().filter(|p| !p.is_empty()).collect())
}
