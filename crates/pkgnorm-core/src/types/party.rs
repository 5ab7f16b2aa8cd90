//! Parties: persons, projects and organizations related to a package.

use serde::{Deserialize, Serialize};

/// The kind of a party
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyType {
    Person,
    /// Often loosely defined
    Project,
    /// More formally defined than a project
    Organization,
}

/// An author, maintainer, owner, vendor or similar party
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    #[serde(rename = "type")]
    pub party_type: Option<PartyType>,
    pub role: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub url: Option<String>,
}

impl Party {
    /// Create a person party with a name
    pub fn person(name: impl Into<String>) -> Self {
        Self {
            party_type: Some(PartyType::Person),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Create an untyped party with a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the role of this party
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the email of this party
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the url of this party
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Check if no descriptive field is set
    pub fn is_empty(&self) -> bool {
        self.role.is_none() && self.name.is_none() && self.email.is_none() && self.url.is_none()
    }
}
