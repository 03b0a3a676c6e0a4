use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors;

const MAX_NAME_LEN: usize = 128;

/// Whether an api shows up in public listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    #[default]
    Private,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    Started,
    #[default]
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerKind {
    User,
    Team,
}

/// Owning identity of an api: a user (by username) or a team (by team name).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Owner {
    pub kind: OwnerKind,
    pub name: String,
}

impl Owner {
    pub fn user(name: impl Into<String>) -> Self {
        Self { kind: OwnerKind::User, name: name.into() }
    }

    pub fn team(name: impl Into<String>) -> Self {
        Self { kind: OwnerKind::Team, name: name.into() }
    }
}

/// API gateway definition managed by the registry.
///
/// `name` is the lookup key. `creator` is who registered the api and may
/// differ from the owner. Timestamps are filled in by the repository.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Api {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner: Owner,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub state: LifecycleState,
    #[serde(default)]
    pub applications: BTreeSet<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Api {
    pub fn new(name: impl Into<String>, owner: Owner) -> Self {
        Self {
            name: name.into(),
            version: String::new(),
            description: None,
            owner,
            creator: None,
            visibility: Visibility::default(),
            state: LifecycleState::default(),
            applications: BTreeSet::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    pub fn with_application(mut self, application: impl Into<String>) -> Self {
        self.applications.insert(application.into());
        self
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn is_owned_by(&self, kind: OwnerKind, name: &str) -> bool {
        self.owner.kind == kind && self.owner.name == name
    }

    /// Equality on everything except the repository-managed timestamps.
    pub fn same_content(&self, other: &Api) -> bool {
        self.name == other.name
            && self.version == other.version
            && self.description == other.description
            && self.owner == other.owner
            && self.creator == other.creator
            && self.visibility == other.visibility
            && self.state == other.state
            && self.applications == other.applications
    }
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.is_empty() {
        return Err(errors::ModelError::Validation("api name must not be empty".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(errors::ModelError::Validation(format!("api name longer than {MAX_NAME_LEN} chars")));
    }
    if name.chars().any(|c| c.is_whitespace() || c == '/') {
        return Err(errors::ModelError::Validation("api name must not contain whitespace or '/'".into()));
    }
    Ok(())
}

pub fn validate_owner(owner: &Owner) -> Result<(), errors::ModelError> {
    if owner.name.trim().is_empty() {
        return Err(errors::ModelError::Validation("owner name must not be empty".into()));
    }
    Ok(())
}

pub fn validate(api: &Api) -> Result<(), errors::ModelError> {
    validate_name(&api.name)?;
    validate_owner(&api.owner)?;
    if let Some(creator) = &api.creator {
        if creator.trim().is_empty() {
            return Err(errors::ModelError::Validation("creator must not be blank".into()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_names() {
        assert!(validate_name("").is_err());
        assert!(validate_name("has space").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name(&"x".repeat(129)).is_err());
        assert!(validate_name("orders-v2").is_ok());
    }

    #[test]
    fn rejects_blank_owner_and_creator() {
        let api = Api::new("orders", Owner::team("  "));
        assert!(validate(&api).is_err());

        let api = Api::new("orders", Owner::user("bob")).with_creator("");
        assert!(validate(&api).is_err());
    }

    #[test]
    fn same_content_ignores_timestamps() {
        let a = Api::new("orders", Owner::user("bob")).with_visibility(Visibility::Public);
        let mut b = a.clone();
        b.created_at = Some(Utc::now());
        b.updated_at = b.created_at;
        assert!(a.same_content(&b));
        assert_ne!(a, b);

        b.state = LifecycleState::Started;
        assert!(!a.same_content(&b));
    }

    #[test]
    fn serde_defaults_fill_optional_fields() {
        let api: Api = serde_json::from_str(r#"{"name":"orders","owner":{"kind":"team","name":"core"}}"#).unwrap();
        assert_eq!(api.visibility, Visibility::Private);
        assert_eq!(api.state, LifecycleState::Stopped);
        assert!(api.is_owned_by(OwnerKind::Team, "core"));
        assert!(api.applications.is_empty());
    }
}
