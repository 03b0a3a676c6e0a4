//! Record layout and map operations shared by the reference backends.
//!
//! Both backends keep a `HashMap<String, StoredApi>` keyed by api name and
//! differ only in where the map lives; the rules for create/update/delete
//! are implemented once here.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use models::{api, Api, OwnerKind};
use serde::{Deserialize, Serialize};

use crate::errors::RepositoryError;

pub type ApiMap = HashMap<String, StoredApi>;

/// Persisted form of an api together with its JSON descriptor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredApi {
    pub api: Api,
    #[serde(default)]
    pub descriptor: Option<String>,
}

/// Selection criteria behind the `find_*`/`count_*` operations.
#[derive(Clone, Copy, Debug)]
pub enum ApiFilter<'a> {
    Public,
    Owner { kind: OwnerKind, name: &'a str, public_only: bool },
    Creator(&'a str),
    Application(&'a str),
}

impl<'a> ApiFilter<'a> {
    pub fn user(name: &'a str, public_only: bool) -> Self {
        Self::Owner { kind: OwnerKind::User, name, public_only }
    }

    pub fn team(name: &'a str, public_only: bool) -> Self {
        Self::Owner { kind: OwnerKind::Team, name, public_only }
    }

    pub fn matches(&self, api: &Api) -> bool {
        match *self {
            ApiFilter::Public => api.is_public(),
            ApiFilter::Owner { kind, name, public_only } => {
                api.is_owned_by(kind, name) && (!public_only || api.is_public())
            }
            ApiFilter::Creator(user) => api.creator.as_deref() == Some(user),
            ApiFilter::Application(app) => api.applications.contains(app),
        }
    }
}

pub fn select(map: &ApiMap, filter: ApiFilter<'_>) -> Vec<Api> {
    let mut out: Vec<Api> = map
        .values()
        .filter(|s| filter.matches(&s.api))
        .map(|s| s.api.clone())
        .collect();
    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

pub fn count(map: &ApiMap, filter: ApiFilter<'_>) -> usize {
    map.values().filter(|s| filter.matches(&s.api)).count()
}

/// Insert a new api, stamping both timestamps with `now`.
pub fn insert_new(map: &mut ApiMap, mut api: Api, now: DateTime<Utc>) -> Result<Api, RepositoryError> {
    api::validate(&api)?;
    if map.contains_key(&api.name) {
        return Err(RepositoryError::technical(format!("api {} already exists", api.name)));
    }
    api.created_at = Some(now);
    api.updated_at = Some(now);
    map.insert(api.name.clone(), StoredApi { api: api.clone(), descriptor: None });
    Ok(api)
}

/// Replace an existing api. Re-applying identical content is a no-op, so the
/// stored timestamps only move when something actually changed.
pub fn apply_update(map: &mut ApiMap, mut api: Api, now: DateTime<Utc>) -> Result<Api, RepositoryError> {
    api::validate(&api)?;
    let stored = map
        .get_mut(&api.name)
        .ok_or_else(|| RepositoryError::technical(format!("api {} not found", api.name)))?;
    if stored.api.same_content(&api) {
        return Ok(stored.api.clone());
    }
    api.created_at = stored.api.created_at;
    api.updated_at = Some(now);
    stored.api = api.clone();
    Ok(api)
}

pub fn set_descriptor(map: &mut ApiMap, api_name: &str, descriptor: &str) -> Result<(), RepositoryError> {
    let stored = map
        .get_mut(api_name)
        .ok_or_else(|| RepositoryError::technical(format!("api {api_name} not found")))?;
    stored.descriptor = Some(descriptor.to_string());
    Ok(())
}
