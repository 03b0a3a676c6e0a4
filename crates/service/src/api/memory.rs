use async_trait::async_trait;
use chrono::Utc;
use models::Api;
use tokio::sync::RwLock;
use tracing::debug;

use super::repository::{ApiDescriptorRepository, ApiRepository, LegacyPolicyRepository};
use super::store::{self, ApiFilter, ApiMap};
use crate::errors::RepositoryError;

/// Process-local repository. Contents are lost when it is dropped.
#[derive(Default)]
pub struct InMemoryApiRepository {
    apis: RwLock<ApiMap>,
}

impl InMemoryApiRepository {
    pub fn new() -> Self { Self::default() }

    async fn select(&self, filter: ApiFilter<'_>) -> Vec<Api> {
        store::select(&*self.apis.read().await, filter)
    }

    async fn count(&self, filter: ApiFilter<'_>) -> usize {
        store::count(&*self.apis.read().await, filter)
    }
}

#[async_trait]
impl ApiRepository for InMemoryApiRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Api>, RepositoryError> {
        Ok(self.apis.read().await.get(name).map(|s| s.api.clone()))
    }

    async fn find_all(&self) -> Result<Vec<Api>, RepositoryError> {
        Ok(self.select(ApiFilter::Public).await)
    }

    async fn find_by_team(&self, team_name: &str, public_only: bool) -> Result<Vec<Api>, RepositoryError> {
        Ok(self.select(ApiFilter::team(team_name, public_only)).await)
    }

    async fn find_by_user(&self, username: &str, public_only: bool) -> Result<Vec<Api>, RepositoryError> {
        Ok(self.select(ApiFilter::user(username, public_only)).await)
    }

    async fn find_by_creator(&self, username: &str) -> Result<Vec<Api>, RepositoryError> {
        Ok(self.select(ApiFilter::Creator(username)).await)
    }

    async fn find_by_application(&self, application: &str) -> Result<Vec<Api>, RepositoryError> {
        Ok(self.select(ApiFilter::Application(application)).await)
    }

    async fn create(&self, api: Api) -> Result<Api, RepositoryError> {
        let created = store::insert_new(&mut *self.apis.write().await, api, Utc::now())?;
        debug!(api = %created.name, backend = "memory", "api stored");
        Ok(created)
    }

    async fn update(&self, api: Api) -> Result<Api, RepositoryError> {
        store::apply_update(&mut *self.apis.write().await, api, Utc::now())
    }

    async fn delete(&self, name: &str) -> Result<(), RepositoryError> {
        let existed = self.apis.write().await.remove(name).is_some();
        debug!(api = %name, existed, backend = "memory", "api removed");
        Ok(())
    }

    async fn count_by_user(&self, username: &str, public_only: bool) -> Result<usize, RepositoryError> {
        Ok(self.count(ApiFilter::user(username, public_only)).await)
    }

    async fn count_by_team(&self, team_name: &str, public_only: bool) -> Result<usize, RepositoryError> {
        Ok(self.count(ApiFilter::team(team_name, public_only)).await)
    }
}

#[async_trait]
impl ApiDescriptorRepository for InMemoryApiRepository {
    async fn update_descriptor(&self, api_name: &str, json_descriptor: &str) -> Result<(), RepositoryError> {
        store::set_descriptor(&mut *self.apis.write().await, api_name, json_descriptor)
    }

    async fn find_descriptor_by_api(&self, api_name: &str) -> Result<Option<String>, RepositoryError> {
        Ok(self.apis.read().await.get(api_name).and_then(|s| s.descriptor.clone()))
    }
}

impl LegacyPolicyRepository for InMemoryApiRepository {}
