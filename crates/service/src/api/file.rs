use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use models::Api;
use tracing::{debug, info};

use super::repository::{ApiDescriptorRepository, ApiRepository, LegacyPolicyRepository};
use super::store::{self, ApiFilter, StoredApi};
use crate::errors::RepositoryError;
use crate::storage::json_map_store::JsonMapStore;

/// Repository persisting every api (with its descriptor) into one JSON file.
pub struct FileApiRepository {
    store: JsonMapStore<String, StoredApi>,
}

impl FileApiRepository {
    /// Open or create the backing file.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, RepositoryError> {
        let store: JsonMapStore<String, StoredApi> = JsonMapStore::open(path).await?;
        let loaded = store.read(|m| m.len()).await;
        info!(path = %store.path().display(), apis = loaded, "file repository opened");
        Ok(Self { store })
    }

    async fn select(&self, filter: ApiFilter<'_>) -> Vec<Api> {
        self.store.read(|m| store::select(m, filter)).await
    }

    async fn count(&self, filter: ApiFilter<'_>) -> usize {
        self.store.read(|m| store::count(m, filter)).await
    }
}

#[async_trait]
impl ApiRepository for FileApiRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Api>, RepositoryError> {
        Ok(self.store.get(&name.to_string()).await.map(|s| s.api))
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
        let now = Utc::now();
        let created = self.store.update_map(|m| store::insert_new(m, api, now)).await?;
        debug!(api = %created.name, backend = "file", "api stored");
        Ok(created)
    }

    async fn update(&self, api: Api) -> Result<Api, RepositoryError> {
        let now = Utc::now();
        self.store.update_map(|m| store::apply_update(m, api, now)).await
    }

    async fn delete(&self, name: &str) -> Result<(), RepositoryError> {
        let existed = self.store.remove(&name.to_string()).await?;
        debug!(api = %name, existed, backend = "file", "api removed");
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
impl ApiDescriptorRepository for FileApiRepository {
    async fn update_descriptor(&self, api_name: &str, json_descriptor: &str) -> Result<(), RepositoryError> {
        self.store.update_map(|m| store::set_descriptor(m, api_name, json_descriptor)).await
    }

    async fn find_descriptor_by_api(&self, api_name: &str) -> Result<Option<String>, RepositoryError> {
        Ok(self.store.get(&api_name.to_string()).await.and_then(|s| s.descriptor))
    }
}

impl LegacyPolicyRepository for FileApiRepository {}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{Owner, Visibility};

    #[tokio::test]
    async fn survives_reopen() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("file_api_repo_{}.json", uuid::Uuid::new_v4()));
        let repo = FileApiRepository::open(&tmp).await?;
        repo.create(Api::new("orders", Owner::user("bob")).with_visibility(Visibility::Public)).await?;
        repo.create(Api::new("ledger", Owner::team("finance"))).await?;
        repo.update_descriptor("orders", r#"{"flows":[]}"#).await?;
        repo.delete("ledger").await?;
        drop(repo);

        let reopened = FileApiRepository::open(&tmp).await?;
        assert!(reopened.find_by_name("ledger").await?.is_none());
        let orders = reopened.find_by_name("orders").await?.expect("orders persisted");
        assert!(orders.created_at.is_some());
        assert_eq!(reopened.find_descriptor_by_api("orders").await?.as_deref(), Some(r#"{"flows":[]}"#));
        assert_eq!(reopened.find_all().await?.len(), 1);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
