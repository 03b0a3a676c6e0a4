use std::sync::Arc;

use models::{api, Api};
use tracing::{info, instrument, warn};

use super::repository::ApiDescriptorRepository;
use crate::errors::RepositoryError;
use crate::pagination::{Page, Pagination};

/// Application service over any descriptor-capable api repository.
/// Validates input before it reaches storage and logs lifecycle events.
pub struct ApiService<R: ApiDescriptorRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ApiDescriptorRepository + ?Sized> ApiService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn get(&self, name: &str) -> Result<Option<Api>, RepositoryError> {
        self.repo.find_by_name(name).await
    }

    pub async fn list_public(&self) -> Result<Vec<Api>, RepositoryError> {
        self.repo.find_all().await
    }

    #[instrument(skip(self, api), fields(api = %api.name, owner = %api.owner.name))]
    pub async fn register(&self, api: Api) -> Result<Api, RepositoryError> {
        api::validate(&api)?;
        let created = self.repo.create(api).await?;
        info!(visibility = ?created.visibility, "api_created");
        Ok(created)
    }

    #[instrument(skip(self, api), fields(api = %api.name))]
    pub async fn update(&self, api: Api) -> Result<Api, RepositoryError> {
        api::validate(&api)?;
        let updated = self.repo.update(api).await?;
        info!(updated_at = ?updated.updated_at, "api_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, name: &str) -> Result<(), RepositoryError> {
        self.repo.delete(name).await?;
        info!("api_deleted");
        Ok(())
    }

    /// One page of the apis a user owns, with the total from `count_by_user`.
    /// Items and total come from two separate reads, so a concurrent write
    /// between them can make `total` disagree with the listed items.
    pub async fn list_for_user(
        &self,
        username: &str,
        public_only: bool,
        pagination: Pagination,
    ) -> Result<Page<Api>, RepositoryError> {
        let all = self.repo.find_by_user(username, public_only).await?;
        let total = self.repo.count_by_user(username, public_only).await?;
        Ok(Page::new(pagination.slice(all), total, pagination))
    }

    /// Team counterpart of [`Self::list_for_user`]; same two-read caveat.
    pub async fn list_for_team(
        &self,
        team_name: &str,
        public_only: bool,
        pagination: Pagination,
    ) -> Result<Page<Api>, RepositoryError> {
        let all = self.repo.find_by_team(team_name, public_only).await?;
        let total = self.repo.count_by_team(team_name, public_only).await?;
        Ok(Page::new(pagination.slice(all), total, pagination))
    }

    /// Store a descriptor after checking it is well-formed JSON.
    #[instrument(skip(self, descriptor), fields(bytes = descriptor.len()))]
    pub async fn publish_descriptor(&self, api_name: &str, descriptor: &str) -> Result<(), RepositoryError> {
        if let Err(e) = serde_json::from_str::<serde_json::Value>(descriptor) {
            warn!(error = %e, "descriptor rejected");
            return Err(RepositoryError::technical(format!("invalid descriptor for {api_name}: {e}")));
        }
        self.repo.update_descriptor(api_name, descriptor).await?;
        info!("descriptor_published");
        Ok(())
    }

    pub async fn descriptor(&self, api_name: &str) -> Result<Option<serde_json::Value>, RepositoryError> {
        match self.repo.find_descriptor_by_api(api_name).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }
}
