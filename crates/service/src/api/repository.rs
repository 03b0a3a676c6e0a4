use async_trait::async_trait;
use models::{Api, PolicyConfiguration};

use crate::errors::RepositoryError;

/// Storage contract for [`Api`] entities.
///
/// Listing operations return each api at most once, ordered by name.
#[async_trait]
pub trait ApiRepository: Send + Sync {
    /// Get an api by its name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Api>, RepositoryError>;

    /// All public apis.
    async fn find_all(&self) -> Result<Vec<Api>, RepositoryError>;

    /// Apis owned by a team, optionally restricted to public ones.
    async fn find_by_team(&self, team_name: &str, public_only: bool) -> Result<Vec<Api>, RepositoryError>;

    /// Apis owned by a user, optionally restricted to public ones.
    async fn find_by_user(&self, username: &str, public_only: bool) -> Result<Vec<Api>, RepositoryError>;

    /// Apis registered by a user, whoever owns them now.
    async fn find_by_creator(&self, username: &str) -> Result<Vec<Api>, RepositoryError>;

    /// Apis associated with the named application.
    async fn find_by_application(&self, application: &str) -> Result<Vec<Api>, RepositoryError>;

    /// Persist a new api and return the stored form.
    async fn create(&self, api: Api) -> Result<Api, RepositoryError>;

    /// Persist changes to an existing api and return the stored form.
    async fn update(&self, api: Api) -> Result<Api, RepositoryError>;

    async fn delete(&self, name: &str) -> Result<(), RepositoryError>;

    async fn count_by_user(&self, username: &str, public_only: bool) -> Result<usize, RepositoryError>;

    async fn count_by_team(&self, team_name: &str, public_only: bool) -> Result<usize, RepositoryError>;
}

/// Optional capability: one free-form JSON descriptor per api.
#[async_trait]
pub trait ApiDescriptorRepository: ApiRepository {
    async fn update_descriptor(&self, api_name: &str, json_descriptor: &str) -> Result<(), RepositoryError>;

    async fn find_descriptor_by_api(&self, api_name: &str) -> Result<Option<String>, RepositoryError>;
}

/// Ordered policy lists, superseded by [`ApiDescriptorRepository`].
///
/// Backends opt in with an empty impl; every method then reports
/// [`RepositoryError::Unsupported`] without touching storage.
#[async_trait]
pub trait LegacyPolicyRepository: ApiRepository {
    #[deprecated(note = "use ApiDescriptorRepository::update_descriptor")]
    async fn update_policies_configuration(
        &self,
        _api_name: &str,
        _policies: Vec<PolicyConfiguration>,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unsupported("update_policies_configuration"))
    }

    #[deprecated(note = "use ApiDescriptorRepository::update_descriptor")]
    async fn update_policy_configuration(
        &self,
        _api_name: &str,
        _policy: PolicyConfiguration,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unsupported("update_policy_configuration"))
    }

    #[deprecated(note = "use ApiDescriptorRepository::find_descriptor_by_api")]
    async fn find_policies_by_api(&self, _api_name: &str) -> Result<Vec<PolicyConfiguration>, RepositoryError> {
        Err(RepositoryError::Unsupported("find_policies_by_api"))
    }
}
