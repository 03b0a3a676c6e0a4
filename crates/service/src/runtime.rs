//! Runtime wiring
//!
//! Turns a loaded `configs::AppConfig` into a ready repository so embedding
//! binaries do not need to know about the individual backends.

use std::{path::Path, sync::Arc};

use configs::{AppConfig, Backend, RepositoryConfig};
use tracing::info;

use crate::api::{ApiDescriptorRepository, FileApiRepository, InMemoryApiRepository};

/// Open the backend selected by `cfg`.
pub async fn open_repository(cfg: &RepositoryConfig) -> anyhow::Result<Arc<dyn ApiDescriptorRepository>> {
    match cfg.backend {
        Backend::Memory => {
            info!(backend = "memory", "api repository ready");
            Ok(Arc::new(InMemoryApiRepository::new()))
        }
        Backend::File => {
            let path = cfg.file_path();
            common::env::ensure_data_dir(Path::new(path)).await?;
            let repo = FileApiRepository::open(path).await?;
            info!(backend = "file", %path, "api repository ready");
            Ok(Arc::new(repo))
        }
    }
}

/// Load configuration, install the tracing subscriber and open the repository.
pub async fn bootstrap() -> anyhow::Result<(AppConfig, Arc<dyn ApiDescriptorRepository>)> {
    let cfg = AppConfig::load_and_validate()?;
    common::utils::logging::init_logging(&cfg.logging.format);
    let repo = open_repository(&cfg.repository).await?;
    Ok((cfg, repo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{Owner, Visibility};

    #[tokio::test]
    async fn memory_backend_by_default() -> anyhow::Result<()> {
        let repo = open_repository(&RepositoryConfig::default()).await?;
        repo.create(models::Api::new("orders", Owner::user("bob")).with_visibility(Visibility::Public)).await?;
        assert_eq!(repo.find_all().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn file_backend_creates_directory() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("registry_runtime_{}", uuid::Uuid::new_v4()));
        let path = root.join("store").join("apis.json");
        let cfg = RepositoryConfig { backend: Backend::File, path: Some(path.display().to_string()) };

        let repo = open_repository(&cfg).await?;
        repo.create(models::Api::new("ledger", Owner::team("finance"))).await?;
        assert!(tokio::fs::metadata(&path).await?.is_file());
        assert_eq!(repo.count_by_team("finance", false).await?, 1);

        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }
}
