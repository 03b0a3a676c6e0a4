//! Environment/runtime helpers
//!
//! Sanity checks to ensure storage locations exist before a backend opens them.

use std::path::Path;

use tracing::debug;

/// Create the parent directory of a storage file if it is missing.
pub async fn ensure_data_dir(file_path: &Path) -> anyhow::Result<()> {
    let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    if tokio::fs::metadata(parent).await.is_ok() {
        return Ok(());
    }
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    debug!(dir = %parent.display(), "data directory created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_parent() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("registry_env_{}", uuid::Uuid::new_v4()));
        let file = root.join("nested").join("apis.json");
        ensure_data_dir(&file).await?;
        assert!(tokio::fs::metadata(root.join("nested")).await?.is_dir());
        // bare file names have no directory to create
        ensure_data_dir(Path::new("apis.json")).await?;
        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }
}
