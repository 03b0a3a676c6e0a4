use std::{collections::HashMap, hash::Hash, path::{Path, PathBuf}};
use tokio::{fs, sync::RwLock};

use crate::errors::RepositoryError;

/// Generic JSON file-backed key-value map.
///
/// The whole map lives in memory and is rewritten to `file_path` after every
/// successful mutation. Writes go through a sibling `.tmp` file and a rename
/// so a crash never leaves a half-written document behind.
pub struct JsonMapStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
    file_path: PathBuf,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Open the store at `path`, creating the file with an empty map if missing.
    /// An unreadable or corrupt file is an error, never silently reset.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, RepositoryError> {
        let file_path = path.into();
        let map: HashMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => HashMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                RepositoryError::technical(format!("corrupt store {}: {e}", file_path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty: HashMap<K, V> = HashMap::new();
                write_atomic(&file_path, &serde_json::to_vec(&empty)?).await?;
                empty
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self { inner: RwLock::new(map), file_path })
    }

    pub fn path(&self) -> &Path { &self.file_path }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Run a read-only query against the map.
    pub async fn read<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&HashMap<K, V>) -> T,
    {
        let map = self.inner.read().await;
        f(&map)
    }

    /// Apply a mutation and persist it. The map is left untouched on disk
    /// when `f` fails; the write lock is held until the file is replaced.
    pub async fn update_map<F, T>(&self, f: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut HashMap<K, V>) -> Result<T, RepositoryError>,
    {
        let mut map = self.inner.write().await;
        let mut staged = map.clone();
        let out = f(&mut staged)?;
        write_atomic(&self.file_path, &serde_json::to_vec(&staged)?).await?;
        *map = staged;
        Ok(out)
    }

    /// Remove a key and persist; returns whether it existed.
    pub async fn remove(&self, key: &K) -> Result<bool, RepositoryError> {
        self.update_map(|m| Ok(m.remove(key).is_some())).await
    }
}

async fn write_atomic(path: &Path, data: &[u8]) -> Result<(), RepositoryError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    fs::write(&tmp, data).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}
