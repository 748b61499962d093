//! Snapshot stores
//!
//! A store keeps one JSON document per key. Stores never look inside the
//! document; shape and defaults belong to [`super::snapshot`].

use async_trait::async_trait;
use camp_client::{BasketClient, ClientError};
use serde_json::Value;
use shared::error::{AppError, ErrorCode};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::core::Config;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Remote store failed: {0}")]
    Remote(#[from] ClientError),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::with_message(ErrorCode::StorageError, err.to_string())
    }
}

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// `Ok(None)` when the key has never been written
    async fn load(&self, key: &str) -> Result<Option<Value>, StoreError>;

    async fn save(&self, key: &str, document: &Value) -> Result<(), StoreError>;

    fn name(&self) -> &'static str;
}

/// Local JSON files, one per key
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl SnapshotStore for FileStore {
    async fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let bytes = match tokio::fs::read(self.path(key)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    async fn save(&self, key: &str, document: &Value) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let bytes = serde_json::to_vec_pretty(document)?;

        // write-then-rename keeps the previous file intact on a crash
        let target = self.path(key);
        let tmp = target.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &target).await?;

        tracing::debug!(path = %target.display(), bytes = bytes.len(), "Snapshot written");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

/// Remote JSON basket
#[derive(Debug, Clone)]
pub struct BasketStore {
    client: BasketClient,
}

impl BasketStore {
    pub fn new(client: BasketClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SnapshotStore for BasketStore {
    async fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.client.fetch(key).await?)
    }

    async fn save(&self, key: &str, document: &Value) -> Result<(), StoreError> {
        Ok(self.client.store(key, document).await?)
    }

    fn name(&self) -> &'static str {
        "basket"
    }
}

/// Remote store with a local mirror
///
/// Saves go to the mirror first, then to the remote. Loads prefer the
/// remote and fall back to the mirror when it is unreachable or empty.
pub struct MirroredStore {
    remote: Arc<dyn SnapshotStore>,
    local: Arc<dyn SnapshotStore>,
}

impl MirroredStore {
    pub fn new(remote: Arc<dyn SnapshotStore>, local: Arc<dyn SnapshotStore>) -> Self {
        Self { remote, local }
    }
}

#[async_trait]
impl SnapshotStore for MirroredStore {
    async fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        match self.remote.load(key).await {
            Ok(Some(document)) => return Ok(Some(document)),
            Ok(None) => {
                tracing::info!(store = self.remote.name(), key = %key, "Remote snapshot absent, trying local mirror");
            }
            Err(e) => {
                tracing::warn!(store = self.remote.name(), key = %key, error = %e, "Remote load failed, trying local mirror");
            }
        }
        self.local.load(key).await
    }

    async fn save(&self, key: &str, document: &Value) -> Result<(), StoreError> {
        if let Err(e) = self.local.save(key, document).await {
            tracing::error!(store = self.local.name(), key = %key, error = %e, "Local mirror save failed");
        }
        self.remote.save(key, document).await
    }

    fn name(&self) -> &'static str {
        "mirrored"
    }
}

/// Build the store for this deployment: local files, plus the remote basket
/// when one is configured
pub fn store_from_config(config: &Config) -> Result<Arc<dyn SnapshotStore>, StoreError> {
    let local: Arc<dyn SnapshotStore> = Arc::new(FileStore::new(config.snapshot_dir()));
    if !config.has_remote_store() {
        tracing::info!(dir = %config.snapshot_dir().display(), "Using local snapshot store");
        return Ok(local);
    }

    let client = BasketClient::new(&config.client_config())?;
    tracing::info!(basket = %config.basket_name, "Using remote basket with local mirror");
    Ok(Arc::new(MirroredStore::new(Arc::new(BasketStore::new(client)), local)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::collections::HashMap;

    /// In-memory store that can be switched offline
    #[derive(Default)]
    struct MemoryStore {
        docs: Mutex<HashMap<String, Value>>,
        offline: bool,
    }

    #[async_trait]
    impl SnapshotStore for MemoryStore {
        async fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
            if self.offline {
                return Err(std::io::Error::other("offline").into());
            }
            Ok(self.docs.lock().get(key).cloned())
        }

        async fn save(&self, key: &str, document: &Value) -> Result<(), StoreError> {
            if self.offline {
                return Err(std::io::Error::other("offline").into());
            }
            self.docs.lock().insert(key.to_string(), document.clone());
            Ok(())
        }

        fn name(&self) -> &'static str {
            "memory"
        }
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("snapshots"));

        assert!(store.load("camp").await.unwrap().is_none());
        store.save("camp", &json!({ "total_blanket_stock": 35 })).await.unwrap();
        let loaded = store.load("camp").await.unwrap().unwrap();
        assert_eq!(loaded["total_blanket_stock"], 35);
        assert!(!dir.path().join("snapshots/camp.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("camp.json"), b"{ not json").unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(store.load("camp").await, Err(StoreError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_mirrored_store_falls_back_to_local() {
        let local = Arc::new(MemoryStore::default());
        local.docs.lock().insert("camp".into(), json!({ "from": "local" }));
        let remote = Arc::new(MemoryStore {
            offline: true,
            ..Default::default()
        });

        let store = MirroredStore::new(remote, local.clone());
        assert_eq!(store.load("camp").await.unwrap().unwrap()["from"], "local");

        // remote failure is reported, the mirror still gets the write
        assert!(store.save("camp", &json!({ "from": "new" })).await.is_err());
        assert_eq!(local.docs.lock()["camp"]["from"], "new");
    }

    #[tokio::test]
    async fn test_mirrored_store_prefers_remote() {
        let local = Arc::new(MemoryStore::default());
        let remote = Arc::new(MemoryStore::default());
        local.docs.lock().insert("camp".into(), json!({ "from": "local" }));
        remote.docs.lock().insert("camp".into(), json!({ "from": "remote" }));

        let store = MirroredStore::new(remote.clone(), local.clone());
        assert_eq!(store.load("camp").await.unwrap().unwrap()["from"], "remote");

        store.save("camp", &json!({ "from": "both" })).await.unwrap();
        assert_eq!(remote.docs.lock()["camp"]["from"], "both");
        assert_eq!(local.docs.lock()["camp"]["from"], "both");
    }

    #[test]
    fn test_local_only_without_basket_url() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_overrides(dir.path().to_string_lossy());
        assert_eq!(store_from_config(&config).unwrap().name(), "file");
    }
}
