use crate::keys::validate_project_name;
use crate::traits::{Storage, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory storage implementation
///
/// Used when the durable backend cannot be built, or for local runs and tests.
/// Contents are lost when the process exits. Names are checked exactly like the
/// durable backend checks them; past that check no operation can fail.
#[derive(Default)]
pub struct MemoryStorage {
    projects: RwLock<HashMap<String, Bytes>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored projects
    pub async fn len(&self) -> usize {
        self.projects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.projects.read().await.is_empty()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, project_name: &str) -> StorageResult<Option<Bytes>> {
        validate_project_name(project_name)?;
        Ok(self.projects.read().await.get(project_name).cloned())
    }

    async fn save(&self, project_name: &str, content: Bytes) -> StorageResult<()> {
        validate_project_name(project_name)?;
        let size = content.len() as u64;
        self.projects
            .write()
            .await
            .insert(project_name.to_string(), content);

        tracing::debug!(project = %project_name, size_bytes = size, "Project stored in memory");
        Ok(())
    }

    async fn delete(&self, project_name: &str) -> StorageResult<()> {
        validate_project_name(project_name)?;
        self.projects.write().await.remove(project_name);
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageError;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_save_get_delete_lifecycle() {
        let storage = MemoryStorage::new();
        let payload = Bytes::from_static(b"{\"v\":1}");

        storage.save("alpha", payload.clone()).await.unwrap();
        assert_eq!(storage.get("alpha").await.unwrap(), Some(payload));

        storage.delete("alpha").await.unwrap();
        assert_eq!(storage.get("alpha").await.unwrap(), None);
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("never-saved").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let storage = MemoryStorage::new();
        assert!(storage.delete("never-saved").await.is_ok());
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let storage = MemoryStorage::new();
        storage.save("alpha", Bytes::from_static(b"one")).await.unwrap();
        storage.save("alpha", Bytes::from_static(b"two")).await.unwrap();

        assert_eq!(
            storage.get("alpha").await.unwrap(),
            Some(Bytes::from_static(b"two"))
        );
        assert_eq!(storage.len().await, 1);
    }

    #[tokio::test]
    async fn test_empty_payload_is_found() {
        let storage = MemoryStorage::new();
        storage.save("empty", Bytes::new()).await.unwrap();
        assert_eq!(storage.get("empty").await.unwrap(), Some(Bytes::new()));
    }

    #[tokio::test]
    async fn test_rejects_names_the_durable_backend_rejects() {
        let storage = MemoryStorage::new();
        for name in ["", "/alpha", "a//b"] {
            assert!(matches!(
                storage.save(name, Bytes::from_static(b"{}")).await,
                Err(StorageError::InvalidKey(_))
            ));
            assert!(matches!(
                storage.get(name).await,
                Err(StorageError::InvalidKey(_))
            ));
            assert!(matches!(
                storage.delete(name).await,
                Err(StorageError::InvalidKey(_))
            ));
        }
        assert!(storage.is_empty().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_are_not_lost() {
        let storage = Arc::new(MemoryStorage::new());

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let storage = Arc::clone(&storage);
                tokio::spawn(async move {
                    let name = format!("project-{}", i);
                    storage
                        .save(&name, Bytes::from(format!("{{\"id\":{}}}", i)))
                        .await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(storage.len().await, 64);
        for i in 0..64 {
            let content = storage.get(&format!("project-{}", i)).await.unwrap();
            assert_eq!(content, Some(Bytes::from(format!("{{\"id\":{}}}", i))));
        }
    }
}
