use async_trait::async_trait;
use ft_core::{ArticleStorage, Error, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-process storage. `--storage memory` runs the pipeline without writing files.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ArticleStorage for MemoryStorage {
    async fn prepare(&self) -> Result<()> {
        Ok(())
    }

    async fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.entries.read().await.contains_key(name))
    }

    async fn write(&self, name: &str, contents: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(name.to_string(), contents.to_string());
        Ok(())
    }

    async fn read(&self, name: &str) -> Result<String> {
        self.entries
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| Error::Storage(format!("No such entry: {}", name)))
    }

    async fn list(&self) -> Result<Vec<String>> {
        Ok(self.entries.read().await.keys().cloned().collect())
    }

    async fn remove(&self, name: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| Error::Storage(format!("No such entry: {}", name)))
    }
}
