use async_trait::async_trait;
use crate::Result;

/// Flat, name-addressed storage for generated article files.
#[async_trait]
pub trait ArticleStorage: Send + Sync {
    /// Make sure the backing location exists
    async fn prepare(&self) -> Result<()>;

    /// Returns true if an entry with this name is already present
    async fn exists(&self, name: &str) -> Result<bool>;

    /// Write a new entry. Callers check `exists` first; the pair is not atomic.
    async fn write(&self, name: &str, contents: &str) -> Result<()>;

    /// Read an entry as UTF-8 text
    async fn read(&self, name: &str) -> Result<String>;

    /// Names of all entries, unordered
    async fn list(&self) -> Result<Vec<String>>;

    /// Delete an entry
    async fn remove(&self, name: &str) -> Result<()>;
}
