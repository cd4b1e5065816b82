use async_trait::async_trait;
use ft_core::{ArticleStorage, Error, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores each article as a file in a single output directory.
#[derive(Debug, Clone)]
pub struct MarkdownStorage {
    dir: PathBuf,
}

impl MarkdownStorage {
    pub fn new_with_path(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name == ".." {
            return Err(Error::Storage(format!("Invalid entry name: {:?}", name)));
        }
        Ok(self.dir.join(name))
    }
}

#[async_trait]
impl ArticleStorage for MarkdownStorage {
    async fn prepare(&self) -> Result<()> {
        if !tokio::fs::try_exists(&self.dir).await? {
            tokio::fs::create_dir_all(&self.dir).await?;
            tracing::info!("📁 Created {} directory", self.dir.display());
        }
        Ok(())
    }

    async fn exists(&self, name: &str) -> Result<bool> {
        Ok(tokio::fs::try_exists(self.entry_path(name)?).await?)
    }

    async fn write(&self, name: &str, contents: &str) -> Result<()> {
        tokio::fs::write(self.entry_path(name)?, contents).await?;
        Ok(())
    }

    async fn read(&self, name: &str) -> Result<String> {
        Ok(tokio::fs::read_to_string(self.entry_path(name)?).await?)
    }

    async fn list(&self) -> Result<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    async fn remove(&self, name: &str) -> Result<()> {
        tokio::fs::remove_file(self.entry_path(name)?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_markdown_storage_round_trip() {
        let dir = tempdir().unwrap();
        let storage = MarkdownStorage::new_with_path(dir.path().join("news"));

        assert!(storage.list().await.unwrap().is_empty());
        storage.prepare().await.unwrap();
        assert!(!storage.exists("a.md").await.unwrap());

        storage.write("a.md", "hello").await.unwrap();
        assert!(storage.exists("a.md").await.unwrap());
        assert_eq!(storage.read("a.md").await.unwrap(), "hello");
        assert_eq!(storage.list().await.unwrap(), vec!["a.md".to_string()]);

        storage.remove("a.md").await.unwrap();
        assert!(!storage.exists("a.md").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_skips_directories() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("drafts")).unwrap();
        std::fs::write(dir.path().join("b.md"), "x").unwrap();

        let storage = MarkdownStorage::new_with_path(dir.path());
        assert_eq!(storage.list().await.unwrap(), vec!["b.md".to_string()]);
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let dir = tempdir().unwrap();
        let storage = MarkdownStorage::new_with_path(dir.path());
        assert!(storage.write("../escape.md", "x").await.is_err());
    }
}
