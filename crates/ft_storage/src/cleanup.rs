use ft_core::{ArticleStorage, Result};

pub const ARTICLE_EXTENSION: &str = ".md";
pub const DEFAULT_PLACEHOLDER: &str = ".gitkeep";

/// Prepare the output location and delete every generated article in it.
///
/// Entries named `placeholder` are kept. Returns the number of deleted files.
pub async fn clean_output(storage: &dyn ArticleStorage, placeholder: &str) -> Result<usize> {
    storage.prepare().await?;

    let mut removed = 0;
    for name in storage.list().await? {
        if name == placeholder || !name.ends_with(ARTICLE_EXTENSION) {
            continue;
        }
        storage.remove(&name).await?;
        tracing::debug!("🗑️ Removed {}", name);
        removed += 1;
    }

    tracing::info!("🧹 Cleaned {} previous article(s)", removed);
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{MarkdownStorage, MemoryStorage};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_clean_output_keeps_placeholder_and_other_files() {
        let storage = MemoryStorage::new();
        for name in ["2026-10-17-a.md", "2026-10-18-b.md", "_index.md", "notes.txt"] {
            storage.write(name, "x").await.unwrap();
        }

        let removed = clean_output(&storage, "_index.md").await.unwrap();

        assert_eq!(removed, 2);
        let mut left = storage.list().await.unwrap();
        left.sort();
        assert_eq!(left, vec!["_index.md".to_string(), "notes.txt".to_string()]);
    }

    #[tokio::test]
    async fn test_clean_output_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let storage = MarkdownStorage::new_with_path(dir.path().join("news"));

        assert_eq!(clean_output(&storage, DEFAULT_PLACEHOLDER).await.unwrap(), 0);
        assert!(dir.path().join("news").is_dir());
    }
}
