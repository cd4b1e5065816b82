use ft_core::{ArticleStorage, Category, ChatSender, Result, StoredArticle};
use ft_storage::parse_article;
use std::sync::Arc;

use crate::message::format_message;

/// Categories picked ahead of newer articles from other categories.
pub const PREFERRED_CATEGORIES: [Category; 2] = [Category::Astronomy, Category::Ai];

/// Picks the newest stored article and posts it to the channel.
pub struct Publisher {
    storage: Arc<dyn ArticleStorage>,
    sender: Arc<dyn ChatSender>,
    preferred: Vec<Category>,
}

impl Publisher {
    pub fn new(storage: Arc<dyn ArticleStorage>, sender: Arc<dyn ChatSender>) -> Self {
        Self {
            storage,
            sender,
            preferred: PREFERRED_CATEGORIES.to_vec(),
        }
    }

    pub fn with_preferred(mut self, preferred: Vec<Category>) -> Self {
        self.preferred = preferred;
        self
    }

    /// Newest article in a preferred category, else the newest parseable one.
    ///
    /// Files are ordered by name, newest first; the date prefix makes that
    /// chronological. Malformed files are skipped.
    pub async fn select_latest(&self) -> Result<Option<StoredArticle>> {
        let mut names: Vec<String> = self
            .storage
            .list()
            .await?
            .into_iter()
            .filter(|n| n.ends_with(".md") && !n.starts_with('.'))
            .collect();
        names.sort_unstable_by(|a, b| b.cmp(a));

        let mut newest = None;
        for name in names {
            let content = match self.storage.read(&name).await {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!("⚠️ Skipping unreadable article {}: {}", name, e);
                    continue;
                }
            };
            let Some(article) = parse_article(&name, &content) else {
                tracing::warn!("⚠️ Skipping malformed article: {}", name);
                continue;
            };

            if article
                .category()
                .map_or(false, |c| self.preferred.contains(&c))
            {
                return Ok(Some(article));
            }
            if newest.is_none() {
                newest = Some(article);
            }
        }

        Ok(newest)
    }

    /// Post the selected article. With `dry_run` the message is only logged.
    pub async fn publish_latest(&self, dry_run: bool) -> Result<Option<StoredArticle>> {
        let Some(article) = self.select_latest().await? else {
            tracing::info!("📭 No articles found");
            return Ok(None);
        };

        tracing::info!("📌 Selected: {}", article.title_en);
        let message = format_message(&article);

        if dry_run {
            tracing::info!("📝 Dry run, message not sent:\n{}", message);
        } else {
            self.sender.send_message(&message).await?;
        }

        Ok(Some(article))
    }
}
