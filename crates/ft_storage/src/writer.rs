use ft_core::{ArticleStorage, Clock, EnrichedArticle, Result, SaveOutcome};
use std::sync::Arc;

use crate::template::ArticleTemplate;

/// Renders enriched articles and writes each one at most once.
pub struct ArticleWriter {
    storage: Arc<dyn ArticleStorage>,
    template: ArticleTemplate,
    clock: Arc<dyn Clock>,
}

impl ArticleWriter {
    pub fn new(storage: Arc<dyn ArticleStorage>, template: ArticleTemplate, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            template,
            clock,
        }
    }

    pub fn template(&self) -> ArticleTemplate {
        self.template
    }

    /// Write `article` unless a file with the same name already exists.
    ///
    /// `index` is the article's position in the current run; only the
    /// digest template uses it.
    pub async fn save(&self, article: &EnrichedArticle, index: usize) -> Result<SaveOutcome> {
        let filename = self.template.filename(article, self.clock.now(), index);

        if self.storage.exists(&filename).await? {
            tracing::info!("⏭️ Exists: {}", filename);
            return Ok(SaveOutcome::Skipped { filename });
        }

        self.storage
            .write(&filename, &self.template.render(article))
            .await?;
        tracing::info!("✅ Saved: {}", filename);

        Ok(SaveOutcome::Saved {
            filename,
            title: article.title_en.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MemoryStorage;
    use chrono::{NaiveDate, TimeZone, Utc};
    use ft_core::{Category, FixedClock};

    fn article() -> EnrichedArticle {
        EnrichedArticle {
            title_en: "Mars Rover Finds Water".to_string(),
            title_localized: "Rover Marikh Temui Air".to_string(),
            summary_en: "Summary".to_string(),
            summary_localized: "Ringkasan".to_string(),
            keywords: vec![],
            source_name: "NASA".to_string(),
            category: Category::Astronomy,
            image_url: String::new(),
            link: "https://nasa.gov/mars".to_string(),
            publish_date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
        }
    }

    fn writer(storage: &MemoryStorage) -> ArticleWriter {
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 10, 18, 6, 0, 0).unwrap());
        ArticleWriter::new(
            Arc::new(storage.clone()),
            ArticleTemplate::Frontmatter,
            Arc::new(clock),
        )
    }

    #[tokio::test]
    async fn test_save_writes_new_file() {
        let storage = MemoryStorage::new();
        let outcome = writer(&storage).save(&article(), 0).await.unwrap();

        assert_eq!(
            outcome,
            SaveOutcome::Saved {
                filename: "2026-10-18-mars-rover-finds-water.md".to_string(),
                title: "Mars Rover Finds Water".to_string(),
            }
        );
        let written = storage.read("2026-10-18-mars-rover-finds-water.md").await.unwrap();
        assert!(written.contains("title_ms: \"Rover Marikh Temui Air\""));
    }

    #[tokio::test]
    async fn test_existing_file_is_left_untouched() {
        let storage = MemoryStorage::new();
        storage
            .write("2026-10-18-mars-rover-finds-water.md", "original")
            .await
            .unwrap();

        let outcome = writer(&storage).save(&article(), 0).await.unwrap();

        assert!(matches!(outcome, SaveOutcome::Skipped { .. }));
        assert_eq!(outcome.saved_title(), None);
        assert_eq!(
            storage.read("2026-10-18-mars-rover-finds-water.md").await.unwrap(),
            "original"
        );
        assert_eq!(storage.len().await, 1);
    }
}
