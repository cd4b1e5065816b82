use ft_core::text::preview;
use ft_core::{
    Clock, EnrichedArticle, FeedFetcher, Pacer, RawItem, Result, SaveOutcome, SourceConfig,
};
use ft_inference::{Digest, EnrichmentService, PromptSchema, Translation};
use ft_storage::ArticleWriter;
use std::sync::Arc;

use crate::dedup::SeenTitles;
use crate::filter::is_relevant;
use crate::image::extract_image;
use crate::logging::Logger;
use crate::registry::SourceRegistry;

/// What happened to one source during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceReport {
    pub name: String,
    pub limit: usize,
    pub saved: usize,
    /// Target file already existed
    pub skipped: usize,
    pub duplicates: usize,
    /// Dropped by the keyword filter
    pub filtered: usize,
    /// Saved with untranslated fallback text
    pub fallbacks: usize,
    /// Articles that failed to enrich or save (agent runs only)
    pub failed: usize,
    /// Set when the source was abandoned part way
    pub error: Option<String>,
}

impl SourceReport {
    fn new(source: &SourceConfig) -> Self {
        Self {
            name: source.name.clone(),
            limit: source.per_run_limit,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sources: Vec<SourceReport>,
    pub total_saved: usize,
}

impl RunSummary {
    fn push(&mut self, report: SourceReport) {
        self.total_saved += report.saved;
        self.sources.push(report);
    }

    pub fn failed_sources(&self) -> impl Iterator<Item = &SourceReport> {
        self.sources.iter().filter(|r| r.error.is_some())
    }
}

/// Drives feeds through filter, dedup, enrichment and the writer, one
/// article at a time.
pub struct PipelineManager {
    fetcher: Arc<dyn FeedFetcher>,
    enrichment: EnrichmentService,
    writer: ArticleWriter,
    pacer: Arc<dyn Pacer>,
    clock: Arc<dyn Clock>,
}

impl PipelineManager {
    pub fn new(
        fetcher: Arc<dyn FeedFetcher>,
        enrichment: EnrichmentService,
        writer: ArticleWriter,
        pacer: Arc<dyn Pacer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            fetcher,
            enrichment,
            writer,
            pacer,
            clock,
        }
    }

    /// Walk every source in order with bilingual translation.
    ///
    /// A failing source is logged and recorded in its report; the run
    /// carries on with the next one. Titles saved by earlier sources take
    /// part in duplicate detection for later ones.
    pub async fn run(&self, registry: &SourceRegistry) -> RunSummary {
        let mut summary = RunSummary::default();
        let mut seen = SeenTitles::new();

        for source in registry.sources() {
            let log = Logger::for_source(&source.name);
            let mut report = SourceReport::new(source);

            if let Err(e) = self.run_source(source, &mut seen, &mut report, &log).await {
                log.error(&format!("❌ Error: {}", e));
                report.error = Some(e.to_string());
            }
            log.info(&format!("✅ Saved {}/{}", report.saved, report.limit));
            summary.push(report);
        }

        tracing::info!("🎉 Total saved: {}", summary.total_saved);
        summary
    }

    async fn run_source(
        &self,
        source: &SourceConfig,
        seen: &mut SeenTitles,
        report: &mut SourceReport,
        log: &Logger,
    ) -> Result<()> {
        if source.per_run_limit == 0 {
            log.debug("Limit is 0, skipping");
            return Ok(());
        }

        log.info(&format!("📡 Fetching from {}", source.feed_url));
        let items = self.fetcher.fetch(&source.feed_url).await?;
        log.debug(&format!("{} items in feed", items.len()));

        for (index, item) in items.iter().enumerate() {
            if report.saved >= source.per_run_limit {
                break;
            }

            if !is_relevant(item, source.keywords.as_deref()) {
                report.filtered += 1;
                continue;
            }

            if seen.is_duplicate(&item.title) {
                log.info(&format!("⏭️ Duplicate: {}", preview(&item.title, 40)));
                report.duplicates += 1;
                continue;
            }

            log.info(&format!("📝 Processing: {}", preview(&item.title, 50)));
            let (outcome, fallback) = self.process::<Translation>(item, source, index).await?;
            if fallback {
                report.fallbacks += 1;
            }
            match outcome {
                SaveOutcome::Saved { title, .. } => {
                    seen.record(&title);
                    report.saved += 1;
                }
                SaveOutcome::Skipped { .. } => report.skipped += 1,
            }

            self.pacer.pause().await;
        }

        Ok(())
    }

    /// Digest the first `per_run_limit` items of a single feed.
    ///
    /// No filter or duplicate check applies. A failed fetch is fatal; a
    /// failed article is logged and the next one is tried.
    pub async fn run_agent(&self, source: &SourceConfig) -> Result<RunSummary> {
        let log = Logger::for_source(&source.name);
        let mut report = SourceReport::new(source);

        log.info(&format!("📰 Fetching latest {} news", source.category));
        let items = self.fetcher.fetch(&source.feed_url).await?;
        let articles: Vec<&RawItem> = items.iter().take(source.per_run_limit).collect();
        log.info(&format!("✅ Found {} articles to process", articles.len()));

        for (index, item) in articles.iter().enumerate() {
            let article_log = log.clone().with_prefix(format!("[{}/{}]", index + 1, articles.len()));
            article_log.info(&format!("📝 Title: {}", preview(&item.title, 60)));

            match self.process::<Digest>(item, source, index).await {
                Ok((outcome, fallback)) => {
                    if fallback {
                        report.fallbacks += 1;
                    }
                    match outcome {
                        SaveOutcome::Saved { .. } => report.saved += 1,
                        SaveOutcome::Skipped { .. } => report.skipped += 1,
                    }
                }
                Err(e) => {
                    article_log.error(&format!("❌ Error processing article: {}", e));
                    report.failed += 1;
                }
            }

            if index + 1 < articles.len() {
                self.pacer.pause().await;
            }
        }

        log.info(&format!("📊 Total articles processed: {}", articles.len()));
        let mut summary = RunSummary::default();
        summary.push(report);
        Ok(summary)
    }

    /// Enrich one item and hand it to the writer. The flag is true when
    /// the model output could not be used.
    async fn process<T: PromptSchema>(
        &self,
        item: &RawItem,
        source: &SourceConfig,
        index: usize,
    ) -> Result<(SaveOutcome, bool)> {
        let image_url = extract_image(item);
        let enrichment = self.enrichment.enrich::<T>(item, source.category).await;
        let fallback = enrichment.is_fallback();
        let text = enrichment.into_fields().into_text(item);

        let article = EnrichedArticle {
            title_en: text.title_en,
            title_localized: text.title_localized,
            summary_en: text.summary_en,
            summary_localized: text.summary_localized,
            keywords: text.keywords,
            source_name: source.name.clone(),
            category: source.category,
            image_url,
            link: item.link.clone(),
            publish_date: self.clock.now().date_naive(),
        };

        let outcome = self.writer.save(&article, index).await?;
        Ok((outcome, fallback))
    }
}
