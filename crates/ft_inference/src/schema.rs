use ft_core::text::truncate_chars;
use ft_core::{Category, RawItem};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Characters of feed content sent to the model.
pub const PROMPT_CONTENT_CHARS: usize = 300;

/// Characters of the original snippet kept as summary when the model fails.
pub const FALLBACK_SUMMARY_CHARS: usize = 150;

/// Text fields of an article after enrichment (or fallback).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleText {
    pub title_en: String,
    pub title_localized: String,
    pub summary_en: String,
    pub summary_localized: String,
    pub keywords: Vec<String>,
}

/// A JSON shape the model is asked to produce.
pub trait PromptSchema: DeserializeOwned + Send {
    /// Prompt asking for exactly this shape
    fn prompt(item: &RawItem, category: Category) -> String;

    /// Untranslated stand-in built from the feed item alone
    fn fallback(item: &RawItem) -> Self;

    fn into_text(self, item: &RawItem) -> ArticleText;
}

fn prompt_content(item: &RawItem) -> &str {
    let content = if item.snippet.trim().is_empty() {
        &item.title
    } else {
        &item.snippet
    };
    truncate_chars(content, PROMPT_CONTENT_CHARS)
}

fn fallback_summary(item: &RawItem) -> String {
    truncate_chars(&item.snippet, FALLBACK_SUMMARY_CHARS).to_string()
}

/// Bilingual title and summary, used by the multi-source runs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Translation {
    pub title_en: String,
    pub title_ms: String,
    pub summary_en: String,
    pub summary_ms: String,
}

impl PromptSchema for Translation {
    fn prompt(item: &RawItem, category: Category) -> String {
        format!(
            r#"Translate this {category} news article. Return ONLY valid JSON, nothing else.

Title: {title}
Content: {content}

Return this exact format:
{{"title_en":"English title max 80 chars","title_ms":"Tajuk Melayu max 80 chars","summary_en":"English summary max 150 chars","summary_ms":"Ringkasan Melayu max 150 chars"}}"#,
            category = category,
            title = item.title,
            content = prompt_content(item),
        )
    }

    fn fallback(item: &RawItem) -> Self {
        Self {
            title_en: item.title.clone(),
            title_ms: item.title.clone(),
            summary_en: fallback_summary(item),
            summary_ms: fallback_summary(item),
        }
    }

    fn into_text(self, _item: &RawItem) -> ArticleText {
        ArticleText {
            title_en: self.title_en,
            title_localized: self.title_ms,
            summary_en: self.summary_en,
            summary_localized: self.summary_ms,
            keywords: Vec::new(),
        }
    }
}

/// Malay-only digest with keywords, used by the single-feed agent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Digest {
    pub title_ms: String,
    pub summary_ms: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl PromptSchema for Digest {
    fn prompt(item: &RawItem, category: Category) -> String {
        format!(
            r#"Translate this {label} news to natural Bahasa Malaysia and create a summary.

Original Title: {title}
Content: {content}

Return ONLY valid JSON (no markdown formatting, no code blocks):
{{
  "title_ms": "Translated title in natural conversational Malay",
  "summary_ms": "Engaging summary in Malay (150-200 words, 2-3 paragraphs). Make it interesting for Malaysian readers.",
  "keywords": ["kata kunci 1", "kata kunci 2", "kata kunci 3"]
}}"#,
            label = category,
            title = item.title,
            content = prompt_content(item),
        )
    }

    fn fallback(item: &RawItem) -> Self {
        Self {
            title_ms: item.title.clone(),
            summary_ms: fallback_summary(item),
            keywords: Vec::new(),
        }
    }

    fn into_text(self, item: &RawItem) -> ArticleText {
        ArticleText {
            title_en: item.title.clone(),
            title_localized: self.title_ms,
            summary_en: fallback_summary(item),
            summary_localized: self.summary_ms,
            keywords: self.keywords,
        }
    }
}
