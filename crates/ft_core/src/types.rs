use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Astronomy,
    Weather,
    Islamic,
    Ai,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Astronomy,
        Category::Weather,
        Category::Islamic,
        Category::Ai,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Astronomy => "astronomy",
            Category::Weather => "weather",
            Category::Islamic => "islamic",
            Category::Ai => "ai",
        }
    }

    /// Emoji used as the leading tag of a channel post
    pub fn icon(&self) -> &'static str {
        match self {
            Category::Astronomy => "🔭",
            Category::Weather => "🌍",
            Category::Islamic => "🕌",
            Category::Ai => "🤖",
        }
    }

    pub fn hashtags(&self) -> &'static str {
        match self {
            Category::Astronomy => "#Astronomy #Space #NASA",
            Category::Weather => "#Earth #Climate",
            Category::Islamic => "#Islamic #Muslim",
            Category::Ai => "#AI #Technology",
        }
    }

    /// Category label in Malay, used by the digest template
    pub fn label_ms(&self) -> &'static str {
        match self {
            Category::Astronomy => "Astronomi & Sains Angkasa",
            Category::Weather => "Bumi & Cuaca",
            Category::Islamic => "Hal Ehwal Islam",
            Category::Ai => "Kecerdasan Buatan",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Config(format!("Unknown category: {}", s)))
    }
}

fn default_limit() -> usize {
    1
}

/// One entry of the feed registry. Immutable once the registry is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    #[serde(rename = "url")]
    pub feed_url: String,
    pub category: Category,
    #[serde(rename = "limit", default = "default_limit")]
    pub per_run_limit: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

impl SourceConfig {
    pub fn new(name: &str, feed_url: &str, category: Category, per_run_limit: usize) -> Self {
        Self {
            name: name.to_string(),
            feed_url: feed_url.to_string(),
            category,
            per_run_limit,
            keywords: None,
        }
    }

    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = Some(keywords.iter().map(|k| k.to_string()).collect());
        self
    }
}

/// Image-bearing metadata as found on a feed entry, before precedence is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageFields {
    pub enclosure: Option<String>,
    pub media_content: Option<String>,
    pub media_thumbnail: Option<String>,
}

/// A feed entry as produced by the fetcher. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawItem {
    pub title: String,
    /// Plain-text description with markup stripped
    pub snippet: String,
    pub link: String,
    pub image_fields: ImageFields,
    /// Embedded HTML (`content:encoded`, description or Atom content)
    pub content_html: String,
    pub published: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedArticle {
    pub title_en: String,
    pub title_localized: String,
    pub summary_en: String,
    pub summary_localized: String,
    pub keywords: Vec<String>,
    pub source_name: String,
    pub category: Category,
    pub image_url: String,
    pub link: String,
    pub publish_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new file was written; `title` is the English title it was saved under
    Saved { filename: String, title: String },
    /// A file with the computed name already existed
    Skipped { filename: String },
}

impl SaveOutcome {
    pub fn saved_title(&self) -> Option<&str> {
        match self {
            SaveOutcome::Saved { title, .. } => Some(title),
            SaveOutcome::Skipped { .. } => None,
        }
    }
}

/// An article read back from a persisted frontmatter file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredArticle {
    pub filename: String,
    pub title_en: String,
    pub title_ms: String,
    pub date: String,
    pub source: String,
    /// Kept as text: files may carry categories this build does not know
    pub category: String,
    pub image: String,
    pub link: String,
    /// First paragraph of the body (the English summary)
    pub body: String,
}

impl StoredArticle {
    pub fn category(&self) -> Option<Category> {
        self.category.parse().ok()
    }
}
