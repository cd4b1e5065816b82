use ft_core::{Category, Error, Result, SourceConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

const NASA_BREAKING: &str = "https://www.nasa.gov/rss/dyn/breaking_news.rss";

/// Ordered, validated list of feeds a run walks through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceRegistry {
    sources: Vec<SourceConfig>,
}

impl SourceRegistry {
    pub fn new(sources: Vec<SourceConfig>) -> Result<Self> {
        for source in &sources {
            validate(source)?;
        }
        Ok(Self { sources })
    }

    /// Space and earth-science feeds used by the daily fetch.
    pub fn news() -> Self {
        Self {
            sources: vec![
                SourceConfig::new("NASA", NASA_BREAKING, Category::Astronomy, 2),
                SourceConfig::new("Space.com", "https://www.space.com/feeds/all", Category::Astronomy, 1),
                SourceConfig::new(
                    "NASA Earth",
                    "https://earthobservatory.nasa.gov/feeds/image-of-the-day.rss",
                    Category::Weather,
                    1,
                ),
                SourceConfig::new("EarthSky", "https://earthsky.org/space/feed/", Category::Astronomy, 1),
            ],
        }
    }

    /// News feeds plus keyword-filtered general feeds for the landing page.
    pub fn landing() -> Self {
        let mut sources = Self::news().sources;
        sources.push(
            SourceConfig::new(
                "Al Jazeera",
                "https://www.aljazeera.com/xml/rss/all.xml",
                Category::Islamic,
                1,
            )
            .with_keywords(&[
                "islam", "muslim", "ramadan", "hajj", "eid", "mosque", "hijri", "crescent", "zakat",
            ]),
        );
        sources.push(
            SourceConfig::new("TechCrunch", "https://techcrunch.com/feed/", Category::Ai, 1).with_keywords(&[
                "artificial intelligence",
                "openai",
                "chatgpt",
                "gemini",
                "machine learning",
                "llm",
                "deepmind",
            ]),
        );
        Self { sources }
    }

    /// The single feed the agent digests.
    pub fn agent() -> Self {
        Self {
            sources: vec![SourceConfig::new("NASA", NASA_BREAKING, Category::Astronomy, 2)],
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let sources: Vec<SourceConfig> = serde_json::from_str(json)?;
        Self::new(sources)
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::Config(format!("Cannot read sources file {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn sources(&self) -> &[SourceConfig] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

fn validate(source: &SourceConfig) -> Result<()> {
    if source.name.trim().is_empty() {
        return Err(Error::Config(format!("Source with URL {} has no name", source.feed_url)));
    }

    let url = Url::parse(&source.feed_url)
        .map_err(|e| Error::Config(format!("Invalid URL for {}: {}", source.name, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(Error::Config(format!(
            "Unsupported scheme '{}' for {}",
            scheme, source.name
        ))),
    }
}
