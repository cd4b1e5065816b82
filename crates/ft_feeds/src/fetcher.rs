use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ft_core::{Error, FeedFetcher, ImageFields, RawItem, Result};
use reqwest::Client;
use scraper::Html;
use std::collections::BTreeMap;
use std::time::Duration;

const USER_AGENT: &str = "FalakTechNews/2.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Downloads feeds over HTTP and parses them as RSS, then Atom.
#[derive(Debug, Clone)]
pub struct HttpFeedFetcher {
    client: Client,
}

impl HttpFeedFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<RawItem>> {
        tracing::debug!("Fetching feed from: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Feed(format!("HTTP {} when fetching {}", status, url)));
        }

        let bytes = response.bytes().await?;
        let items = parse_feed(&bytes)?;
        tracing::debug!("Parsed {} items from {}", items.len(), url);
        Ok(items)
    }
}

/// Parse raw feed bytes. RSS 2.0 is tried first, then Atom.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<RawItem>> {
    if let Ok(channel) = rss::Channel::read_from(bytes) {
        return Ok(channel.items().iter().map(from_rss_item).collect());
    }

    match atom_syndication::Feed::read_from(bytes) {
        Ok(feed) => Ok(feed.entries().iter().map(from_atom_entry).collect()),
        Err(e) => Err(Error::Feed(format!("Not a valid RSS or Atom feed: {}", e))),
    }
}

fn from_rss_item(item: &rss::Item) -> RawItem {
    let description = item.description().unwrap_or_default();
    let extensions = item.extensions();

    RawItem {
        title: item.title().unwrap_or_default().trim().to_string(),
        snippet: html_to_text(description),
        link: item.link().unwrap_or_default().trim().to_string(),
        image_fields: ImageFields {
            enclosure: item.enclosure().map(|e| e.url().to_string()),
            media_content: media_url(extensions, "content", |e| e.attrs()),
            media_thumbnail: media_url(extensions, "thumbnail", |e| e.attrs()),
        },
        content_html: item.content().unwrap_or(description).to_string(),
        published: item
            .pub_date()
            .and_then(|d| DateTime::parse_from_rfc2822(d).ok())
            .map(|d| d.with_timezone(&Utc)),
    }
}

fn from_atom_entry(entry: &atom_syndication::Entry) -> RawItem {
    let summary = entry.summary().map(|s| s.as_str()).unwrap_or_default();
    let content = entry.content().and_then(|c| c.value()).unwrap_or_default();
    let extensions = entry.extensions();

    let link = entry
        .links()
        .iter()
        .find(|l| l.rel() == "alternate")
        .or_else(|| entry.links().first())
        .map(|l| l.href().to_string())
        .unwrap_or_default();

    RawItem {
        title: entry.title().as_str().trim().to_string(),
        snippet: html_to_text(if summary.is_empty() { content } else { summary }),
        link,
        image_fields: ImageFields {
            enclosure: entry
                .links()
                .iter()
                .find(|l| l.rel() == "enclosure")
                .map(|l| l.href().to_string()),
            media_content: media_url(extensions, "content", |e| e.attrs()),
            media_thumbnail: media_url(extensions, "thumbnail", |e| e.attrs()),
        },
        content_html: if content.is_empty() { summary } else { content }.to_string(),
        published: Some(
            entry
                .published()
                .unwrap_or_else(|| entry.updated())
                .with_timezone(&Utc),
        ),
    }
}

/// `url` attribute of the first `media:<name>` element that has one.
fn media_url<E>(
    extensions: &BTreeMap<String, BTreeMap<String, Vec<E>>>,
    name: &str,
    attrs: impl Fn(&E) -> &BTreeMap<String, String>,
) -> Option<String> {
    extensions
        .get("media")?
        .get(name)?
        .iter()
        .find_map(|e| attrs(e).get("url").filter(|u| !u.is_empty()).cloned())
}

/// Visible text of an HTML fragment with whitespace collapsed.
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: String = fragment.root_element().text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
