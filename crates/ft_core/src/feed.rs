use async_trait::async_trait;
use crate::types::RawItem;
use crate::Result;

#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Fetch a feed and return its items in document order
    async fn fetch(&self, url: &str) -> Result<Vec<RawItem>>;
}
