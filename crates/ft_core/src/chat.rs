use async_trait::async_trait;
use crate::Result;

#[async_trait]
pub trait ChatSender: Send + Sync {
    /// Post a formatted message to the configured channel
    async fn send_message(&self, text: &str) -> Result<()>;
}
