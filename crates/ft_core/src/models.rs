use async_trait::async_trait;
use std::fmt;
use crate::Result;

/// A remote (or local) text-generation backend.
#[async_trait]
pub trait InferenceModel: Send + Sync + fmt::Debug {
    /// Human-readable backend name, used in logs
    fn name(&self) -> &str;

    /// Send a single prompt and return the raw text of the response
    async fn generate(&self, prompt: &str) -> Result<String>;
}
