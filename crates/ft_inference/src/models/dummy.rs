use ft_core::{InferenceModel, Result};
use std::fmt;

/// Offline stand-in: never produces structured output, so every article
/// goes through the untranslated fallback.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl InferenceModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let words = prompt.split_whitespace().count();
        Ok(format!("Dummy model received a prompt of {} words.", words))
    }
}
