use ft_core::{Error, InferenceModel, Result};
use std::fmt;
use std::sync::Arc;

pub mod dummy;
pub mod gemini;

pub use dummy::DummyModel;
pub use gemini::GeminiModel;

#[derive(Clone, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub base_url: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Build an inference backend by name (`gemini` or `dummy`).
pub fn create_model(kind: &str, config: Config) -> Result<Arc<dyn InferenceModel>> {
    match kind.to_lowercase().as_str() {
        "gemini" => {
            let mut model = GeminiModel::new(config.api_key)?;
            if let Some(name) = config.model_name.as_deref() {
                model = model.with_model(name);
            }
            if let Some(url) = config.base_url.as_deref() {
                model = model.with_base_url(url);
            }
            Ok(Arc::new(model))
        }
        "dummy" => Ok(Arc::new(DummyModel::new())),
        other => Err(Error::Config(format!(
            "Unknown model: {} (available: gemini, dummy)",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_model() {
        let gemini = create_model(
            "gemini",
            Config {
                api_key: Some("k".to_string()),
                ..Config::default()
            },
        )
        .unwrap();
        assert_eq!(gemini.name(), "Gemini");

        assert_eq!(create_model("dummy", Config::default()).unwrap().name(), "Dummy");
        assert!(create_model("gemini", Config::default()).is_err());
        assert!(create_model("ollama", Config::default()).is_err());
    }
}
