use ft_core::{Category, InferenceModel, RawItem};
use std::sync::Arc;

use crate::decode::decode_response;
use crate::schema::PromptSchema;

/// Outcome of one enrichment call. Both arms carry usable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enrichment<T> {
    Decoded(T),
    Fallback { fields: T, reason: String },
}

impl<T> Enrichment<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Enrichment::Fallback { .. })
    }

    pub fn into_fields(self) -> T {
        match self {
            Enrichment::Decoded(fields) | Enrichment::Fallback { fields, .. } => fields,
        }
    }
}

/// Sends one prompt per article and never fails: any error becomes a fallback.
#[derive(Debug, Clone)]
pub struct EnrichmentService {
    model: Arc<dyn InferenceModel>,
}

impl EnrichmentService {
    pub fn new(model: Arc<dyn InferenceModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub async fn enrich<T: PromptSchema>(&self, item: &RawItem, category: Category) -> Enrichment<T> {
        let prompt = T::prompt(item, category);

        let decoded = match self.model.generate(&prompt).await {
            Ok(response) => decode_response::<T>(&response).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match decoded {
            Ok(fields) => Enrichment::Decoded(fields),
            Err(reason) => {
                tracing::warn!("⚠️ Translation error: {}", reason);
                Enrichment::Fallback {
                    fields: T::fallback(item),
                    reason,
                }
            }
        }
    }
}
