pub mod decode;
pub mod enrich;
pub mod models;
pub mod schema;

pub use decode::{decode_response, extract_json_object, DecodeError};
pub use enrich::{Enrichment, EnrichmentService};
pub use models::{create_model, Config};
pub use schema::{ArticleText, Digest, PromptSchema, Translation};

#[cfg(test)]
mod tests {
    use super::*;
    use ft_core::{Category, RawItem};

    #[tokio::test]
    async fn test_dummy_pipeline_always_falls_back() {
        let model = create_model("dummy", Config::default()).unwrap();
        let service = EnrichmentService::new(model);
        let item = RawItem {
            title: "Comet brightens".to_string(),
            snippet: "A comet is visible.".to_string(),
            ..RawItem::default()
        };

        let result = service.enrich::<Translation>(&item, Category::Astronomy).await;
        assert!(result.is_fallback());
        assert_eq!(service.model_name(), "Dummy");
    }
}
