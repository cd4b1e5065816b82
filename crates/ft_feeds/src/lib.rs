pub mod cli;
pub mod dedup;
pub mod fetcher;
pub mod filter;
pub mod image;
pub mod logging;
pub mod manager;
pub mod registry;

pub use cli::{HumanDuration, RunArgs, Variant};
pub use dedup::{normalize_title, SeenTitles};
pub use fetcher::{parse_feed, HttpFeedFetcher};
pub use filter::is_relevant;
pub use image::extract_image;
pub use logging::{init_logging, Logger};
pub use manager::{PipelineManager, RunSummary, SourceReport};
pub use registry::SourceRegistry;
