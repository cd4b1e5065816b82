pub mod chat;
pub mod error;
pub mod feed;
pub mod models;
pub mod pacing;
pub mod storage;
pub mod text;
pub mod types;

pub use chat::ChatSender;
pub use error::Error;
pub use feed::FeedFetcher;
pub use models::InferenceModel;
pub use pacing::{Clock, FixedClock, FixedDelay, NoDelay, Pacer, SystemClock};
pub use storage::ArticleStorage;
pub use types::{
    Category, EnrichedArticle, ImageFields, RawItem, SaveOutcome, SourceConfig, StoredArticle,
};

pub type Result<T> = std::result::Result<T, Error>;
