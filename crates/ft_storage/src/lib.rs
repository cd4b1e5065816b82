use ft_core::{ArticleStorage, Error, Result};
use std::path::Path;
use std::sync::Arc;

pub mod backends;
pub mod cleanup;
pub mod frontmatter;
pub mod template;
pub mod writer;

pub use backends::*;
pub use cleanup::clean_output;
pub use frontmatter::parse_article;
pub use template::{slugify, ArticleTemplate};
pub use writer::ArticleWriter;

/// Build a storage backend by name (`markdown` or `memory`).
pub fn create_storage(kind: &str, output_dir: &Path) -> Result<Arc<dyn ArticleStorage>> {
    match kind {
        "markdown" | "file" => Ok(Arc::new(MarkdownStorage::new_with_path(output_dir))),
        "memory" => Ok(Arc::new(MemoryStorage::new())),
        other => Err(Error::Config(format!(
            "Unknown storage backend: {} (expected markdown or memory)",
            other
        ))),
    }
}
