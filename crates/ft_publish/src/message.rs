use ft_core::text::truncate_chars;
use ft_core::StoredArticle;

/// Characters of the article body quoted in a post.
pub const EXCERPT_CHARS: usize = 200;

const FOOTER: &str = "via [FalakTech](https://falaktech.my)";

/// Build the Telegram Markdown post for an article.
pub fn format_message(article: &StoredArticle) -> String {
    let (icon, hashtags) = match article.category() {
        Some(category) => (category.icon(), category.hashtags()),
        None => ("📰", "#News"),
    };

    format!(
        "{icon} *{title}*\n\n{excerpt}...\n\n🔗 {link}\n\n_Source: {source}_\n{hashtags}\n\n{footer}",
        icon = icon,
        title = article.title_en,
        excerpt = truncate_chars(&article.body, EXCERPT_CHARS),
        link = article.link,
        source = article.source,
        hashtags = hashtags,
        footer = FOOTER,
    )
}
