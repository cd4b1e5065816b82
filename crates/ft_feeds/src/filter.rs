use ft_core::RawItem;

/// True when no keywords are configured, or any keyword occurs
/// (case-insensitively) in the item's title or snippet.
pub fn is_relevant(item: &RawItem, keywords: Option<&[String]>) -> bool {
    let keywords = match keywords {
        Some(keywords) => keywords,
        None => return true,
    };

    let haystack = format!("{} {}", item.title, item.snippet).to_lowercase();
    keywords
        .iter()
        .any(|keyword| haystack.contains(&keyword.to_lowercase()))
}
