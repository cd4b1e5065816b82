use ft_core::StoredArticle;
use std::collections::HashMap;

pub const DELIMITER: &str = "---";

/// A well-formed file splits into at least: preamble, metadata, body.
pub const MIN_PARTS: usize = 3;

/// Parse a generated frontmatter file.
///
/// Returns `None` when the delimiter structure is incomplete or the
/// metadata block carries no `title_en`.
pub fn parse_article(filename: &str, content: &str) -> Option<StoredArticle> {
    let content = content.replace("\r\n", "\n").replace('\r', "\n");
    let parts: Vec<&str> = content.split(DELIMITER).collect();
    if parts.len() < MIN_PARTS {
        return None;
    }

    let fields = parse_metadata(parts[1]);
    let title_en = fields.get("title_en").filter(|t| !t.is_empty())?.clone();
    let field = |key: &str| fields.get(key).cloned().unwrap_or_default();

    let body = parts[2..].join(DELIMITER);
    let body = body.trim().split("\n\n").next().unwrap_or_default().to_string();

    Some(StoredArticle {
        filename: filename.to_string(),
        title_en,
        title_ms: field("title_ms"),
        date: field("date"),
        source: field("source"),
        category: field("category"),
        image: field("image"),
        link: field("link"),
        body,
    })
}

fn parse_metadata(block: &str) -> HashMap<String, String> {
    block
        .trim()
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), unquote(value.trim())))
        })
        .collect()
}

fn unquote(value: &str) -> String {
    let value = value.strip_prefix(['"', '\'']).unwrap_or(value);
    let value = match value.strip_suffix(['"', '\'']) {
        // an escaped quote is content, not the closing quote
        Some(stripped) if !ends_with_escape(stripped) => stripped,
        _ => value,
    };

    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next @ ('"' | '\\')) => out.push(next),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn ends_with_escape(value: &str) -> bool {
    value.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}
