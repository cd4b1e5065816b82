use chrono::{DateTime, Datelike, NaiveDate, Utc};
use ft_core::EnrichedArticle;

pub const SLUG_MAX_LEN: usize = 50;
const FALLBACK_SLUG: &str = "article";

const MALAY_MONTHS: [&str; 12] = [
    "Januari", "Februari", "Mac", "April", "Mei", "Jun", "Julai", "Ogos", "September", "Oktober",
    "November", "Disember",
];

/// Lowercase ASCII slug where each run of characters outside `[a-z0-9]` becomes one `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len().min(SLUG_MAX_LEN));
    let mut pending_separator = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            let separate = pending_separator && !slug.is_empty();
            let needed = if separate { 2 } else { 1 };
            if slug.len() + needed > SLUG_MAX_LEN {
                break;
            }
            if separate {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Escape a value for a double-quoted frontmatter field.
///
/// Runs of three dashes become `\u{2014}` so the value cannot close the
/// metadata block.
pub fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\r' | '\n' => escaped.push(' '),
            c => escaped.push(c),
        }
    }
    escaped.replace(crate::frontmatter::DELIMITER, "\u{2014}")
}

/// `18 Oktober 2026`
pub fn format_malay_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MALAY_MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Layout of a generated article file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleTemplate {
    /// `<date>-<slug>.md` with a quoted metadata block and bilingual body
    Frontmatter,
    /// `article-<millis>-<index>.md`, a Malay reading digest
    Digest,
}

impl ArticleTemplate {
    pub fn filename(&self, article: &EnrichedArticle, now: DateTime<Utc>, index: usize) -> String {
        match self {
            ArticleTemplate::Frontmatter => format!(
                "{}-{}.md",
                article.publish_date.format("%Y-%m-%d"),
                slugify(&article.title_en)
            ),
            ArticleTemplate::Digest => {
                format!("article-{}-{}.md", now.timestamp_millis(), index)
            }
        }
    }

    pub fn render(&self, article: &EnrichedArticle) -> String {
        match self {
            ArticleTemplate::Frontmatter => render_frontmatter(article),
            ArticleTemplate::Digest => render_digest(article),
        }
    }
}

pub fn render_frontmatter(article: &EnrichedArticle) -> String {
    format!(
        r#"---
title_en: "{title_en}"
title_ms: "{title_ms}"
date: "{date}"
source: "{source}"
category: "{category}"
image: "{image}"
link: "{link}"
---

{summary_en}

---

{summary_ms}
"#,
        title_en = escape_value(&article.title_en),
        title_ms = escape_value(&article.title_localized),
        date = article.publish_date.format("%Y-%m-%d"),
        source = escape_value(&article.source_name),
        category = article.category,
        image = escape_value(&article.image_url),
        link = escape_value(&article.link),
        summary_en = article.summary_en.trim(),
        summary_ms = article.summary_localized.trim(),
    )
}

pub fn render_digest(article: &EnrichedArticle) -> String {
    let keywords = if article.keywords.is_empty() {
        "-".to_string()
    } else {
        article.keywords.join(" • ")
    };

    format!(
        r#"# {title_ms}

**📅 Tarikh Diterbitkan:** {date}
**🔗 Sumber Asal:** [{title_en}]({link})
**📂 Kategori:** {category}

---

## 📖 Ringkasan

{summary_ms}

---

**🏷️ Kata Kunci:** {keywords}

---

<small>

*Artikel ini diterjemahkan secara automatik menggunakan teknologi AI daripada sumber berita [{source}]({link}). Untuk maklumat terperinci, sila rujuk artikel asal.*

**Penafian:** Terjemahan automatik mungkin tidak sempurna. Untuk ketepatan penuh, rujuk sumber asal dalam Bahasa Inggeris.

</small>
"#,
        title_ms = article.title_localized.trim(),
        date = format_malay_date(article.publish_date),
        title_en = article.title_en.trim(),
        link = article.link,
        category = article.category.label_ms(),
        summary_ms = article.summary_localized.trim(),
        keywords = keywords,
        source = article.source_name,
    )
}
