use ft_core::RawItem;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref IMG_SRC: Regex =
        Regex::new(r#"(?i)<img[^>]+src=["']([^"']+)["']"#).expect("image pattern is valid");
}

/// Best-effort image URL for a feed item; empty when nothing is found.
///
/// Order: enclosure, `media:content`, `media:thumbnail`, first `<img>` in
/// the embedded HTML.
pub fn extract_image(item: &RawItem) -> String {
    let fields = &item.image_fields;
    [&fields.enclosure, &fields.media_content, &fields.media_thumbnail]
        .into_iter()
        .flatten()
        .find(|url| !url.trim().is_empty())
        .cloned()
        .or_else(|| first_img_src(&item.content_html))
        .unwrap_or_default()
}

fn first_img_src(html: &str) -> Option<String> {
    IMG_SRC
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
