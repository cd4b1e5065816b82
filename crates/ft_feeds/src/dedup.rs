/// Normalized titles are compared on this many leading characters.
pub const NORMALIZED_TITLE_LEN: usize = 30;

/// Lowercase, keep only `[a-z0-9]`, first 30 characters.
pub fn normalize_title(title: &str) -> String {
    title
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .take(NORMALIZED_TITLE_LEN)
        .collect()
}

/// Titles saved during the current run.
///
/// A candidate is a duplicate when its normalized form contains, or is
/// contained in, a seen one. Short titles therefore match loosely, and a
/// title with no ASCII alphanumerics normalizes to "" and matches anything.
#[derive(Debug, Default, Clone)]
pub struct SeenTitles {
    titles: Vec<String>,
    normalized: Vec<String>,
}

impl SeenTitles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, title: &str) {
        self.titles.push(title.to_string());
        self.normalized.push(normalize_title(title));
    }

    pub fn is_duplicate(&self, title: &str) -> bool {
        let candidate = normalize_title(title);
        self.normalized
            .iter()
            .any(|seen| candidate.contains(seen.as_str()) || seen.contains(candidate.as_str()))
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("NASA's Webb: 2 New Moons!"), "nasaswebb2newmoons");
        let long = normalize_title("The Quick Brown Fox Jumps Over The Lazy Dog Again");
        assert_eq!(long.len(), NORMALIZED_TITLE_LEN);
        assert_eq!(long, "thequickbrownfoxjumpsoverthela");
    }

    #[test]
    fn test_normalized_form_is_restricted() {
        for title in ["Ça va? Ünïcödé — ✨", "ALL CAPS 123", "", "   ", "日本語のタイトル"] {
            let normalized = normalize_title(title);
            assert!(normalized.len() <= NORMALIZED_TITLE_LEN);
            assert!(normalized.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_extended_title_is_duplicate() {
        let mut seen = SeenTitles::new();
        seen.record("NASA announces new telescope");
        assert!(seen.is_duplicate("NASA announces new telescope discovery"));
        assert!(seen.is_duplicate("NASA Announces New Telescope"));
        assert!(!seen.is_duplicate("Hurricane season forecast"));
    }

    #[test]
    fn test_shorter_candidate_is_duplicate() {
        let mut seen = SeenTitles::new();
        seen.record("Solar eclipse visible across Malaysia");
        assert!(seen.is_duplicate("Solar eclipse"));
    }

    #[test]
    fn test_empty_log_has_no_duplicates() {
        let seen = SeenTitles::new();
        assert!(!seen.is_duplicate("Anything"));
        assert!(seen.is_empty());
    }

    #[test]
    fn test_non_latin_title_matches_everything() {
        let mut seen = SeenTitles::new();
        seen.record("Mars sample return");
        assert!(seen.is_duplicate("火星"));
        assert_eq!(seen.len(), 1);
    }
}
