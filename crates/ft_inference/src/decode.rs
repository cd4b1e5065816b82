use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("no JSON object found in model response")]
    NoJson,

    #[error("malformed JSON in model response: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// First balanced `{...}` in `text`. Braces inside JSON string literals do
/// not count towards the balance.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find('{') {
        let start = search_from + offset;
        if let Some(end) = balanced_end(&text[start..]) {
            return Some(&text[start..start + end]);
        }
        search_from = start + 1;
    }
    None
}

/// Byte length of the balanced object at the start of `text`, if it closes.
fn balanced_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx + c.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}

/// Pull the first JSON object out of free text and decode it.
pub fn decode_response<T: DeserializeOwned>(text: &str) -> Result<T, DecodeError> {
    let json = extract_json_object(text).ok_or(DecodeError::NoJson)?;
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Sample {
        title: String,
    }

    #[test]
    fn test_extracts_object_from_chatter() {
        let text = "Sure! Here you go:\n```json\n{\"title\": \"Bulan {purnama}\"}\n```\nAnything else?";
        assert_eq!(
            extract_json_object(text),
            Some("{\"title\": \"Bulan {purnama}\"}")
        );
    }

    #[test]
    fn test_nested_objects_and_escaped_quotes() {
        let text = r#"x {"a": {"b": "say \"}\""}, "c": 1} y {"d": 2}"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"a": {"b": "say \"}\""}, "c": 1}"#)
        );
    }

    #[test]
    fn test_skips_unclosed_brace() {
        let text = r#"Use { carefully. {"title": "ok"}"#;
        assert_eq!(extract_json_object(text), Some(r#"{"title": "ok"}"#));
        assert_eq!(extract_json_object("only { opening"), None);

        let text = r#"stray } then {"title": "ok"}"#;
        assert_eq!(extract_json_object(text), Some(r#"{"title": "ok"}"#));
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(
            decode_response::<Sample>("no json at all"),
            Err(DecodeError::NoJson)
        ));
        assert!(matches!(
            decode_response::<Sample>("{\"other\": 1}"),
            Err(DecodeError::Invalid(_))
        ));
        assert_eq!(
            decode_response::<Sample>("{\"title\": \"Hi\"}").unwrap(),
            Sample { title: "Hi".to_string() }
        );
    }
}
