//! Cleanup helpers for generated and scraped text.

use lazy_static::lazy_static;
use regex::Regex;
use crate::{Error, Result};

/// Generated content must be strictly longer than this, in characters.
pub const MIN_CONTENT_CHARS: usize = 150;

lazy_static! {
    static ref MARKUP: Regex = Regex::new(r"<.*?>").expect("valid markup pattern");
    static ref SENTENCE_END: Regex = Regex::new(r"[a-z]\. ").expect("valid sentence pattern");
}

/// Removes anything that looks like an HTML tag. Entities and nesting are left alone.
pub fn strip_markup(text: &str) -> String {
    MARKUP.replace_all(text, "").into_owned()
}

/// Cuts the text right after the last "letter, period, space" sequence so it does not
/// end mid-sentence. Text without such a sequence is returned whole.
pub fn truncate_to_sentence(text: &str) -> &str {
    match SENTENCE_END.find_iter(text).last() {
        Some(m) => &text[..m.start() + 2],
        None => text,
    }
}

/// Keeps everything up to and including the first `?`, dropping trailing boilerplate
/// such as "Related searches".
pub fn extract_question(text: &str) -> Result<&str> {
    text.find('?')
        .map(|end| &text[..=end])
        .ok_or_else(|| Error::MalformedQuestion(text.to_string()))
}

pub fn is_long_enough(content: &str) -> bool {
    content.chars().count() > MIN_CONTENT_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("<b>hi</b> there"), "hi there");
        assert_eq!(strip_markup("a <br/>b <a href=\"x\">c</a>"), "a b c");
        assert_eq!(strip_markup("no tags &amp; entities"), "no tags &amp; entities");
    }

    #[test]
    fn test_truncate_to_sentence() {
        assert_eq!(truncate_to_sentence("abc. def. gh"), "abc. def.");
        assert_eq!(truncate_to_sentence("It was a long day and then"), "It was a long day and then");
        // Uppercase letters and digits before the period do not count.
        assert_eq!(truncate_to_sentence("Made in USA. Version 2. then"), "Made in USA. Version 2. then");
        assert_eq!(truncate_to_sentence("ends cleanly."), "ends cleanly.");
    }

    #[test]
    fn test_truncate_to_sentence_multibyte() {
        assert_eq!(truncate_to_sentence("café noir. thé vert. et"), "café noir. thé vert.");
    }

    #[test]
    fn test_extract_question() {
        assert_eq!(extract_question("What is X? Related searches...").unwrap(), "What is X?");
        assert_eq!(extract_question("Why? Why not?").unwrap(), "Why?");

        let err = extract_question("What is X").unwrap_err();
        assert!(matches!(err, Error::MalformedQuestion(ref q) if q == "What is X"));
    }

    #[test]
    fn test_is_long_enough() {
        assert!(!is_long_enough(&"a".repeat(150)));
        assert!(is_long_enough(&"a".repeat(151)));
        assert!(!is_long_enough(&"é".repeat(150)));
    }
}
