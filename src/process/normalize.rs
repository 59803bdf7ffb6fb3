// src/process/normalize.rs
//! Candidate text cleanup. Runs before anything else in the pipeline; a
//! candidate that cleans down to an empty string is skipped, not an error.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)https?://[^\s]+").expect("url regex"));
static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)</?[^>]+>").expect("tag regex"));
// Keep word characters, whitespace, and light sentence punctuation.
static RE_SPECIAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s.!?'-]").expect("special-char regex"));
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Clean a raw candidate: HTML-unescape, strip tags and URLs, drop stray
/// symbols and control characters, collapse whitespace, cap the length.
pub fn normalize_text(s: &str, max_len: usize) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();
    out = RE_TAGS.replace_all(&out, " ").to_string();
    out = RE_URL.replace_all(&out, "").to_string();
    // non-whitespace control chars fall to the symbol strip; whitespace
    // control chars are folded by the collapse after it
    out = RE_SPECIAL.replace_all(&out, "").to_string();
    out = RE_WS.replace_all(&out, " ").trim().to_string();

    if out.chars().count() > max_len {
        out = out.chars().take(max_len).collect();
        out = out.trim_end().to_string();
    }
    out
}

pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_urls_tags_and_entities() {
        let raw = "Check &amp; build <b>this</b>: https://example.com/x?y=1 a weather app";
        assert_eq!(normalize_text(raw, 500), "Check build this a weather app");
    }

    #[test]
    fn collapses_whitespace_and_control_chars() {
        assert_eq!(
            normalize_text("  an\tapp\nfor   notes\u{0007} ", 500),
            "an app for notes"
        );
    }

    #[test]
    fn truncates_to_max_len_on_char_boundary() {
        let out = normalize_text("abcdefgh", 4);
        assert_eq!(out, "abcd");
    }

    #[test]
    fn empty_after_cleanup_is_empty() {
        assert_eq!(normalize_text("  https://only.a.link  ", 500), "");
        assert_eq!(normalize_text("@#$%^&*", 500), "");
    }

    #[test]
    fn keeps_basic_punctuation() {
        assert_eq!(
            normalize_text("Idea: real-time alerts!", 500),
            "Idea real-time alerts!"
        );
    }
}
