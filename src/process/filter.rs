// src/process/filter.rs
//! Quality gate for cleaned candidates: word-count bounds, a promotional/spam
//! denylist, and a cheap same-source repeat guard. Global duplicate detection
//! lives in `dedup`, not here.

use std::collections::HashMap;

use crate::ingest::types::Source;
use crate::process::normalize::word_count;

#[derive(Debug, Clone)]
pub struct QualityFilter {
    min_words: usize,
    max_words: usize,
    denylist: Vec<String>,
    /// Last accepted text per source, for the consecutive-repeat guard.
    last_accepted: HashMap<Source, String>,
}

impl QualityFilter {
    pub fn new(min_words: usize, max_words: usize, denylist: &[String]) -> Self {
        Self {
            min_words,
            max_words,
            denylist: denylist.iter().map(|w| w.to_lowercase()).collect(),
            last_accepted: HashMap::new(),
        }
    }

    /// Accept or reject a cleaned text. Accepting records it as the most
    /// recent accepted item for its source.
    pub fn accept(&mut self, source: Source, text: &str) -> bool {
        let words = word_count(text);
        if words < self.min_words || words > self.max_words {
            return false;
        }

        let lower = text.to_lowercase();
        if self.denylist.iter().any(|w| lower.contains(w)) {
            return false;
        }

        if self
            .last_accepted
            .get(&source)
            .is_some_and(|prev| prev == text)
        {
            return false;
        }

        self.last_accepted.insert(source, text.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> QualityFilter {
        QualityFilter::new(
            4,
            200,
            &[
                "spam".to_string(),
                "buy now".to_string(),
                "click here".to_string(),
            ],
        )
    }

    #[test]
    fn rejects_below_min_word_count() {
        let mut f = filter();
        assert!(!f.accept(Source::Reddit, "too short"));
        assert!(f.accept(Source::Reddit, "an app for tracking plants"));
    }

    #[test]
    fn denylist_match_is_case_insensitive() {
        let mut f = filter();
        assert!(!f.accept(Source::Twitter, "BUY NOW click here free money today"));
        assert!(!f.accept(Source::Twitter, "great Spam filtering tool for email"));
    }

    #[test]
    fn consecutive_repeat_from_same_source_is_rejected() {
        let mut f = filter();
        let t = "an app for tracking plants";
        assert!(f.accept(Source::Reddit, t));
        assert!(!f.accept(Source::Reddit, t));
        // same text from another source is fine here; the deduplicator owns
        // cross-source identity
        assert!(f.accept(Source::Twitter, t));
    }

    #[test]
    fn repeat_guard_only_looks_at_the_immediately_preceding_item() {
        let mut f = filter();
        let a = "an app for tracking plants";
        let b = "a tool to plan weekend trips";
        assert!(f.accept(Source::Reddit, a));
        assert!(f.accept(Source::Reddit, b));
        assert!(f.accept(Source::Reddit, a));
    }
}
