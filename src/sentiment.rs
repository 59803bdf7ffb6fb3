// src/sentiment.rs
//! Lexicon sentiment scorer. Pure and deterministic: a fixed word->weight
//! table (weights in -5..=5), a small negation rule, and a normalization to
//! the [-1.0, 1.0] polarity band.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static LEXICON: Lazy<HashMap<String, i32>> = Lazy::new(|| {
    let raw = include_str!("../sentiment_lexicon.json");
    serde_json::from_str::<HashMap<String, i32>>(raw).expect("valid sentiment lexicon")
});

#[derive(Debug, Clone, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn word_score(&self, w: &str) -> i32 {
        *LEXICON.get(w).unwrap_or(&0)
    }

    /// Raw lexicon sum plus the number of words that scored.
    /// Negation: a negator within the previous 1..=3 tokens flips the sign of
    /// a scored word.
    fn score_text(&self, text: &str) -> (i32, usize) {
        let tokens: Vec<String> = tokenize(text).collect();
        let mut score: i32 = 0;
        let mut scored_words = 0usize;

        for i in 0..tokens.len() {
            let base = self.word_score(tokens[i].as_str());
            if base == 0 {
                continue;
            }
            let negated = (1..=3).any(|k| i >= k && is_negator(tokens[i - k].as_str()));
            score += if negated { -base } else { base };
            scored_words += 1;
        }

        (score, scored_words)
    }

    /// Polarity in [-1.0, 1.0]. Empty or purely neutral text scores 0.0.
    pub fn polarity(&self, text: &str) -> f32 {
        let (score, scored_words) = self.score_text(text);
        if scored_words == 0 {
            return 0.0;
        }
        // Each scored word contributes at most |5|.
        let normalized = score as f32 / (5.0 * scored_words as f32);
        normalized.clamp(-1.0, 1.0)
    }
}

/// Alphanumeric tokens, lower-cased.
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_ascii_lowercase())
}

// Contractions arrive split by the tokenizer ("isn't" -> "isn", "t"), so the
// stems are matched here. "won" and "can" stay out: both are ordinary words.
fn is_negator(tok: &str) -> bool {
    matches!(
        tok,
        "not" | "no" | "never" | "cannot" | "without" | "isn" | "wasn" | "aren" | "don" | "doesn"
            | "didn" | "shouldn" | "wouldn" | "couldn"
    )
}
