// src/process/mod.rs
//! The idea-processing pipeline: normalize -> filter -> categorize + score ->
//! dedup -> aggregate. Strictly one-way and in-memory; candidates are consumed
//! in fetch order so runs over the same batch are reproducible.

pub mod categorize;
pub mod dedup;
pub mod filter;
pub mod normalize;
pub mod types;

use chrono::Utc;

use crate::config::ScraperConfig;
use crate::ingest::types::RawCandidate;
use crate::process::categorize::Categorizer;
use crate::process::dedup::{content_hash, Deduplicator, HashStore};
use crate::process::filter::QualityFilter;
use crate::process::types::{Idea, RunResult, RunStats};
use crate::sentiment::SentimentAnalyzer;

/// One-run pipeline over raw candidates. Construction takes the full
/// configuration; nothing here reads global state.
pub struct IdeaProcessor<'c> {
    config: &'c ScraperConfig,
    categorizer: Categorizer,
    analyzer: SentimentAnalyzer,
}

impl<'c> IdeaProcessor<'c> {
    pub fn new(config: &'c ScraperConfig) -> Self {
        Self {
            config,
            categorizer: Categorizer::new(&config.taxonomy),
            analyzer: SentimentAnalyzer::new(),
        }
    }

    /// Run the whole pipeline. Per-candidate failures only bump counters; an
    /// empty result is a valid outcome, not an error.
    pub fn process(&self, candidates: Vec<RawCandidate>) -> RunResult {
        self.process_with(candidates, None)
    }

    /// Like [`process`](Self::process), with an optional cross-run hash store
    /// so duplicates of earlier runs are suppressed too.
    pub fn process_with(
        &self,
        candidates: Vec<RawCandidate>,
        store: Option<&mut dyn HashStore>,
    ) -> RunResult {
        let mut stats = RunStats::default();
        let mut filter = QualityFilter::new(
            self.config.min_word_count,
            self.config.max_word_count,
            &self.config.denylist,
        );
        let mut dedup = match store {
            Some(s) => Deduplicator::with_store(s),
            None => Deduplicator::new(),
        };

        let mut ideas = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let text = normalize::normalize_text(&candidate.text, self.config.max_text_len);
            if text.is_empty() {
                stats.skipped_empty += 1;
                continue;
            }

            if !filter.accept(candidate.source, &text) {
                stats.rejected_quality += 1;
                continue;
            }

            let hash = content_hash(&text);
            if !dedup.is_first(&hash) {
                stats.rejected_duplicate += 1;
                continue;
            }

            let word_count = normalize::word_count(&text);
            let categories = self.categorizer.categorize(&text);
            let sentiment = self.analyzer.polarity(&text);

            for c in &categories {
                *stats.by_category.entry(c.clone()).or_default() += 1;
            }
            *stats.by_source.entry(candidate.source).or_default() += 1;

            ideas.push(Idea {
                text,
                source: candidate.source,
                categories,
                sentiment,
                word_count,
                timestamp: Utc::now(),
                content_hash: hash,
            });
        }

        stats.total_ideas = ideas.len();
        tracing::info!(
            total = stats.total_ideas,
            skipped_empty = stats.skipped_empty,
            rejected_quality = stats.rejected_quality,
            rejected_duplicate = stats.rejected_duplicate,
            "pipeline run finished"
        );

        RunResult {
            generated_at: Utc::now(),
            ideas,
            stats,
        }
    }
}
