// src/process/types.rs
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};

use crate::ingest::types::Source;

/// A canonical, enriched idea. Immutable once constructed: categorization and
/// scoring happen at construction time in the pipeline, never afterwards.
///
/// Field order is the wire contract for JSON and CSV consumers:
/// `text, source, categories, sentiment, word_count, timestamp`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Idea {
    pub text: String,
    pub source: Source,
    pub categories: BTreeSet<String>,
    pub sentiment: f32,
    pub word_count: usize,
    pub timestamp: DateTime<Utc>,
    /// Normalized-content fingerprint used as dedup identity. Internal —
    /// not part of the output contract.
    #[serde(skip)]
    pub content_hash: String,
}

/// Per-run counters reported back to the caller.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct RunStats {
    pub total_ideas: usize,
    pub by_source: BTreeMap<Source, usize>,
    pub by_category: BTreeMap<String, usize>,
    /// Candidates that cleaned down to nothing.
    pub skipped_empty: usize,
    /// Candidates rejected by the quality filter.
    pub rejected_quality: usize,
    /// Candidates dropped as duplicates (current run or persisted store).
    pub rejected_duplicate: usize,
}

/// Everything one pipeline run produced. Owned by the aggregation/rendering
/// side for the duration of the run; nothing persists afterwards unless the
/// caller supplied a hash store.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RunResult {
    pub generated_at: DateTime<Utc>,
    pub ideas: Vec<Idea>,
    pub stats: RunStats,
}

impl RunResult {
    pub fn is_empty(&self) -> bool {
        self.ideas.is_empty()
    }

    /// Distinct sources present, in source order.
    pub fn sources(&self) -> Vec<Source> {
        let set: BTreeSet<Source> = self.ideas.iter().map(|i| i.source).collect();
        set.into_iter().collect()
    }

    /// Distinct categories present, alphabetical.
    pub fn categories(&self) -> Vec<String> {
        let set: BTreeSet<String> = self
            .ideas
            .iter()
            .flat_map(|i| i.categories.iter().cloned())
            .collect();
        set.into_iter().collect()
    }
}
