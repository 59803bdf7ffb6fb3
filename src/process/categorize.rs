// src/process/categorize.rs
//! Keyword taxonomy matching. The taxonomy is static configuration loaded at
//! startup; matching is a uniform case-insensitive substring scan, and a text
//! may land in several categories or in none.

use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
pub struct Categorizer {
    // category label -> lowercased keyword list, label-ordered for
    // deterministic iteration
    taxonomy: BTreeMap<String, Vec<String>>,
}

impl Categorizer {
    pub fn new(taxonomy: &BTreeMap<String, Vec<String>>) -> Self {
        let taxonomy = taxonomy
            .iter()
            .map(|(label, kws)| {
                (
                    label.clone(),
                    kws.iter().map(|k| k.to_lowercase()).collect(),
                )
            })
            .collect();
        Self { taxonomy }
    }

    /// All labels whose keyword list matches the text. Empty set means the
    /// idea goes to the uncategorized bucket.
    pub fn categorize(&self, text: &str) -> BTreeSet<String> {
        let lower = text.to_lowercase();
        self.taxonomy
            .iter()
            .filter(|(_, kws)| kws.iter().any(|k| lower.contains(k.as_str())))
            .map(|(label, _)| label.clone())
            .collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.taxonomy.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScraperConfig;

    fn categorizer() -> Categorizer {
        Categorizer::new(&ScraperConfig::default().taxonomy)
    }

    #[test]
    fn matches_multiple_categories() {
        let cats = categorizer().categorize("An AI web platform for personal finance");
        assert!(cats.contains("ai_ml"));
        assert!(cats.contains("web_app"));
        assert!(cats.contains("fintech"));
    }

    #[test]
    fn no_keyword_means_empty_set() {
        assert!(categorizer().categorize("a thing about gardening").is_empty());
    }

    #[test]
    fn output_is_a_subset_of_the_taxonomy() {
        let c = categorizer();
        let labels: BTreeSet<String> = c.labels().into_iter().collect();
        let cats = c.categorize("mobile game with social payments and learning");
        assert!(cats.iter().all(|l| labels.contains(l)));
        assert!(!cats.is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let cats = categorizer().categorize("MACHINE LEARNING for crops");
        assert!(cats.contains("ai_ml"));
    }
}
