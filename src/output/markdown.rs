// src/output/markdown.rs
//! Markdown rendering: `## From {Source}` sections in source order, `###`
//! category subsections (alphabetical, multi-category ideas repeated per
//! category, uncategorized under "General"), numbered items with a sentiment
//! marker.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::process::types::{Idea, RunResult};

const UNCATEGORIZED: &str = "general";

pub fn render(result: &RunResult) -> String {
    let mut md = String::new();
    md.push_str("# SparkScraper Project Ideas\n\n");
    let _ = writeln!(
        md,
        "Generated on: {}\n",
        result.generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(md, "Total ideas found: {}\n", result.ideas.len());

    for source in result.sources() {
        let _ = writeln!(md, "## From {}\n", source.title());

        let mut by_category: BTreeMap<String, Vec<&Idea>> = BTreeMap::new();
        for idea in result.ideas.iter().filter(|i| i.source == source) {
            if idea.categories.is_empty() {
                by_category
                    .entry(UNCATEGORIZED.to_string())
                    .or_default()
                    .push(idea);
            } else {
                for cat in &idea.categories {
                    by_category.entry(cat.clone()).or_default().push(idea);
                }
            }
        }

        for (category, ideas) in by_category {
            let _ = writeln!(md, "### {}\n", heading(&category));
            for (i, idea) in ideas.iter().enumerate() {
                let _ = writeln!(md, "{}. {} {}", i + 1, idea.text, mood(idea.sentiment));
            }
            md.push('\n');
        }
    }

    md
}

/// "web_app" -> "Web App".
fn heading(label: &str) -> String {
    label
        .split('_')
        .filter(|p| !p.is_empty())
        .map(|p| {
            let mut chars = p.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn mood(sentiment: f32) -> &'static str {
    if sentiment > 0.0 {
        "😊"
    } else if sentiment < 0.0 {
        "😔"
    } else {
        "😐"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_become_title_case_headings() {
        assert_eq!(heading("web_app"), "Web App");
        assert_eq!(heading("ai_ml"), "Ai Ml");
        assert_eq!(heading("general"), "General");
    }

    #[test]
    fn mood_marker_follows_the_sign() {
        assert_eq!(mood(0.4), "😊");
        assert_eq!(mood(0.0), "😐");
        assert_eq!(mood(-0.1), "😔");
    }
}
