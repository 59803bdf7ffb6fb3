// tests/pipeline_e2e.rs
use sparkscraper::harvest::{self, HarvestOptions};
use sparkscraper::{IdeaProcessor, OutputFormat, RawCandidate, ScraperConfig, Source};

fn candidates(texts: &[&str], source: Source) -> Vec<RawCandidate> {
    texts
        .iter()
        .map(|t| RawCandidate::new(*t, source))
        .collect()
}

#[test]
fn near_identical_texts_collapse_and_categories_land() {
    let cfg = ScraperConfig::default();
    let processor = IdeaProcessor::new(&cfg);

    let result = processor.process(candidates(
        &[
            "Build a weather app with alerts",
            "build a weather app with alerts!!",
            "AI-powered finance tracker",
        ],
        Source::Reddit,
    ));

    assert_eq!(result.ideas.len(), 2);
    assert_eq!(result.stats.rejected_duplicate, 1);
    assert_eq!(result.ideas[0].text, "Build a weather app with alerts");
    assert!(result.ideas[1].categories.contains("ai_ml"));
}

#[test]
fn spam_is_rejected_regardless_of_source() {
    let cfg = ScraperConfig::default();
    let processor = IdeaProcessor::new(&cfg);

    for source in [Source::Reddit, Source::Twitter, Source::Linkedin] {
        let result = processor.process(candidates(&["buy now click here free money"], source));
        assert!(result.is_empty(), "accepted spam from {source}");
        assert_eq!(result.stats.rejected_quality, 1);
    }
}

#[test]
fn empty_batch_is_a_valid_empty_result() {
    let cfg = ScraperConfig::default();
    let result = IdeaProcessor::new(&cfg).process(vec![]);

    assert_eq!(result.stats.total_ideas, 0);
    assert!(result.ideas.is_empty());
    assert!(result.stats.by_source.is_empty());
    assert!(result.stats.by_category.is_empty());
    assert!(result.sources().is_empty());
    assert!(result.categories().is_empty());
}

#[test]
fn unusable_candidates_only_bump_counters() {
    let cfg = ScraperConfig::default();
    let result = IdeaProcessor::new(&cfg).process(candidates(
        &[
            "   ",
            "https://only-a-link.example",
            "A productivity workflow automation platform for small teams",
        ],
        Source::Twitter,
    ));

    assert_eq!(result.stats.skipped_empty, 2);
    assert_eq!(result.ideas.len(), 1);
    assert!(result.ideas[0].categories.contains("productivity"));
}

#[test]
fn ideas_carry_derived_fields() {
    let cfg = ScraperConfig::default();
    let result = IdeaProcessor::new(&cfg).process(candidates(
        &["An amazing social community app for gardeners"],
        Source::Linkedin,
    ));

    let idea = &result.ideas[0];
    assert_eq!(idea.source, Source::Linkedin);
    assert_eq!(idea.word_count, 7);
    assert!(idea.sentiment > 0.0);
    assert!((-1.0..=1.0).contains(&idea.sentiment));
    assert!(!idea.content_hash.is_empty());
    assert!(idea.categories.contains("social"));
    assert_eq!(result.stats.by_source[&Source::Linkedin], 1);
}

#[test]
fn dry_run_writes_outputs_without_fetching() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = ScraperConfig::default();
    let opts = HarvestOptions {
        formats: vec![OutputFormat::Markdown, OutputFormat::Json],
        out_dir: dir.path().to_path_buf(),
        dedup_store: None,
    };

    let outcome = harvest::dry_run(&cfg, &opts).unwrap();

    assert!(outcome.result.is_empty());
    assert!(outcome.failed_sources.is_empty());
    assert_eq!(outcome.written.len(), 2);
    for path in &outcome.written {
        assert!(path.exists(), "missing {}", path.display());
    }
}

#[test]
fn uncategorized_ideas_survive_with_an_empty_set() {
    let cfg = ScraperConfig::default();
    let result = IdeaProcessor::new(&cfg).process(candidates(
        &["a quiet little thing for counting birds"],
        Source::Reddit,
    ));

    assert_eq!(result.ideas.len(), 1);
    assert!(result.ideas[0].categories.is_empty());
    assert!(result.stats.by_category.is_empty());
}
