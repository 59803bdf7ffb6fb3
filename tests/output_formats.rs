// tests/output_formats.rs
use sparkscraper::output::{self, OutputFormat};
use sparkscraper::{IdeaProcessor, RawCandidate, ScraperConfig, Source};

fn sample_run() -> sparkscraper::RunResult {
    let cfg = ScraperConfig::default();
    IdeaProcessor::new(&cfg).process(vec![
        RawCandidate::new("Build a weather app with alerts", Source::Reddit),
        RawCandidate::new("An AI platform for personal finance", Source::Reddit),
        RawCandidate::new("a quiet little thing for counting birds", Source::Twitter),
    ])
}

#[test]
fn markdown_groups_by_source_then_category() {
    let md = output::render(&sample_run(), OutputFormat::Markdown).unwrap();

    assert!(md.starts_with("# SparkScraper Project Ideas\n"));
    assert!(md.contains("Total ideas found: 3\n"));
    assert!(md.contains("## From Reddit\n"));
    assert!(md.contains("## From Twitter\n"));
    assert!(md.contains("### Web App\n"));
    // the uncategorized idea lands in the General bucket
    assert!(md.contains("### General\n"));
    // a multi-category idea is repeated once per category section
    let ai_platform = md
        .matches("An AI platform for personal finance")
        .count();
    assert!(ai_platform >= 2, "expected repeats across category sections");
}

#[test]
fn json_carries_metadata_and_every_idea_once() {
    let out = output::render(&sample_run(), OutputFormat::Json).unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(v["metadata"]["total_ideas"], 3);
    let sources: Vec<&str> = v["metadata"]["sources"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap())
        .collect();
    assert_eq!(sources, vec!["reddit", "twitter"]);
    assert!(v["metadata"]["categories"]
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c == "ai_ml"));

    let ideas = v["ideas"].as_array().unwrap();
    assert_eq!(ideas.len(), 3);
    for idea in ideas {
        for field in ["text", "source", "categories", "sentiment", "word_count", "timestamp"] {
            assert!(idea.get(field).is_some(), "missing field {field}");
        }
        let s = idea["sentiment"].as_f64().unwrap();
        assert!((-1.0..=1.0).contains(&s));
    }
}

#[test]
fn csv_has_one_row_per_idea() {
    let out = output::render(&sample_run(), OutputFormat::Csv).unwrap();
    let lines: Vec<&str> = out.trim_end().split("\r\n").collect();

    assert_eq!(
        lines[0],
        "text,source,categories,sentiment,word_count,timestamp"
    );
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("Build a weather app with alerts,reddit,"));
}

#[test]
fn empty_run_renders_cleanly_in_every_format() {
    let cfg = ScraperConfig::default();
    let empty = IdeaProcessor::new(&cfg).process(vec![]);

    let md = output::render(&empty, OutputFormat::Markdown).unwrap();
    assert!(md.contains("Total ideas found: 0\n"));
    assert!(!md.contains("## From"));

    let json = output::render(&empty, OutputFormat::Json).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["metadata"]["total_ideas"], 0);
    assert_eq!(v["ideas"].as_array().unwrap().len(), 0);

    assert_eq!(output::render(&empty, OutputFormat::Csv).unwrap(), "");
}

#[test]
fn save_writes_one_file_per_format() {
    let dir = tempfile::tempdir().unwrap();
    let run = sample_run();
    let written = output::save(
        &run,
        &[OutputFormat::Markdown, OutputFormat::Json, OutputFormat::Csv],
        dir.path(),
    )
    .unwrap();

    assert_eq!(written.len(), 3);
    for path in &written {
        assert!(path.exists(), "missing {}", path.display());
    }
    assert!(dir.path().join("sparkscraper_ideas.json").exists());
}
