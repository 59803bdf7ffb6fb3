// src/harvest.rs
//! One full harvest: build providers from config, fetch sequentially, run the
//! processing pipeline, write the requested output files. Shared by the CLI
//! and the web interface.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::ScraperConfig;
use crate::ingest::providers::{LinkedinProvider, RedditProvider, TwitterProvider};
use crate::ingest::types::SourceProvider;
use crate::ingest::{self, FetchReport};
use crate::output::{self, OutputFormat};
use crate::process::dedup::{FileHashStore, HashStore};
use crate::process::types::RunResult;
use crate::process::IdeaProcessor;

#[derive(Debug, Clone)]
pub struct HarvestOptions {
    pub formats: Vec<OutputFormat>,
    pub out_dir: PathBuf,
    /// Cross-run dedup store; `None` keeps the run fully in-memory.
    pub dedup_store: Option<PathBuf>,
}

impl Default for HarvestOptions {
    fn default() -> Self {
        Self {
            formats: vec![OutputFormat::Markdown],
            out_dir: PathBuf::from("."),
            dedup_store: None,
        }
    }
}

#[derive(Debug)]
pub struct HarvestOutcome {
    pub result: RunResult,
    pub failed_sources: Vec<String>,
    pub written: Vec<PathBuf>,
}

/// Providers for the configured platforms. Twitter is skipped (with a log
/// line) when no bearer token is configured.
pub fn build_providers(config: &ScraperConfig) -> Result<Vec<Box<dyn SourceProvider>>> {
    let mut providers: Vec<Box<dyn SourceProvider>> = Vec::with_capacity(3);
    let delay = Duration::from_millis(config.rate_limit_ms);

    providers.push(Box::new(RedditProvider::new(
        &config.reddit_user_agent,
        config.subreddits.clone(),
        config.max_posts_per_source,
        delay,
    )?));

    match &config.twitter_bearer_token {
        Some(token) => providers.push(Box::new(TwitterProvider::new(
            token.clone(),
            config.max_posts_per_source,
            delay,
        )?)),
        None => tracing::warn!("twitter bearer token not configured, skipping source"),
    }

    providers.push(Box::new(LinkedinProvider::new(delay)?));
    Ok(providers)
}

/// Fetch + process + write. Source-level failures are reported in the
/// outcome, never fatal; partial results still produce output files.
pub async fn run(config: &ScraperConfig, opts: &HarvestOptions) -> Result<HarvestOutcome> {
    let providers = build_providers(config)?;
    let report = ingest::fetch_all(
        &providers,
        &config.keywords,
        Duration::from_millis(config.rate_limit_ms),
    )
    .await;

    let outcome = process_and_save(config, opts, report)?;
    Ok(outcome)
}

/// A harvest with the fetch skipped entirely: an empty batch through the real
/// pipeline and output writers.
pub fn dry_run(config: &ScraperConfig, opts: &HarvestOptions) -> Result<HarvestOutcome> {
    process_and_save(config, opts, FetchReport::default())
}

/// The network-free tail of a harvest, also used for canned sample batches.
pub fn process_and_save(
    config: &ScraperConfig,
    opts: &HarvestOptions,
    report: FetchReport,
) -> Result<HarvestOutcome> {
    let processor = IdeaProcessor::new(config);

    let result = match &opts.dedup_store {
        Some(path) => {
            let mut store = FileHashStore::open(path)
                .with_context(|| format!("opening dedup store {}", path.display()))?;
            let result = processor.process_with(report.candidates, Some(&mut store));
            store.persist()?;
            result
        }
        None => processor.process(report.candidates),
    };

    let written = output::save(&result, &opts.formats, &opts.out_dir)?;

    Ok(HarvestOutcome {
        result,
        failed_sources: report.failed_sources,
        written,
    })
}

/// Render a sample run to a single format without touching the output dir.
pub fn render_sample(config: &ScraperConfig, format: OutputFormat) -> Result<String> {
    let processor = IdeaProcessor::new(config);
    let result = processor.process(crate::ingest::sample_candidates());
    output::render(&result, format)
}
