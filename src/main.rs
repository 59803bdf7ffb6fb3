//! SparkScraper — Binary Entrypoint
//! CLI for harvesting project ideas from Reddit, Twitter/X, and LinkedIn,
//! plus an optional web interface exposing the same operations.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sparkscraper::config::ScraperConfig;
use sparkscraper::harvest::{self, HarvestOptions};
use sparkscraper::ingest::sample_candidates;
use sparkscraper::ingest::FetchReport;
use sparkscraper::output::OutputFormat;

#[derive(Parser)]
#[command(name = "sparkscraper", version)]
#[command(about = "Harvest project ideas from Reddit, Twitter, and LinkedIn")]
struct Cli {
    /// Enable verbose logging (overridden by RUST_LOG when set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape project ideas from the configured sources
    Scrape {
        /// Comma-separated keywords to search for
        #[arg(short, long)]
        keywords: Option<String>,

        /// Comma-separated subreddits to search
        #[arg(short, long)]
        subreddits: Option<String>,

        /// Output formats (repeatable)
        #[arg(short, long, value_enum, default_values_t = vec![OutputFormat::Markdown])]
        output: Vec<OutputFormat>,

        /// Maximum number of posts per source
        #[arg(short, long)]
        limit: Option<usize>,

        /// Directory for the output files
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Remember content hashes across runs in this file
        #[arg(long)]
        dedup_store: Option<PathBuf>,

        /// Skip fetching and run the pipeline on an empty batch
        #[arg(long)]
        dry_run: bool,
    },

    /// Run the web interface
    Serve {
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },

    /// Show the resolved configuration
    Config,

    /// Render a sample output file from canned data
    Sample {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,

        /// Directory for the sample file
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "sparkscraper=debug,info"
    } else {
        "sparkscraper=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local runs; no-op when absent.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = ScraperConfig::load().context("loading configuration")?;

    match cli.command {
        Command::Scrape {
            keywords,
            subreddits,
            output,
            limit,
            out_dir,
            dedup_store,
            dry_run,
        } => {
            let mut config = config;
            if let Some(raw) = keywords {
                config.keywords = split_csv(&raw);
            }
            if let Some(raw) = subreddits {
                config.subreddits = split_csv(&raw);
            }
            if let Some(n) = limit {
                config.max_posts_per_source = n;
            }

            let opts = HarvestOptions {
                formats: output,
                out_dir,
                dedup_store,
            };
            let outcome = if dry_run {
                harvest::dry_run(&config, &opts)?
            } else {
                harvest::run(&config, &opts).await?
            };
            print_summary(&outcome);
        }

        Command::Serve { port } => {
            let router = sparkscraper::api::create_router(config);
            let addr = format!("0.0.0.0:{port}");
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("binding {addr}"))?;
            tracing::info!(%addr, "web interface listening");
            axum::serve(listener, router).await.context("serving")?;
        }

        Command::Config => {
            println!("Keywords:   {}", config.keywords.join(", "));
            println!("Subreddits: {}", config.subreddits.join(", "));
            println!(
                "Categories: {}",
                config
                    .taxonomy
                    .keys()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            println!("Word count: {}..{}", config.min_word_count, config.max_word_count);
            println!("Posts/source: {}", config.max_posts_per_source);
            println!("Rate limit: {} ms", config.rate_limit_ms);
            println!(
                "Twitter:    {}",
                if config.twitter_configured() {
                    "configured"
                } else {
                    "not configured"
                }
            );
        }

        Command::Sample { format, out_dir } => {
            let opts = HarvestOptions {
                formats: vec![format],
                out_dir,
                dedup_store: None,
            };
            let report = FetchReport {
                candidates: sample_candidates(),
                failed_sources: vec![],
            };
            let outcome = harvest::process_and_save(&config, &opts, report)?;
            print_summary(&outcome);
        }
    }

    Ok(())
}

fn print_summary(outcome: &harvest::HarvestOutcome) {
    let stats = &outcome.result.stats;
    println!("\nScrape complete.");
    println!("Total ideas: {}", stats.total_ideas);
    for (source, n) in &stats.by_source {
        println!("  {:<9} {}", format!("{}:", source.title()), n);
    }
    if stats.rejected_quality + stats.rejected_duplicate + stats.skipped_empty > 0 {
        println!(
            "Dropped: {} low-quality, {} duplicates, {} empty",
            stats.rejected_quality, stats.rejected_duplicate, stats.skipped_empty
        );
    }
    if !outcome.failed_sources.is_empty() {
        println!("Failed sources: {}", outcome.failed_sources.join(", "));
    }
    for path in &outcome.written {
        println!("Saved: {}", path.display());
    }
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
