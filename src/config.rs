// src/config.rs
//! Run configuration: built-in defaults, an optional TOML file, then
//! environment overrides. The resolved value is passed into the pipeline and
//! fetchers explicitly; nothing reads configuration globally after startup.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/sparkscraper.toml";
pub const ENV_CONFIG_PATH: &str = "SPARKSCRAPER_CONFIG_PATH";
pub const ENV_KEYWORDS: &str = "SPARKSCRAPER_KEYWORDS";
pub const ENV_SUBREDDITS: &str = "SPARKSCRAPER_SUBREDDITS";
pub const ENV_REDDIT_USER_AGENT: &str = "REDDIT_USER_AGENT";
pub const ENV_TWITTER_BEARER_TOKEN: &str = "TWITTER_BEARER_TOKEN";

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub keywords: Vec<String>,
    pub subreddits: Vec<String>,
    pub min_word_count: usize,
    pub max_word_count: usize,
    pub max_text_len: usize,
    pub denylist: Vec<String>,
    pub taxonomy: BTreeMap<String, Vec<String>>,
    pub max_posts_per_source: usize,
    pub rate_limit_ms: u64,
    pub reddit_user_agent: String,
    pub twitter_bearer_token: Option<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            keywords: to_strings(&[
                "project ideas",
                "startup ideas",
                "side project",
                "app ideas",
                "business ideas",
                "coding project",
                "developer project",
            ]),
            subreddits: to_strings(&[
                "sideprojects",
                "startups",
                "entrepreneur",
                "webdev",
                "programming",
                "indiehackers",
                "SaaS",
            ]),
            min_word_count: 3,
            max_word_count: 200,
            max_text_len: 500,
            denylist: to_strings(&[
                "spam",
                "advertisement",
                "promotion",
                "buy now",
                "click here",
                "limited time",
                "offer",
                "discount",
                "sale",
            ]),
            taxonomy: default_taxonomy(),
            max_posts_per_source: 100,
            rate_limit_ms: 1000,
            reddit_user_agent: "sparkscraper/0.1 (idea harvester)".to_string(),
            twitter_bearer_token: None,
        }
    }
}

/// Shape of the optional TOML file; every field overrides its default.
#[derive(Debug, Default, serde::Deserialize)]
struct FileConfig {
    keywords: Option<Vec<String>>,
    subreddits: Option<Vec<String>>,
    min_word_count: Option<usize>,
    max_word_count: Option<usize>,
    max_text_len: Option<usize>,
    denylist: Option<Vec<String>>,
    taxonomy: Option<BTreeMap<String, Vec<String>>>,
    max_posts_per_source: Option<usize>,
    rate_limit_ms: Option<u64>,
}

impl ScraperConfig {
    /// Defaults <- TOML file (env-selected path or `config/sparkscraper.toml`
    /// when present) <- env vars.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::default();

        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            cfg.apply_file(Path::new(&p))?;
        } else {
            let fallback = PathBuf::from(DEFAULT_CONFIG_PATH);
            if fallback.exists() {
                cfg.apply_file(&fallback)?;
            }
        }

        cfg.apply_env();
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let mut cfg = Self::default();
        cfg.apply_file(path)?;
        cfg.apply_env();
        Ok(cfg)
    }

    fn apply_file(&mut self, path: &Path) -> Result<()> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let file: FileConfig = toml::from_str(&raw)
            .with_context(|| format!("parsing config from {}", path.display()))?;

        if let Some(v) = file.keywords {
            self.keywords = clean_list(v);
        }
        if let Some(v) = file.subreddits {
            self.subreddits = clean_list(v);
        }
        if let Some(v) = file.min_word_count {
            self.min_word_count = v;
        }
        if let Some(v) = file.max_word_count {
            self.max_word_count = v;
        }
        if let Some(v) = file.max_text_len {
            self.max_text_len = v;
        }
        if let Some(v) = file.denylist {
            self.denylist = clean_list(v);
        }
        if let Some(v) = file.taxonomy {
            self.taxonomy = v;
        }
        if let Some(v) = file.max_posts_per_source {
            self.max_posts_per_source = v;
        }
        if let Some(v) = file.rate_limit_ms {
            self.rate_limit_ms = v;
        }
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(raw) = std::env::var(ENV_KEYWORDS) {
            let list = split_csv(&raw);
            if !list.is_empty() {
                self.keywords = list;
            }
        }
        if let Ok(raw) = std::env::var(ENV_SUBREDDITS) {
            let list = split_csv(&raw);
            if !list.is_empty() {
                self.subreddits = list;
            }
        }
        if let Ok(ua) = std::env::var(ENV_REDDIT_USER_AGENT) {
            if !ua.trim().is_empty() {
                self.reddit_user_agent = ua.trim().to_string();
            }
        }
        if let Ok(tok) = std::env::var(ENV_TWITTER_BEARER_TOKEN) {
            if !tok.trim().is_empty() {
                self.twitter_bearer_token = Some(tok.trim().to_string());
            }
        }
    }

    pub fn twitter_configured(&self) -> bool {
        self.twitter_bearer_token.is_some()
    }
}

fn default_taxonomy() -> BTreeMap<String, Vec<String>> {
    let mut t = BTreeMap::new();
    let mut add = |label: &str, kws: &[&str]| {
        t.insert(label.to_string(), to_strings(kws));
    };
    add("web_app", &["web", "app", "website", "platform", "dashboard"]);
    add("mobile_app", &["mobile", "ios", "android", "app store"]);
    add(
        "ai_ml",
        &["ai", "machine learning", "artificial intelligence", "neural network"],
    );
    add(
        "fintech",
        &["finance", "payment", "banking", "investment", "crypto"],
    );
    add("healthcare", &["health", "medical", "fitness", "wellness"]);
    add("education", &["learning", "education", "course", "tutorial"]);
    add(
        "productivity",
        &["productivity", "automation", "workflow", "efficiency"],
    );
    add("social", &["social", "community", "network", "connection"]);
    add("ecommerce", &["shop", "store", "marketplace", "retail"]);
    add("gaming", &["game", "gaming", "entertainment", "play"]);
    t
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
