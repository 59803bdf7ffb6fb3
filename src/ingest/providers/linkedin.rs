// src/ingest/providers/linkedin.rs
//! Best-effort LinkedIn content search scrape. LinkedIn has no public search
//! API; this pulls the public search results page with a browser user agent
//! and extracts post text from the markup patterns the page is known to use.
//! Anything it cannot find is simply an empty batch, never an error.

use anyhow::{Context, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

use crate::ingest::looks_like_idea;
use crate::ingest::types::{RawCandidate, Source, SourceProvider};

const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

// Content markers observed on the public search results page, tried in order.
static POST_MARKERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r#"(?is)<div[^>]*class="[^"]*search-result__info[^"]*"[^>]*>(.*?)</div>"#)
            .expect("linkedin marker regex"),
        Regex::new(r#"(?is)<div[^>]*class="[^"]*feed-shared-text[^"]*"[^>]*>(.*?)</div>"#)
            .expect("linkedin marker regex"),
        Regex::new(r#"(?is)<span[^>]*class="[^"]*break-words[^"]*"[^>]*>(.*?)</span>"#)
            .expect("linkedin marker regex"),
    ]
});

static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)</?[^>]+>").expect("tag regex"));

pub struct LinkedinProvider {
    mode: Mode,
    delay: Duration,
}

enum Mode {
    Fixture(String),
    Http { client: reqwest::Client },
}

impl LinkedinProvider {
    pub fn new(delay: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(BROWSER_UA)
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .context("building linkedin http client")?;
        Ok(Self {
            mode: Mode::Http { client },
            delay,
        })
    }

    pub fn from_fixture(body: &str) -> Self {
        Self {
            mode: Mode::Fixture(body.to_string()),
            delay: Duration::ZERO,
        }
    }

    fn extract_posts(html: &str) -> Vec<RawCandidate> {
        let mut out = Vec::new();
        for marker in POST_MARKERS.iter() {
            for caps in marker.captures_iter(html) {
                let inner = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                let text = RE_TAGS.replace_all(inner, " ");
                let text = html_escape::decode_html_entities(text.as_ref())
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ");
                if text.is_empty() || !looks_like_idea(&text) {
                    continue;
                }
                out.push(RawCandidate {
                    text,
                    source: Source::Linkedin,
                    url: None,
                    published_at: None,
                });
            }
        }
        out
    }
}

#[async_trait]
impl SourceProvider for LinkedinProvider {
    async fn fetch_latest(&self, keywords: &[String]) -> Result<Vec<RawCandidate>> {
        match &self.mode {
            Mode::Fixture(body) => Ok(Self::extract_posts(body)),
            Mode::Http { client } => {
                let mut all = Vec::new();
                let mut first = true;
                for kw in keywords {
                    if !first && !self.delay.is_zero() {
                        tokio::time::sleep(self.delay).await;
                    }
                    first = false;
                    let fetched = client
                        .get("https://www.linkedin.com/search/results/content/")
                        .query(&[("keywords", kw.as_str())])
                        .send()
                        .await
                        .with_context(|| format!("linkedin search '{}'", kw));
                    let body = match fetched {
                        Ok(resp) => match resp.text().await.context("linkedin search body") {
                            Ok(body) => body,
                            Err(e) => {
                                tracing::warn!(error = ?e, keyword = %kw, "request failed, continuing");
                                continue;
                            }
                        },
                        Err(e) => {
                            tracing::warn!(error = ?e, keyword = %kw, "request failed, continuing");
                            continue;
                        }
                    };
                    all.append(&mut Self::extract_posts(&body));
                }
                Ok(all)
            }
        }
    }

    fn name(&self) -> &'static str {
        "linkedin"
    }

    fn source(&self) -> Source {
        Source::Linkedin
    }
}
