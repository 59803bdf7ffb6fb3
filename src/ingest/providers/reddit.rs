// src/ingest/providers/reddit.rs
//! Reddit search via the public JSON listing endpoint. No OAuth: read-only
//! search only needs a descriptive user agent.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::ingest::looks_like_idea;
use crate::ingest::types::{RawCandidate, Source, SourceProvider};

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

#[derive(Debug, Deserialize)]
struct Post {
    title: Option<String>,
    selftext: Option<String>,
    permalink: Option<String>,
    created_utc: Option<f64>,
}

pub struct RedditProvider {
    mode: Mode,
    subreddits: Vec<String>,
    limit: usize,
    delay: Duration,
}

enum Mode {
    Fixture(Vec<String>),
    Http {
        client: reqwest::Client,
    },
}

impl RedditProvider {
    pub fn new(
        user_agent: &str,
        subreddits: Vec<String>,
        limit: usize,
        delay: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent.to_string())
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .context("building reddit http client")?;
        Ok(Self {
            mode: Mode::Http { client },
            subreddits,
            limit,
            delay,
        })
    }

    /// Parse from a captured listing body instead of the network. Test-only path.
    pub fn from_fixture(body: &str) -> Self {
        Self::from_fixtures(&[body])
    }

    /// Several captured listing bodies, processed like per-request pages.
    pub fn from_fixtures(bodies: &[&str]) -> Self {
        Self {
            mode: Mode::Fixture(bodies.iter().map(|b| b.to_string()).collect()),
            subreddits: vec![],
            limit: 100,
            delay: Duration::ZERO,
        }
    }

    async fn fetch_page(
        client: &reqwest::Client,
        sub: &str,
        kw: &str,
        limit: &str,
    ) -> Result<String> {
        let url = format!("https://www.reddit.com/r/{}/search.json", sub);
        let body = client
            .get(&url)
            .query(&[("q", kw), ("restrict_sr", "1"), ("limit", limit)])
            .send()
            .await
            .with_context(|| format!("reddit search r/{}", sub))?
            .error_for_status()
            .with_context(|| format!("reddit search r/{} status", sub))?
            .text()
            .await
            .context("reddit search body")?;
        Ok(body)
    }

    fn parse_listing(body: &str) -> Result<Vec<RawCandidate>> {
        let listing: Listing = serde_json::from_str(body).context("parsing reddit listing json")?;
        let mut out = Vec::with_capacity(listing.data.children.len());
        for child in listing.data.children {
            let post = child.data;
            let title = post.title.unwrap_or_default();
            let body = post.selftext.unwrap_or_default();
            let text = if body.is_empty() {
                title
            } else {
                format!("{}. {}", title, body)
            };
            if text.is_empty() || !looks_like_idea(&text) {
                continue;
            }
            out.push(RawCandidate {
                text,
                source: Source::Reddit,
                url: post
                    .permalink
                    .map(|p| format!("https://www.reddit.com{}", p)),
                published_at: post.created_utc.map(|t| t.max(0.0) as u64),
            });
        }
        Ok(out)
    }
}

#[async_trait]
impl SourceProvider for RedditProvider {
    /// One request per (subreddit, keyword) pair with a delay between
    /// requests. A failed request is logged and skipped, keeping whatever
    /// the earlier requests returned; only a fully failed pass is an error.
    async fn fetch_latest(&self, keywords: &[String]) -> Result<Vec<RawCandidate>> {
        let bodies = match &self.mode {
            Mode::Fixture(bodies) => bodies.clone(),
            Mode::Http { client } => {
                let limit = self.limit.to_string();
                let mut bodies = Vec::new();
                let mut attempts = 0usize;
                let mut failures = 0usize;
                for sub in &self.subreddits {
                    for kw in keywords {
                        if attempts > 0 && !self.delay.is_zero() {
                            tokio::time::sleep(self.delay).await;
                        }
                        attempts += 1;
                        match Self::fetch_page(client, sub, kw, &limit).await {
                            Ok(body) => bodies.push(body),
                            Err(e) => {
                                failures += 1;
                                tracing::warn!(error = ?e, subreddit = %sub, keyword = %kw, "request failed, continuing");
                            }
                        }
                    }
                }
                if attempts > 0 && failures == attempts {
                    anyhow::bail!("all {attempts} reddit requests failed");
                }
                bodies
            }
        };

        let mut all = Vec::new();
        for body in &bodies {
            match Self::parse_listing(body) {
                Ok(mut v) => all.append(&mut v),
                Err(e) => {
                    tracing::warn!(error = ?e, "skipping unparseable listing");
                }
            }
        }
        Ok(all)
    }

    fn name(&self) -> &'static str {
        "reddit"
    }

    fn source(&self) -> Source {
        Source::Reddit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "data": { "children": [
            { "data": { "title": "Project idea: habit tracker", "selftext": "with streaks",
                        "permalink": "/r/sideprojects/abc", "created_utc": 1700000000.0 } },
            { "data": { "title": "Daily thread", "selftext": "", "permalink": "/r/x/def",
                        "created_utc": 1700000100.0 } }
        ] }
    }"#;

    #[test]
    fn listing_parse_applies_idea_gate() {
        let out = RedditProvider::parse_listing(FIXTURE).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "Project idea: habit tracker. with streaks");
        assert_eq!(
            out[0].url.as_deref(),
            Some("https://www.reddit.com/r/sideprojects/abc")
        );
        assert_eq!(out[0].published_at, Some(1_700_000_000));
    }

    #[tokio::test]
    async fn bad_page_keeps_results_from_the_good_ones() {
        let provider = RedditProvider::from_fixtures(&["<html>rate limited</html>", FIXTURE]);
        let out = provider.fetch_latest(&[]).await.unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "Project idea: habit tracker. with streaks");
    }
}
