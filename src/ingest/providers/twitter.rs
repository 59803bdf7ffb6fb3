// src/ingest/providers/twitter.rs
//! Twitter/X recent-search (API v2). Needs a bearer token; without one the
//! caller skips this source entirely.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::ingest::looks_like_idea;
use crate::ingest::types::{RawCandidate, Source, SourceProvider};

const SEARCH_URL: &str = "https://api.twitter.com/2/tweets/search/recent";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Tweet>,
}

#[derive(Debug, Deserialize)]
struct Tweet {
    id: String,
    text: String,
    created_at: Option<String>,
}

pub struct TwitterProvider {
    mode: Mode,
    limit: usize,
    delay: Duration,
}

enum Mode {
    Fixture(Vec<String>),
    Http {
        client: reqwest::Client,
        bearer_token: String,
    },
}

impl TwitterProvider {
    pub fn new(bearer_token: String, limit: usize, delay: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .context("building twitter http client")?;
        Ok(Self {
            mode: Mode::Http {
                client,
                bearer_token,
            },
            // v2 recent search accepts 10..=100 per request
            limit: limit.clamp(10, 100),
            delay,
        })
    }

    pub fn from_fixture(body: &str) -> Self {
        Self::from_fixtures(&[body])
    }

    pub fn from_fixtures(bodies: &[&str]) -> Self {
        Self {
            mode: Mode::Fixture(bodies.iter().map(|b| b.to_string()).collect()),
            limit: 100,
            delay: Duration::ZERO,
        }
    }

    async fn fetch_page(
        client: &reqwest::Client,
        bearer_token: &str,
        kw: &str,
        max_results: &str,
    ) -> Result<String> {
        let body = client
            .get(SEARCH_URL)
            .bearer_auth(bearer_token)
            .query(&[
                ("query", kw),
                ("max_results", max_results),
                ("tweet.fields", "created_at"),
            ])
            .send()
            .await
            .with_context(|| format!("twitter search '{}'", kw))?
            .error_for_status()
            .with_context(|| format!("twitter search '{}' status", kw))?
            .text()
            .await
            .context("twitter search body")?;
        Ok(body)
    }

    fn parse_response(body: &str) -> Result<Vec<RawCandidate>> {
        let resp: SearchResponse =
            serde_json::from_str(body).context("parsing twitter search json")?;
        let mut out = Vec::with_capacity(resp.data.len());
        for tw in resp.data {
            if !looks_like_idea(&tw.text) {
                continue;
            }
            let published_at = tw
                .created_at
                .as_deref()
                .and_then(|ts| chrono::DateTime::parse_from_rfc3339(ts).ok())
                .and_then(|dt| u64::try_from(dt.timestamp()).ok());
            out.push(RawCandidate {
                text: tw.text,
                source: Source::Twitter,
                url: Some(format!("https://twitter.com/i/status/{}", tw.id)),
                published_at,
            });
        }
        Ok(out)
    }
}

#[async_trait]
impl SourceProvider for TwitterProvider {
    /// One request per keyword with a delay between requests. A failed
    /// request is logged and skipped; only a fully failed pass is an error.
    async fn fetch_latest(&self, keywords: &[String]) -> Result<Vec<RawCandidate>> {
        let bodies = match &self.mode {
            Mode::Fixture(bodies) => bodies.clone(),
            Mode::Http {
                client,
                bearer_token,
            } => {
                let max_results = self.limit.to_string();
                let mut bodies = Vec::new();
                let mut attempts = 0usize;
                let mut failures = 0usize;
                for kw in keywords {
                    if attempts > 0 && !self.delay.is_zero() {
                        tokio::time::sleep(self.delay).await;
                    }
                    attempts += 1;
                    match Self::fetch_page(client, bearer_token, kw, &max_results).await {
                        Ok(body) => bodies.push(body),
                        Err(e) => {
                            failures += 1;
                            tracing::warn!(error = ?e, keyword = %kw, "request failed, continuing");
                        }
                    }
                }
                if attempts > 0 && failures == attempts {
                    anyhow::bail!("all {attempts} twitter requests failed");
                }
                bodies
            }
        };

        let mut all = Vec::new();
        for body in &bodies {
            match Self::parse_response(body) {
                Ok(mut v) => all.append(&mut v),
                Err(e) => {
                    tracing::warn!(error = ?e, "skipping unparseable search response");
                }
            }
        }
        Ok(all)
    }

    fn name(&self) -> &'static str {
        "twitter"
    }

    fn source(&self) -> Source {
        Source::Twitter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{ "data": [
        { "id": "1", "text": "Side project idea: a pomodoro bot",
          "created_at": "2023-11-14T22:13:20Z" },
        { "id": "2", "text": "lunch was great" }
    ] }"#;

    #[test]
    fn response_parse_applies_idea_gate_and_timestamps() {
        let out = TwitterProvider::parse_response(FIXTURE).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].published_at, Some(1_700_000_000));
        assert_eq!(
            out[0].url.as_deref(),
            Some("https://twitter.com/i/status/1")
        );
    }

    #[test]
    fn missing_data_field_is_an_empty_batch() {
        let out = TwitterProvider::parse_response("{}").unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn bad_page_keeps_results_from_the_good_ones() {
        let provider = TwitterProvider::from_fixtures(&["{ not json", FIXTURE]);
        let out = provider.fetch_latest(&[]).await.unwrap();
        assert_eq!(out.len(), 1);
    }
}
