// src/ingest/mod.rs
pub mod providers;
pub mod types;

use crate::ingest::types::{RawCandidate, SourceProvider};
use std::time::Duration;

/// Pre-gate applied at collection time: a post has to talk about a project
/// or an idea before it is worth carrying into the pipeline at all.
pub fn looks_like_idea(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("project") || lower.contains("idea")
}

/// Outcome of one full fetch pass across all configured providers.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub candidates: Vec<RawCandidate>,
    pub failed_sources: Vec<String>,
}

/// Fetch from each provider in turn, sleeping between sources to stay under
/// rate limits. A provider failure is logged and counted; the remaining
/// sources are still fetched and partial results are returned.
pub async fn fetch_all(
    providers: &[Box<dyn SourceProvider>],
    keywords: &[String],
    rate_limit: Duration,
) -> FetchReport {
    let mut report = FetchReport::default();

    for (i, p) in providers.iter().enumerate() {
        if i > 0 && !rate_limit.is_zero() {
            tokio::time::sleep(rate_limit).await;
        }
        match p.fetch_latest(keywords).await {
            Ok(mut v) => {
                tracing::info!(provider = p.name(), count = v.len(), "fetched candidates");
                report.candidates.append(&mut v);
            }
            Err(e) => {
                tracing::warn!(error = ?e, provider = p.name(), "provider error");
                report.failed_sources.push(p.name().to_string());
            }
        }
    }

    report
}

/// Canned candidate batch for the `sample` command and the web sample route.
/// Mirrors the kind of material the live fetchers return.
pub fn sample_candidates() -> Vec<RawCandidate> {
    use crate::ingest::types::Source;

    let reddit = [
        "Build a weather app with real-time alerts",
        "Create a project management tool for freelancers",
        "Develop a recipe recommendation app",
    ];
    let twitter = [
        "Idea: A platform to connect indie game devs with artists",
        "Project idea: AI-powered personal finance tracker",
        "Building a tool for remote team collaboration",
    ];
    let linkedin = [
        "Develop a tool for remote team collaboration",
        "Project: Automated social media scheduler",
        "Idea: Blockchain-based supply chain tracker",
    ];

    let mut out = Vec::new();
    out.extend(reddit.iter().map(|t| RawCandidate::new(*t, Source::Reddit)));
    out.extend(twitter.iter().map(|t| RawCandidate::new(*t, Source::Twitter)));
    out.extend(
        linkedin
            .iter()
            .map(|t| RawCandidate::new(*t, Source::Linkedin)),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::types::Source;
    use anyhow::anyhow;

    struct FixedProvider {
        texts: Vec<&'static str>,
    }

    #[async_trait::async_trait]
    impl SourceProvider for FixedProvider {
        async fn fetch_latest(&self, _keywords: &[String]) -> anyhow::Result<Vec<RawCandidate>> {
            Ok(self
                .texts
                .iter()
                .map(|t| RawCandidate::new(*t, Source::Reddit))
                .collect())
        }
        fn name(&self) -> &'static str {
            "fixed"
        }
        fn source(&self) -> Source {
            Source::Reddit
        }
    }

    struct FailingProvider;

    #[async_trait::async_trait]
    impl SourceProvider for FailingProvider {
        async fn fetch_latest(&self, _keywords: &[String]) -> anyhow::Result<Vec<RawCandidate>> {
            Err(anyhow!("credentials rejected"))
        }
        fn name(&self) -> &'static str {
            "failing"
        }
        fn source(&self) -> Source {
            Source::Twitter
        }
    }

    #[test]
    fn idea_gate_is_case_insensitive() {
        assert!(looks_like_idea("A weekend PROJECT for the bold"));
        assert!(looks_like_idea("idea: ship it"));
        assert!(!looks_like_idea("just a regular post"));
    }

    #[tokio::test]
    async fn failing_provider_does_not_abort_the_pass() {
        let providers: Vec<Box<dyn SourceProvider>> = vec![
            Box::new(FailingProvider),
            Box::new(FixedProvider {
                texts: vec!["project idea one", "project idea two"],
            }),
        ];
        let report = fetch_all(&providers, &[], Duration::ZERO).await;
        assert_eq!(report.candidates.len(), 2);
        assert_eq!(report.failed_sources, vec!["failing".to_string()]);
    }
}
