// src/ingest/types.rs
use anyhow::Result;
use std::fmt;

/// Platform a candidate was harvested from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Reddit,
    Twitter,
    Linkedin,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Reddit => "reddit",
            Source::Twitter => "twitter",
            Source::Linkedin => "linkedin",
        }
    }

    /// Heading form ("Reddit", "Twitter", "LinkedIn").
    pub fn title(&self) -> &'static str {
        match self {
            Source::Reddit => "Reddit",
            Source::Twitter => "Twitter",
            Source::Linkedin => "LinkedIn",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw post as fetched from a platform, before any cleanup or filtering.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct RawCandidate {
    pub text: String,
    pub source: Source,
    pub url: Option<String>,
    pub published_at: Option<u64>, // unix seconds, when the platform exposes it
}

impl RawCandidate {
    pub fn new(text: impl Into<String>, source: Source) -> Self {
        Self {
            text: text.into(),
            source,
            url: None,
            published_at: None,
        }
    }
}

#[async_trait::async_trait]
pub trait SourceProvider: Send + Sync {
    /// Fetch the latest candidates matching the given keywords.
    async fn fetch_latest(&self, keywords: &[String]) -> Result<Vec<RawCandidate>>;
    fn name(&self) -> &'static str;
    fn source(&self) -> Source;
}
