// src/output/mod.rs
//! Output selection and file writing. Rendering is a pure projection of a
//! finished `RunResult`; nothing here filters or reorders ideas.

pub mod csv;
pub mod json;
pub mod markdown;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::process::types::RunResult;

pub const BASENAME: &str = "sparkscraper_ideas";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Markdown,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    pub fn filename(&self) -> String {
        format!("{}.{}", BASENAME, self.extension())
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => anyhow::bail!("unknown output format: {other}"),
        }
    }
}

pub fn render(result: &RunResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(markdown::render(result)),
        OutputFormat::Json => json::render(result),
        OutputFormat::Csv => Ok(csv::render(result)),
    }
}

/// Render and write one file per requested format, returning the paths.
pub fn save(result: &RunResult, formats: &[OutputFormat], out_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output dir {}", out_dir.display()))?;

    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let content = render(result, *format)?;
        let path = out_dir.join(format.filename());
        std::fs::write(&path, content)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "output saved");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parsing_accepts_aliases() {
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn filenames_follow_the_fixed_basename() {
        assert_eq!(OutputFormat::Csv.filename(), "sparkscraper_ideas.csv");
        assert_eq!(OutputFormat::Markdown.filename(), "sparkscraper_ideas.md");
    }
}
