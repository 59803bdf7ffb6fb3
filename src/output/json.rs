// src/output/json.rs
//! JSON rendering: a `metadata` object plus the full `ideas` array. Idea field
//! names are fixed by the output contract.

use anyhow::Result;
use serde::Serialize;

use crate::ingest::types::Source;
use crate::process::types::{Idea, RunResult};

#[derive(Serialize)]
struct Document<'a> {
    metadata: Metadata,
    ideas: &'a [Idea],
}

#[derive(Serialize)]
struct Metadata {
    generated_at: String,
    total_ideas: usize,
    sources: Vec<Source>,
    categories: Vec<String>,
}

pub fn render(result: &RunResult) -> Result<String> {
    let doc = Document {
        metadata: Metadata {
            generated_at: result.generated_at.to_rfc3339(),
            total_ideas: result.ideas.len(),
            sources: result.sources(),
            categories: result.categories(),
        },
        ideas: &result.ideas,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}
