// src/lib.rs
// Public library surface for the binary, the web interface, and tests.

pub mod api;
pub mod config;
pub mod harvest;
pub mod ingest;
pub mod output;
pub mod process;
pub mod sentiment;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, create_router_in};
pub use crate::config::ScraperConfig;
pub use crate::ingest::types::{RawCandidate, Source, SourceProvider};
pub use crate::output::OutputFormat;
pub use crate::process::types::{Idea, RunResult, RunStats};
pub use crate::process::IdeaProcessor;
