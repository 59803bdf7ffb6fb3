// src/api.rs
//! Web interface: a thin JSON API over the same harvest entry points the CLI
//! uses. Routes mirror the original tool's endpoints: config inspection,
//! a scrape trigger, an inline sample, and downloads of the generated files.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::config::ScraperConfig;
use crate::harvest::{self, HarvestOptions};
use crate::output::OutputFormat;

#[derive(Clone)]
pub struct AppState {
    config: Arc<ScraperConfig>,
    download_dir: Arc<PathBuf>,
}

pub fn create_router(config: ScraperConfig) -> Router {
    create_router_in(config, PathBuf::from("."))
}

/// Router with a specific directory for download lookups. The plain
/// `create_router` serves them from the working directory.
pub fn create_router_in(config: ScraperConfig, download_dir: PathBuf) -> Router {
    let state = AppState {
        config: Arc::new(config),
        download_dir: Arc::new(download_dir),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/config", get(get_config))
        .route("/api/scrape", post(scrape))
        .route("/api/sample", get(sample))
        .route("/api/download/{format}", get(download))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
struct ConfigResp {
    keywords: Vec<String>,
    subreddits: Vec<String>,
    categories: Vec<String>,
    twitter_configured: bool,
}

async fn get_config(State(state): State<AppState>) -> Json<ConfigResp> {
    let cfg = &state.config;
    Json(ConfigResp {
        keywords: cfg.keywords.clone(),
        subreddits: cfg.subreddits.clone(),
        categories: cfg.taxonomy.keys().cloned().collect(),
        twitter_configured: cfg.twitter_configured(),
    })
}

#[derive(serde::Deserialize, Default)]
struct ScrapeReq {
    #[serde(default)]
    keywords: Option<Vec<String>>,
    #[serde(default)]
    subreddits: Option<Vec<String>>,
    #[serde(default)]
    formats: Option<Vec<OutputFormat>>,
    #[serde(default)]
    out_dir: Option<String>,
}

#[derive(serde::Serialize)]
struct ScrapeResp {
    success: bool,
    total_ideas: usize,
    by_source: std::collections::BTreeMap<String, usize>,
    failed_sources: Vec<String>,
    files: Vec<String>,
}

async fn scrape(
    State(state): State<AppState>,
    Json(req): Json<ScrapeReq>,
) -> Result<Json<ScrapeResp>, (StatusCode, String)> {
    let mut cfg = (*state.config).clone();
    if let Some(kw) = req.keywords.filter(|v| !v.is_empty()) {
        cfg.keywords = kw;
    }
    if let Some(subs) = req.subreddits.filter(|v| !v.is_empty()) {
        cfg.subreddits = subs;
    }

    let opts = HarvestOptions {
        formats: req
            .formats
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| vec![OutputFormat::Markdown]),
        out_dir: req.out_dir.map(Into::into).unwrap_or_else(|| ".".into()),
        dedup_store: None,
    };

    let outcome = harvest::run(&cfg, &opts)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")))?;

    Ok(Json(ScrapeResp {
        success: true,
        total_ideas: outcome.result.stats.total_ideas,
        by_source: outcome
            .result
            .stats
            .by_source
            .iter()
            .map(|(s, n)| (s.to_string(), *n))
            .collect(),
        failed_sources: outcome.failed_sources,
        files: outcome
            .written
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
    }))
}

#[derive(serde::Deserialize)]
struct SampleQuery {
    #[serde(default)]
    format: Option<String>,
}

async fn sample(
    State(state): State<AppState>,
    Query(q): Query<SampleQuery>,
) -> Result<String, (StatusCode, String)> {
    let format = match q.format.as_deref() {
        None => OutputFormat::Markdown,
        Some(raw) => raw
            .parse::<OutputFormat>()
            .map_err(|e| (StatusCode::BAD_REQUEST, format!("{e:#}")))?,
    };
    harvest::render_sample(&state.config, format)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")))
}

async fn download(
    State(state): State<AppState>,
    Path(format): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let format = format
        .parse::<OutputFormat>()
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("{e:#}")))?;

    let path = state.download_dir.join(format.filename());
    let bytes = tokio::fs::read(&path).await.map_err(|_| {
        (
            StatusCode::NOT_FOUND,
            format!("{} has not been generated yet", format.filename()),
        )
    })?;

    let content_type = match format {
        OutputFormat::Markdown => "text/markdown; charset=utf-8",
        OutputFormat::Json => "application/json",
        OutputFormat::Csv => "text/csv; charset=utf-8",
    };
    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.filename()),
            ),
        ],
        bytes,
    ))
}
