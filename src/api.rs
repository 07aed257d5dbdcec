//! HTTP API for the Quote Engine.
//!
//! This module exposes a minimal REST API around the quote engine
//! using the [`axum`](https://crates.io/crates/axum) framework.  Clients
//! post the raw form fields and receive computed quotes, formatted
//! amounts, proposal numbers and job presets as JSON.  Every handler is a thin
//! wrapper over the pure functions in [`crate::engine`],
//! [`crate::currency`], [`crate::proposal`] and [`crate::presets`].

use crate::config::Config;
use crate::currency::format_currency;
use crate::engine::{calculate_quote, quote_packages};
use crate::error::AppError;
use crate::models::{JobDetails, PackageQuotes, PricingConfiguration, Quote};
use crate::presets::{self, TradeJobs};
use crate::proposal::{append_upsell, format_proposal_number};
use anyhow::{Context, Result};
use axum::{
    extract::Path,
    routing::{get, post},
    Json, Router,
};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Body of `POST /api/quote`: one package's line-item text plus the
/// pricing fields, flattened the way the job form sends them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteRequest {
    pub material_line_items: String,
    pub labor_line_items: String,
    #[serde(flatten)]
    pub pricing: PricingConfiguration,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalRequest {
    pub job: JobDetails,
    /// Running proposal counter kept by the caller.
    #[serde(default = "first_proposal")]
    pub proposal_counter: u32,
}

fn first_proposal() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalResponse {
    pub proposal_number: String,
    pub quotes: PackageQuotes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormatRequest {
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsellRequest {
    #[serde(default)]
    pub material_line_items: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsellResponse {
    pub material_line_items: String,
}

/// Build the API router.
pub fn build_router() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/quote", post(quote_handler))
        .route("/api/packages", post(packages_handler))
        .route("/api/proposal", post(proposal_handler))
        .route("/api/format", post(format_handler))
        .route("/api/upsell", post(upsell_handler))
        .route("/api/presets", get(presets_handler))
        .route("/api/presets/:trade/:job", get(preset_handler))
}

/// GET /health
async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "quote-engine",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// POST /api/quote
async fn quote_handler(Json(request): Json<QuoteRequest>) -> Json<Quote> {
    Json(calculate_quote(
        &request.material_line_items,
        &request.labor_line_items,
        &request.pricing,
    ))
}

/// POST /api/packages
async fn packages_handler(Json(job): Json<JobDetails>) -> Json<PackageQuotes> {
    Json(quote_packages(&job))
}

/// POST /api/proposal
async fn proposal_handler(Json(request): Json<ProposalRequest>) -> Json<ProposalResponse> {
    let proposal_number = format_proposal_number(
        &request.job.proposal_number_prefix,
        Utc::now().year(),
        request.proposal_counter,
    );
    let quotes = quote_packages(&request.job);
    info!(%proposal_number, "proposal quoted");
    Json(ProposalResponse {
        proposal_number,
        quotes,
    })
}

/// POST /api/format
async fn format_handler(Json(request): Json<FormatRequest>) -> Json<Value> {
    Json(json!({ "formatted": format_currency(request.amount, &request.currency) }))
}

/// POST /api/upsell
async fn upsell_handler(
    Json(request): Json<UpsellRequest>,
) -> Result<Json<UpsellResponse>, AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("upsell name must not be empty".to_string()));
    }
    Ok(Json(UpsellResponse {
        material_line_items: append_upsell(&request.material_line_items, &request.name),
    }))
}

/// GET /api/presets
async fn presets_handler() -> Json<&'static [TradeJobs]> {
    Json(presets::CATALOGUE)
}

/// GET /api/presets/:trade/:job
async fn preset_handler(
    Path((trade, job)): Path<(String, String)>,
) -> Result<Json<JobDetails>, AppError> {
    presets::preset(&trade, &job).map(Json).ok_or_else(|| {
        AppError::NotFound(format!("no preset for {trade} / {job}"))
    })
}

/// Launch the API server on the configured address.  Blocks until the
/// server terminates.
pub async fn serve(config: &Config) -> Result<()> {
    let app = build_router().layer(TraceLayer::new_for_http());
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("Server listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
