//! Analysis API Routes
//!
//! Single-symbol analysis, multi-symbol comparison, and ranked market
//! scans over named universes.

use std::collections::HashMap;

use analysis_core::{OverviewRecord, PriceSeries, ScanEntry, StockAnalysis};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use crate::{ApiResponse, AppError, AppState};

/// Default scan universe: large caps spread across sectors.
const POPULAR_UNIVERSE: &[&str] = &[
    // Technology
    "AAPL", "MSFT", "NVDA", "AVGO", "AMD", "CRM", "ORCL", "ADBE", "INTC", "QCOM",
    // Communication Services
    "GOOGL", "META", "NFLX", "DIS", // Consumer
    "AMZN", "TSLA", "NKE", "SBUX", "MCD", "HD", "PG", "KO", "COST", "PEP", "WMT",
    // Financials
    "JPM", "V", "GS", "BAC", "MA", // Healthcare
    "UNH", "JNJ", "LLY", "PFE", "ABBV", "MRK", // Energy & Industrials
    "XOM", "CVX", "CAT", "BA", "UPS", "GE",
];

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub symbols: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CompareResult {
    pub analyses: Vec<StockAnalysis>,
    pub best_pick: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    #[serde(default = "default_universe")]
    pub universe: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_universe() -> String {
    "popular".into()
}
fn default_limit() -> usize {
    20
}

pub fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/api/analyze/:symbol", get(analyze_symbol))
        .route("/api/compare", post(compare_symbols))
        .route("/api/recommendations", get(get_recommendations))
}

async fn analyze_symbol(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<StockAnalysis>>, AppError> {
    let symbol = symbol.to_uppercase();

    let (series, overview) = tokio::join!(state.get_series(&symbol), state.get_overview(&symbol));
    let series = series?;

    let analysis = state.analyzer.analyze(&series, &overview)?;
    Ok(Json(ApiResponse::success(analysis)))
}

async fn compare_symbols(
    State(state): State<AppState>,
    Json(req): Json<CompareRequest>,
) -> Result<Json<ApiResponse<CompareResult>>, AppError> {
    let symbols: Vec<String> = req
        .symbols
        .iter()
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();
    if symbols.len() < 2 {
        return Err(AppError::with_status(
            StatusCode::BAD_REQUEST,
            anyhow::anyhow!("Comparison needs at least two symbols"),
        ));
    }

    // One batch quote request covers every symbol; charts fetch concurrently.
    let overviews: HashMap<String, OverviewRecord> =
        match state.provider.get_overviews(&symbols).await {
            Ok(records) => records.into_iter().map(|r| (r.symbol.clone(), r)).collect(),
            Err(e) => {
                tracing::warn!("Batch overview fetch failed: {}", e);
                HashMap::new()
            }
        };

    let mut tasks = JoinSet::new();
    for symbol in symbols {
        let state = state.clone();
        tasks.spawn(async move {
            let series = state.get_series(&symbol).await;
            (symbol, series)
        });
    }

    let mut analyses = Vec::new();
    while let Some(result) = tasks.join_next().await {
        match result {
            Ok((symbol, Ok(series))) => {
                let overview = overviews.get(&symbol).cloned().unwrap_or(OverviewRecord {
                    symbol: symbol.clone(),
                    ..Default::default()
                });
                match state.analyzer.analyze(&series, &overview) {
                    Ok(analysis) => analyses.push(analysis),
                    Err(e) => tracing::warn!("Skipping {} in comparison: {}", symbol, e),
                }
            }
            Ok((symbol, Err(e))) => {
                tracing::warn!("Skipping {} in comparison: {}", symbol, e);
            }
            Err(e) => {
                tracing::error!("Comparison task failed: {}", e);
            }
        }
    }

    if analyses.is_empty() {
        return Err(AppError::with_status(
            StatusCode::NOT_FOUND,
            anyhow::anyhow!("No data available for any requested symbol"),
        ));
    }

    analyses.sort_by(|a, b| {
        b.recommendation
            .total_score
            .partial_cmp(&a.recommendation.total_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let best_pick = analyses.first().map(|a| a.symbol.clone());

    Ok(Json(ApiResponse::success(CompareResult {
        analyses,
        best_pick,
    })))
}

async fn get_recommendations(
    State(state): State<AppState>,
    Query(query): Query<RecommendationsQuery>,
) -> Result<Json<ApiResponse<Vec<ScanEntry>>>, AppError> {
    let limit = query.limit.clamp(1, 50);
    let cache_key = format!("{}:{}", query.universe, limit);
    if let Some(entries) = state.scan_cache.get(&cache_key) {
        return Ok(Json(ApiResponse::success(entries)));
    }

    let symbols = resolve_universe(&query.universe);
    tracing::info!(
        "Market scan: {} symbols from universe '{}'",
        symbols.len(),
        query.universe
    );

    let mut tasks = JoinSet::new();
    for symbol in symbols {
        let state = state.clone();
        tasks.spawn(async move {
            let series = state.get_series(&symbol).await;
            (symbol, series)
        });
    }

    let mut series_by_symbol: HashMap<String, PriceSeries> = HashMap::new();
    while let Some(result) = tasks.join_next().await {
        match result {
            Ok((symbol, Ok(series))) => {
                series_by_symbol.insert(symbol, series);
            }
            Ok((symbol, Err(e))) => {
                tracing::warn!("Skipping {} in scan: {}", symbol, e);
            }
            Err(e) => {
                tracing::error!("Scan fetch task failed: {}", e);
            }
        }
    }

    // The scan fans out over a rayon pool; keep it off the async workers.
    let analyzer = state.analyzer.clone();
    let mut entries = tokio::task::spawn_blocking(move || analyzer.scan(&series_by_symbol))
        .await
        .map_err(|e| anyhow::anyhow!("Scan task failed: {}", e))?;
    entries.truncate(limit);
    state.scan_cache.put(cache_key, entries.clone());

    Ok(Json(ApiResponse::success(entries)))
}

fn resolve_universe(name: &str) -> Vec<String> {
    match name {
        "popular" => POPULAR_UNIVERSE.iter().map(|s| s.to_string()).collect(),
        "tech" => vec![
            "AAPL", "MSFT", "NVDA", "AVGO", "AMD", "CRM", "ORCL", "ADBE", "INTC", "QCOM", "TXN",
            "MU", "NOW", "SNOW", "PLTR",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        "bluechip" => vec![
            "AAPL", "MSFT", "JPM", "JNJ", "V", "WMT", "PG", "MA", "HD", "DIS", "CVX", "MCD", "KO",
            "PEP", "MRK",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        custom => custom
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect(),
    }
}
