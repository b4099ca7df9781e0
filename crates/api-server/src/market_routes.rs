//! Market Data API Routes
//!
//! Liveness probe, latest price, and news passthrough.

use analysis_core::{NewsItem, PriceSeries};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::{ApiResponse, AppError, AppState};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PriceQuote {
    pub symbol: String,
    pub price: f64,
    pub previous_close: Option<f64>,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
}

pub fn market_routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/price/:symbol", get(get_price))
        .route("/api/news/:symbol", get(get_news))
}

async fn health() -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::success(HealthStatus {
        status: "ok",
        service: "stock-analysis-api",
    }))
}

async fn get_price(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<PriceQuote>>, AppError> {
    let symbol = symbol.to_uppercase();
    let series = state.get_series(&symbol).await?;
    Ok(Json(ApiResponse::success(quote_from_series(
        symbol, &series,
    ))))
}

async fn get_news(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<Vec<NewsItem>>>, AppError> {
    let symbol = symbol.to_uppercase();
    let items = state.provider.get_news(&symbol).await?;
    Ok(Json(ApiResponse::success(items)))
}

fn quote_from_series(symbol: String, series: &PriceSeries) -> PriceQuote {
    let bars = series.bars();
    let price = series.last().close;
    let previous_close = bars.len().checked_sub(2).map(|i| bars[i].close);
    let change = previous_close.map(|prev| price - prev);
    let change_percent = previous_close
        .filter(|prev| *prev != 0.0)
        .map(|prev| (price / prev - 1.0) * 100.0);

    PriceQuote {
        symbol,
        price,
        previous_close,
        change,
        change_percent,
    }
}
