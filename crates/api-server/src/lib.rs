//! HTTP API for the stock analysis service.
//!
//! Thin layer over `analysis-orchestrator`: handlers fetch bars and
//! overviews through the shared provider, consult the TTL caches, and
//! hand the data to the analyzer. All scoring stays in the core crates.

mod analysis_routes;
mod market_routes;

use std::sync::Arc;

use analysis_core::{
    AnalysisConfig, AnalysisError, Bar, MarketDataProvider, OverviewRecord, PriceSeries, ScanEntry,
};
use analysis_orchestrator::{StockAnalyzer, TtlCache};
use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use chrono::{DateTime, Duration, Utc};
use market_data::FinanceQueryClient;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Range requested from the provider. Two years of daily bars covers the
/// 252-bar strategy lookback with room for market holidays.
const CHART_RANGE: &str = "2y";

const CHART_TTL_SECS: i64 = 300;
const OVERVIEW_TTL_SECS: i64 = 300;
const SCAN_TTL_SECS: i64 = 1800;
const REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PORT: u16 = 3000;

/// Shared state handed to every route handler.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn MarketDataProvider>,
    pub analyzer: Arc<StockAnalyzer>,
    pub chart_cache: Arc<TtlCache<Vec<Bar>>>,
    pub overview_cache: Arc<TtlCache<OverviewRecord>>,
    pub scan_cache: Arc<TtlCache<Vec<ScanEntry>>>,
}

impl AppState {
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: AnalysisConfig) -> Self {
        Self {
            provider,
            analyzer: Arc::new(StockAnalyzer::new(config)),
            chart_cache: Arc::new(TtlCache::new(Duration::seconds(CHART_TTL_SECS))),
            overview_cache: Arc::new(TtlCache::new(Duration::seconds(OVERVIEW_TTL_SECS))),
            scan_cache: Arc::new(TtlCache::new(Duration::seconds(SCAN_TTL_SECS))),
        }
    }

    /// Two years of daily bars for a symbol, served from the chart cache
    /// when fresh.
    pub async fn get_series(&self, symbol: &str) -> Result<PriceSeries, AnalysisError> {
        if let Some(bars) = self.chart_cache.get(symbol) {
            return PriceSeries::from_bars(bars);
        }
        let bars = self.provider.get_chart(symbol, CHART_RANGE).await?;
        self.chart_cache.put(symbol.to_string(), bars.clone());
        PriceSeries::from_bars(bars)
    }

    /// Company overview for a symbol. A provider failure degrades to an
    /// empty record so price-only analysis can still answer.
    pub async fn get_overview(&self, symbol: &str) -> OverviewRecord {
        if let Some(record) = self.overview_cache.get(symbol) {
            return record;
        }
        match self.provider.get_overview(symbol).await {
            Ok(record) => {
                self.overview_cache.put(symbol.to_string(), record.clone());
                record
            }
            Err(e) => {
                warn!("Overview fetch failed for {}: {}", symbol, e);
                OverviewRecord {
                    symbol: symbol.to_string(),
                    ..Default::default()
                }
            }
        }
    }
}

/// Uniform JSON envelope every endpoint answers with.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: Utc::now(),
        }
    }
}

/// Handler error carrying the HTTP status to answer with.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn with_status(status: StatusCode, err: anyhow::Error) -> Self {
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        let status = match &err {
            AnalysisError::NoData(_) => StatusCode::NOT_FOUND,
            AnalysisError::InsufficientData { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AnalysisError::ProviderError(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        warn!("Request failed ({}): {}", self.status, self.message);
        (self.status, Json(ApiResponse::<()>::error(self.message))).into_response()
    }
}

/// Analyzer configuration from the file named by `ANALYSIS_CONFIG`,
/// defaults when the variable is unset or the file is unreadable.
fn load_config() -> AnalysisConfig {
    let Ok(path) = std::env::var("ANALYSIS_CONFIG") else {
        return AnalysisConfig::default();
    };
    match read_config(&path) {
        Ok(config) => {
            info!("Loaded analyzer config from {}", path);
            config
        }
        Err(e) => {
            warn!("Failed to read analyzer config {}: {} (using defaults)", path, e);
            AnalysisConfig::default()
        }
    }
}

fn read_config(path: &str) -> anyhow::Result<AnalysisConfig> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

async fn handle_middleware_error(err: tower::BoxError) -> (StatusCode, Json<ApiResponse<()>>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(ApiResponse::error("Request timed out".to_string())),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Internal error: {}", err))),
        )
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(market_routes::market_routes())
        .merge(analysis_routes::analysis_routes())
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(tower::timeout::TimeoutLayer::new(
                    std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS),
                )),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config();
    let state = AppState::new(Arc::new(FinanceQueryClient::new()), config);
    let app = build_router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Stock analysis API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
