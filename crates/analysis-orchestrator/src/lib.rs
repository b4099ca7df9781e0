use analysis_core::{
    AnalysisConfig, AnalysisError, ChartPoint, OverviewRecord, PriceSeries, StockAnalysis,
};
use chrono::Utc;
use fundamental_analysis::FundamentalScorer;
use risk_analysis::RiskAssessor;
use strategy_backtest::StrategyBacktester;
use technical_analysis::{classify, compute_indicators, IndicatorSet};

pub mod cache;
pub mod performance;
pub mod recommendation;
pub mod sanitize;
pub mod scan;

pub use cache::TtlCache;
pub use performance::trailing_performance;
pub use recommendation::RecommendationEngine;

/// Bars returned in the annotated chart payload
const CHART_BARS: usize = 90;

/// Window for the 52-week high/low statistics
const WEEK52_BARS: usize = 252;

/// Per-symbol analysis pipeline over pre-fetched market data. Holds no
/// request state, so one instance serves concurrent callers.
pub struct StockAnalyzer {
    config: AnalysisConfig,
    scorer: FundamentalScorer,
    assessor: RiskAssessor,
    backtester: StrategyBacktester,
    synthesizer: RecommendationEngine,
}

impl StockAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        let assessor = RiskAssessor::new(config.risk.clone());
        let synthesizer = RecommendationEngine::new(config.weights.clone());
        Self {
            config,
            scorer: FundamentalScorer::new(),
            assessor,
            backtester: StrategyBacktester::new(),
            synthesizer,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Full analysis of one symbol: indicators, trend and momentum
    /// classification, fundamental and risk scoring, the synthesized
    /// recommendation, trailing performance, the strategy backtest and
    /// an annotated chart window.
    pub fn analyze(
        &self,
        series: &PriceSeries,
        overview: &OverviewRecord,
    ) -> Result<StockAnalysis, AnalysisError> {
        tracing::debug!("Analyzing {} over {} bars", overview.symbol, series.len());

        let indicators = compute_indicators(series, &self.config.indicators)?;
        let technical = classify(series, &indicators, &self.config.indicators);
        let fundamental = self.scorer.score_overview(overview);
        let risk = self.assessor.assess(series, overview);
        let recommendation = self.synthesizer.synthesize(&technical, &fundamental, &risk);

        let (high_52w, low_52w) = week52_range(series);

        let mut analysis = StockAnalysis {
            symbol: overview.symbol.clone(),
            name: overview.name.clone(),
            timestamp: Utc::now(),
            current_price: series.last().close,
            high_52w,
            low_52w,
            recommendation,
            technical,
            fundamental,
            risk,
            performance: performance::trailing_performance(series),
            investment_strategy: self.backtester.evaluate_strategy(series),
            chart_series: chart_series(series, &indicators),
        };
        sanitize::scrub(&mut analysis);

        Ok(analysis)
    }
}

impl Default for StockAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

/// Highest high and lowest low over the trailing year, or over the whole
/// series when it is shorter than a trading year
fn week52_range(series: &PriceSeries) -> (f64, f64) {
    let bars = series.bars();
    let start = bars.len().saturating_sub(WEEK52_BARS);
    let window = &bars[start..];
    let high = window.iter().map(|b| b.high).fold(f64::MIN, f64::max);
    let low = window.iter().map(|b| b.low).fold(f64::MAX, f64::min);
    (high, low)
}

/// Trailing chart window annotated with both moving averages
fn chart_series(series: &PriceSeries, indicators: &IndicatorSet) -> Vec<ChartPoint> {
    let bars = series.bars();
    let start = bars.len().saturating_sub(CHART_BARS);
    bars[start..]
        .iter()
        .enumerate()
        .map(|(offset, bar)| ChartPoint {
            timestamp: bar.timestamp,
            close: bar.close,
            sma_short: indicators.sma_short[start + offset],
            sma_long: indicators.sma_long[start + offset],
            volume: bar.volume,
        })
        .collect()
}
