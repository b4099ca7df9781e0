use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV bar data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Company overview fields; individually absent fields stay absent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverviewRecord {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub pe_ratio: Option<f64>,
    #[serde(default)]
    pub beta: Option<f64>,
    #[serde(default)]
    pub dividend_yield: Option<f64>,
}

/// Price trend classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    #[serde(rename = "Strong Uptrend")]
    StrongUptrend,
    #[serde(rename = "Uptrend")]
    Uptrend,
    #[serde(rename = "Sideways")]
    Sideways,
    #[serde(rename = "Downtrend")]
    Downtrend,
    #[serde(rename = "Strong Downtrend")]
    StrongDowntrend,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl Trend {
    /// Contribution to the composite recommendation score
    pub fn to_score(&self) -> i32 {
        match self {
            Trend::StrongUptrend => 2,
            Trend::Uptrend => 1,
            Trend::Sideways => 0,
            Trend::Downtrend => -1,
            Trend::StrongDowntrend => -2,
            Trend::Unknown => 0,
        }
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            Trend::StrongUptrend => "Strong Uptrend",
            Trend::Uptrend => "Uptrend",
            Trend::Sideways => "Sideways",
            Trend::Downtrend => "Downtrend",
            Trend::StrongDowntrend => "Strong Downtrend",
            Trend::Unknown => "Unknown",
        }
    }

    pub fn is_bullish(&self) -> bool {
        matches!(self, Trend::StrongUptrend | Trend::Uptrend)
    }
}

/// Latest-bar technical snapshot plus categorical signals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalSignals {
    pub trend: Trend,
    /// Composite of the applicable momentum labels, e.g. "Oversold (RSI), Bullish (MACD)"
    pub momentum: String,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub sma_short: Option<f64>,
    pub sma_long: Option<f64>,
    pub ema_short: Option<f64>,
    pub bollinger_upper: Option<f64>,
    pub bollinger_middle: Option<f64>,
    pub bollinger_lower: Option<f64>,
}

/// Fundamental scoring output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundamentalScore {
    pub score: i32,
    pub pe_rating: String,
    pub size_class: String,
    pub dividend_rating: String,
}

/// Risk level classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl RiskLevel {
    pub fn to_label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Moderate => "Moderate Risk",
            RiskLevel::High => "High Risk",
            RiskLevel::Unknown => "Unknown",
        }
    }
}

/// Risk assessment output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub score: i32,
    /// Annualized stdev of daily returns, in percent; absent on short series
    pub volatility: Option<f64>,
    pub factors: Vec<String>,
}

/// Short-term recommendation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advice {
    #[serde(rename = "Strong Buy")]
    StrongBuy,
    #[serde(rename = "Buy")]
    Buy,
    #[serde(rename = "Hold")]
    Hold,
    #[serde(rename = "Sell")]
    Sell,
    #[serde(rename = "Strong Sell")]
    StrongSell,
}

impl Advice {
    pub fn to_label(&self) -> &'static str {
        match self {
            Advice::StrongBuy => "Strong Buy",
            Advice::Buy => "Buy",
            Advice::Hold => "Hold",
            Advice::Sell => "Sell",
            Advice::StrongSell => "Strong Sell",
        }
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, Advice::StrongBuy | Advice::Buy)
    }
}

/// Long-term recommendation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LongTermAdvice {
    #[serde(rename = "Strong Buy & Hold")]
    StrongBuyHold,
    #[serde(rename = "Buy & Hold")]
    BuyHold,
    #[serde(rename = "Hold")]
    Hold,
    #[serde(rename = "Avoid")]
    Avoid,
}

impl LongTermAdvice {
    pub fn to_label(&self) -> &'static str {
        match self {
            LongTermAdvice::StrongBuyHold => "Strong Buy & Hold",
            LongTermAdvice::BuyHold => "Buy & Hold",
            LongTermAdvice::Hold => "Hold",
            LongTermAdvice::Avoid => "Avoid",
        }
    }
}

/// Confidence attached to the short-term recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
}

/// Synthesized recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub short_term: Advice,
    pub short_term_confidence: Confidence,
    pub long_term: LongTermAdvice,
    pub total_score: f64,
    pub explanation: String,
}

/// Return over one lookback window; change is a fraction of the base price
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PerformanceEntry {
    pub base: f64,
    pub change: f64,
}

/// Trailing returns per lookback window; absent windows are omitted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceReport {
    #[serde(rename = "1D", skip_serializing_if = "Option::is_none")]
    pub one_day: Option<PerformanceEntry>,
    #[serde(rename = "5D", skip_serializing_if = "Option::is_none")]
    pub five_days: Option<PerformanceEntry>,
    #[serde(rename = "1M", skip_serializing_if = "Option::is_none")]
    pub one_month: Option<PerformanceEntry>,
    #[serde(rename = "6M", skip_serializing_if = "Option::is_none")]
    pub six_months: Option<PerformanceEntry>,
    #[serde(rename = "YTD", skip_serializing_if = "Option::is_none")]
    pub year_to_date: Option<PerformanceEntry>,
    #[serde(rename = "1Y", skip_serializing_if = "Option::is_none")]
    pub one_year: Option<PerformanceEntry>,
    #[serde(rename = "5Y", skip_serializing_if = "Option::is_none")]
    pub five_years: Option<PerformanceEntry>,
}

/// Purchase cadence recommended by the backtest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyChoice {
    #[serde(rename = "DCA")]
    Dca,
    #[serde(rename = "Lump Sum")]
    LumpSum,
}

impl StrategyChoice {
    pub fn to_label(&self) -> &'static str {
        match self {
            StrategyChoice::Dca => "DCA",
            StrategyChoice::LumpSum => "Lump Sum",
        }
    }
}

/// Heuristic one-year forward value range for the backtest principal
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ForecastRange {
    pub optimistic: f64,
    pub realistic: f64,
    pub pessimistic: f64,
}

/// Lump-sum vs DCA backtest outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StrategyReport {
    Backtested {
        strategy: StrategyChoice,
        /// The strategy with the higher backtested return; ties go to lump sum
        winner: StrategyChoice,
        lump_sum_return_pct: f64,
        dca_return_pct: f64,
        /// Annualized stdev of daily returns over the trailing year, as a fraction
        annualized_volatility: f64,
        forecast: ForecastRange,
    },
    InsufficientData {
        required: usize,
        actual: usize,
    },
}

/// One plottable bar with moving-average overlays
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPoint {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
    pub sma_short: Option<f64>,
    pub sma_long: Option<f64>,
    pub volume: f64,
}

/// Full single-symbol analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAnalysis {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub current_price: f64,
    /// Trailing 252-bar extremes; the whole series when history is shorter
    pub high_52w: f64,
    pub low_52w: f64,
    pub recommendation: Recommendation,
    pub technical: TechnicalSignals,
    pub fundamental: FundamentalScore,
    pub risk: RiskAssessment,
    pub performance: PerformanceReport,
    pub investment_strategy: StrategyReport,
    pub chart_series: Vec<ChartPoint>,
}

/// One row of a market scan, ranked by score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanEntry {
    pub symbol: String,
    pub price: f64,
    pub trend: Trend,
    pub rsi: Option<f64>,
    pub score: f64,
}

/// News item passed through from the data provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub publisher: String,
    pub link: String,
    pub published: DateTime<Utc>,
}
