use serde::Deserialize;

/// Indicator windows and thresholds
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub sma_short: usize,
    pub sma_long: usize,
    pub ema_period: usize,
    pub rsi_period: usize,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_width: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_short: 20,
            sma_long: 50,
            ema_period: 12,
            rsi_period: 14,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_width: 2.0,
        }
    }
}

/// Volatility and beta banding for the risk assessor.
/// Volatility thresholds are daily-return stdev fractions, not annualized.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub low_volatility: f64,
    pub high_volatility: f64,
    pub low_beta: f64,
    pub high_beta: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low_volatility: 0.015,
            high_volatility: 0.03,
            low_beta: 0.8,
            high_beta: 1.5,
        }
    }
}

/// Multipliers applied when combining component scores
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub fundamental_weight: f64,
    pub risk_weight: f64,
    pub long_term_fundamental_weight: f64,
    pub long_term_risk_weight: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            fundamental_weight: 0.75,
            risk_weight: 0.5,
            long_term_fundamental_weight: 1.5,
            long_term_risk_weight: 0.3,
        }
    }
}

/// Full injected configuration for one analyzer instance
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub indicators: IndicatorConfig,
    pub risk: RiskThresholds,
    pub weights: ScoringWeights,
}
