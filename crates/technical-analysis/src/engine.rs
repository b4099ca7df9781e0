use analysis_core::{AnalysisError, IndicatorConfig, PriceSeries};

use crate::indicators::{bollinger_bands, ema, macd, rsi, sma};

/// Per-bar indicator columns, each aligned with the source series
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    pub sma_short: Vec<Option<f64>>,
    pub sma_long: Vec<Option<f64>>,
    pub ema_short: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub macd_line: Vec<Option<f64>>,
    pub macd_signal: Vec<Option<f64>>,
    pub macd_histogram: Vec<Option<f64>>,
    pub bollinger_upper: Vec<Option<f64>>,
    pub bollinger_middle: Vec<Option<f64>>,
    pub bollinger_lower: Vec<Option<f64>>,
}

/// Compute the full indicator set over a normalized series. The series must
/// cover the longest configured window (the long SMA); shorter series get an
/// explicit insufficient-data error, never a partially filled set.
pub fn compute_indicators(
    series: &PriceSeries,
    config: &IndicatorConfig,
) -> Result<IndicatorSet, AnalysisError> {
    let closes = series.closes();
    let required = config.sma_long;

    if closes.len() < required {
        return Err(AnalysisError::InsufficientData {
            component: "technical analysis",
            required,
            actual: closes.len(),
        });
    }

    let macd_columns = macd(
        &closes,
        config.macd_fast,
        config.macd_slow,
        config.macd_signal,
    );
    let bands = bollinger_bands(&closes, config.bollinger_period, config.bollinger_width);

    Ok(IndicatorSet {
        sma_short: sma(&closes, config.sma_short),
        sma_long: sma(&closes, config.sma_long),
        ema_short: ema(&closes, config.ema_period),
        rsi: rsi(&closes, config.rsi_period),
        macd_line: macd_columns.macd_line,
        macd_signal: macd_columns.signal_line,
        macd_histogram: macd_columns.histogram,
        bollinger_upper: bands.upper,
        bollinger_middle: bands.middle,
        bollinger_lower: bands.lower,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::Bar;
    use chrono::{Duration, Utc};

    fn series(closes: &[f64]) -> PriceSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                timestamp: Utc::now() - Duration::days(closes.len() as i64 - i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1_000_000.0,
            })
            .collect();
        PriceSeries::from_bars(bars).unwrap()
    }

    #[test]
    fn test_short_series_is_rejected() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let result = compute_indicators(&series(&closes), &IndicatorConfig::default());

        match result {
            Err(AnalysisError::InsufficientData {
                required, actual, ..
            }) => {
                assert_eq!(required, 50);
                assert_eq!(actual, 30);
            }
            _ => panic!("expected insufficient data"),
        }
    }

    #[test]
    fn test_columns_align_with_series() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.3).sin()).collect();
        let set = compute_indicators(&series(&closes), &IndicatorConfig::default()).unwrap();

        assert_eq!(set.sma_short.len(), closes.len());
        assert_eq!(set.sma_long.len(), closes.len());
        assert_eq!(set.rsi.len(), closes.len());
        assert_eq!(set.macd_histogram.len(), closes.len());

        // Long SMA defined exactly from its window edge
        assert!(set.sma_long[48].is_none());
        assert!(set.sma_long[49].is_some());
        assert!(set.sma_long.last().unwrap().is_some());
    }
}
