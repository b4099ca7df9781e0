use analysis_core::{IndicatorConfig, PriceSeries, TechnicalSignals, Trend};

use crate::engine::IndicatorSet;

fn latest(column: &[Option<f64>]) -> Option<f64> {
    column.last().copied().flatten()
}

/// Trend from the latest close and its moving averages. Equality on any
/// comparison falls through to Sideways.
pub fn classify_trend(close: f64, sma_short: Option<f64>, sma_long: Option<f64>) -> Trend {
    let Some(short) = sma_short else {
        return Trend::Unknown;
    };

    match sma_long {
        Some(long) if close > short && short > long => Trend::StrongUptrend,
        Some(long) if close < short && short < long => Trend::StrongDowntrend,
        _ if close > short => Trend::Uptrend,
        _ if close < short => Trend::Downtrend,
        _ => Trend::Sideways,
    }
}

/// Momentum label composition from RSI and the MACD histogram. An undefined
/// RSI contributes no label; with nothing applicable the result is Neutral.
pub fn classify_momentum(
    rsi: Option<f64>,
    macd_histogram: Option<f64>,
    config: &IndicatorConfig,
) -> String {
    let mut signals: Vec<&'static str> = Vec::new();

    if let Some(rsi) = rsi {
        if rsi < config.rsi_oversold {
            signals.push("Oversold (RSI)");
        } else if rsi > config.rsi_overbought {
            signals.push("Overbought (RSI)");
        }
    }

    if let Some(histogram) = macd_histogram {
        if histogram > 0.0 {
            signals.push("Bullish (MACD)");
        } else {
            signals.push("Bearish (MACD)");
        }
    }

    if signals.is_empty() {
        "Neutral".to_string()
    } else {
        signals.join(", ")
    }
}

/// Latest-bar technical signals from an annotated series
pub fn classify(
    series: &PriceSeries,
    indicators: &IndicatorSet,
    config: &IndicatorConfig,
) -> TechnicalSignals {
    let close = series.last().close;
    let sma_short = latest(&indicators.sma_short);
    let sma_long = latest(&indicators.sma_long);
    let rsi = latest(&indicators.rsi);
    let macd_histogram = latest(&indicators.macd_histogram);

    TechnicalSignals {
        trend: classify_trend(close, sma_short, sma_long),
        momentum: classify_momentum(rsi, macd_histogram, config),
        rsi,
        macd: latest(&indicators.macd_line),
        macd_signal: latest(&indicators.macd_signal),
        macd_histogram,
        sma_short,
        sma_long,
        ema_short: latest(&indicators.ema_short),
        bollinger_upper: latest(&indicators.bollinger_upper),
        bollinger_middle: latest(&indicators.bollinger_middle),
        bollinger_lower: latest(&indicators.bollinger_lower),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_strong_uptrend() {
        let trend = classify_trend(110.0, Some(105.0), Some(100.0));
        assert_eq!(trend, Trend::StrongUptrend);
    }

    #[test]
    fn test_trend_uptrend_without_long_confirmation() {
        // Above the short average but the short sits below the long
        let trend = classify_trend(110.0, Some(105.0), Some(108.0));
        assert_eq!(trend, Trend::Uptrend);

        // No long average available at all
        let trend = classify_trend(110.0, Some(105.0), None);
        assert_eq!(trend, Trend::Uptrend);
    }

    #[test]
    fn test_trend_downtrends() {
        assert_eq!(
            classify_trend(90.0, Some(95.0), Some(100.0)),
            Trend::StrongDowntrend
        );
        assert_eq!(
            classify_trend(90.0, Some(95.0), Some(92.0)),
            Trend::Downtrend
        );
    }

    #[test]
    fn test_trend_equality_is_sideways() {
        // A flat series puts the close exactly on its averages
        assert_eq!(
            classify_trend(100.0, Some(100.0), Some(100.0)),
            Trend::Sideways
        );
        assert_eq!(classify_trend(100.0, Some(100.0), None), Trend::Sideways);
    }

    #[test]
    fn test_trend_unknown_without_short_average() {
        assert_eq!(classify_trend(100.0, None, None), Trend::Unknown);
    }

    #[test]
    fn test_momentum_labels() {
        let config = IndicatorConfig::default();

        let momentum = classify_momentum(Some(25.0), Some(0.5), &config);
        assert_eq!(momentum, "Oversold (RSI), Bullish (MACD)");

        let momentum = classify_momentum(Some(75.0), Some(-0.5), &config);
        assert_eq!(momentum, "Overbought (RSI), Bearish (MACD)");

        let momentum = classify_momentum(Some(50.0), Some(0.5), &config);
        assert_eq!(momentum, "Bullish (MACD)");
    }

    #[test]
    fn test_momentum_undefined_rsi_omitted() {
        let config = IndicatorConfig::default();

        // Undefined RSI contributes nothing; MACD label stands alone
        let momentum = classify_momentum(None, Some(-1.0), &config);
        assert_eq!(momentum, "Bearish (MACD)");

        // Nothing applicable at all
        let momentum = classify_momentum(None, None, &config);
        assert_eq!(momentum, "Neutral");
    }

    #[test]
    fn test_momentum_zero_histogram_is_bearish() {
        let config = IndicatorConfig::default();
        let momentum = classify_momentum(Some(50.0), Some(0.0), &config);
        assert_eq!(momentum, "Bearish (MACD)");
    }
}
