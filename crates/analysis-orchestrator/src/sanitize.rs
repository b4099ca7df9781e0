use analysis_core::{StockAnalysis, StrategyReport};

/// Non-finite floats never reach a response body: required fields coerce
/// to zero, optional fields drop to absent.
pub fn scrub(analysis: &mut StockAnalysis) {
    analysis.current_price = finite_or_zero(analysis.current_price);
    analysis.high_52w = finite_or_zero(analysis.high_52w);
    analysis.low_52w = finite_or_zero(analysis.low_52w);
    analysis.recommendation.total_score = finite_or_zero(analysis.recommendation.total_score);

    let technical = &mut analysis.technical;
    clean(&mut technical.rsi);
    clean(&mut technical.macd);
    clean(&mut technical.macd_signal);
    clean(&mut technical.macd_histogram);
    clean(&mut technical.sma_short);
    clean(&mut technical.sma_long);
    clean(&mut technical.ema_short);
    clean(&mut technical.bollinger_upper);
    clean(&mut technical.bollinger_middle);
    clean(&mut technical.bollinger_lower);

    clean(&mut analysis.risk.volatility);

    let performance = &mut analysis.performance;
    for slot in [
        &mut performance.one_day,
        &mut performance.five_days,
        &mut performance.one_month,
        &mut performance.six_months,
        &mut performance.year_to_date,
        &mut performance.one_year,
        &mut performance.five_years,
    ] {
        if matches!(slot, Some(entry) if !entry.base.is_finite() || !entry.change.is_finite()) {
            *slot = None;
        }
    }

    if let StrategyReport::Backtested {
        lump_sum_return_pct,
        dca_return_pct,
        annualized_volatility,
        forecast,
        ..
    } = &mut analysis.investment_strategy
    {
        *lump_sum_return_pct = finite_or_zero(*lump_sum_return_pct);
        *dca_return_pct = finite_or_zero(*dca_return_pct);
        *annualized_volatility = finite_or_zero(*annualized_volatility);
        forecast.optimistic = finite_or_zero(forecast.optimistic);
        forecast.realistic = finite_or_zero(forecast.realistic);
        forecast.pessimistic = finite_or_zero(forecast.pessimistic);
    }

    for point in &mut analysis.chart_series {
        point.close = finite_or_zero(point.close);
        point.volume = finite_or_zero(point.volume);
        clean(&mut point.sma_short);
        clean(&mut point.sma_long);
    }
}

pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn clean(slot: &mut Option<f64>) {
    if matches!(slot, Some(value) if !value.is_finite()) {
        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::{
        Advice, ChartPoint, Confidence, FundamentalScore, LongTermAdvice, PerformanceEntry,
        PerformanceReport, Recommendation, RiskAssessment, RiskLevel, TechnicalSignals, Trend,
    };
    use chrono::Utc;

    fn analysis_with_poisoned_floats() -> StockAnalysis {
        StockAnalysis {
            symbol: "TEST".to_string(),
            name: None,
            timestamp: Utc::now(),
            current_price: f64::NAN,
            high_52w: f64::INFINITY,
            low_52w: 90.0,
            recommendation: Recommendation {
                short_term: Advice::Hold,
                short_term_confidence: Confidence::Medium,
                long_term: LongTermAdvice::Hold,
                total_score: f64::INFINITY,
                explanation: String::new(),
            },
            technical: TechnicalSignals {
                trend: Trend::Sideways,
                momentum: "Neutral".to_string(),
                rsi: Some(f64::NAN),
                macd: Some(1.0),
                macd_signal: None,
                macd_histogram: Some(f64::NEG_INFINITY),
                sma_short: Some(100.0),
                sma_long: None,
                ema_short: None,
                bollinger_upper: None,
                bollinger_middle: None,
                bollinger_lower: None,
            },
            fundamental: FundamentalScore {
                score: 0,
                pe_rating: "N/A".to_string(),
                size_class: "Unknown".to_string(),
                dividend_rating: "N/A".to_string(),
            },
            risk: RiskAssessment {
                level: RiskLevel::Low,
                score: 0,
                volatility: Some(f64::NAN),
                factors: Vec::new(),
            },
            performance: PerformanceReport {
                one_day: Some(PerformanceEntry {
                    base: f64::NAN,
                    change: 0.0,
                }),
                five_days: Some(PerformanceEntry {
                    base: 100.0,
                    change: 0.05,
                }),
                ..Default::default()
            },
            investment_strategy: StrategyReport::InsufficientData {
                required: 252,
                actual: 0,
            },
            chart_series: vec![ChartPoint {
                timestamp: Utc::now(),
                close: f64::INFINITY,
                sma_short: Some(f64::NAN),
                sma_long: Some(50.0),
                volume: 1_000.0,
            }],
        }
    }

    #[test]
    fn test_scrub_coerces_required_floats() {
        let mut analysis = analysis_with_poisoned_floats();
        scrub(&mut analysis);

        assert_eq!(analysis.current_price, 0.0);
        assert_eq!(analysis.high_52w, 0.0);
        assert_eq!(analysis.recommendation.total_score, 0.0);
        assert_eq!(analysis.chart_series[0].close, 0.0);
    }

    #[test]
    fn test_scrub_drops_poisoned_optionals() {
        let mut analysis = analysis_with_poisoned_floats();
        scrub(&mut analysis);

        assert!(analysis.technical.rsi.is_none());
        assert!(analysis.technical.macd_histogram.is_none());
        assert!(analysis.risk.volatility.is_none());
        assert!(analysis.performance.one_day.is_none());
        assert!(analysis.chart_series[0].sma_short.is_none());
    }

    #[test]
    fn test_scrub_keeps_healthy_values() {
        let mut analysis = analysis_with_poisoned_floats();
        scrub(&mut analysis);

        assert_eq!(analysis.low_52w, 90.0);
        assert_eq!(analysis.technical.macd, Some(1.0));
        assert_eq!(analysis.technical.sma_short, Some(100.0));
        let five_days = analysis.performance.five_days.unwrap();
        assert!((five_days.base - 100.0).abs() < 1e-9);
        assert_eq!(analysis.chart_series[0].sma_long, Some(50.0));
    }
}
