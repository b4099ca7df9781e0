use analysis_core::{OverviewRecord, PriceSeries, RiskAssessment, RiskLevel, RiskThresholds};
use statrs::statistics::Statistics;

const MIN_BARS: usize = 30;

pub struct RiskAssessor {
    thresholds: RiskThresholds,
}

impl RiskAssessor {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    /// Assess risk from realized volatility, beta and the recent price move.
    /// Series shorter than 30 bars rate Unknown with a conservative score
    /// instead of failing.
    pub fn assess(&self, series: &PriceSeries, overview: &OverviewRecord) -> RiskAssessment {
        if series.len() < MIN_BARS {
            return RiskAssessment {
                level: RiskLevel::Unknown,
                score: 5,
                volatility: None,
                factors: Vec::new(),
            };
        }

        let closes = series.closes();
        let returns = daily_returns(&closes);
        let daily_volatility = returns.as_slice().std_dev();

        let mut score = 0;
        let mut factors = Vec::new();

        if daily_volatility < self.thresholds.low_volatility {
            factors.push("Low Volatility (Good)".to_string());
            score -= 1;
        } else if daily_volatility > self.thresholds.high_volatility {
            factors.push("High Volatility (Risky)".to_string());
            score += 2;
        } else {
            factors.push("Moderate Volatility".to_string());
            score += 1;
        }

        match overview.beta {
            Some(beta) if beta < self.thresholds.low_beta => {
                factors.push(format!("Low Beta ({:.2}) - Less volatile than market", beta));
                score -= 1;
            }
            Some(beta) if beta > self.thresholds.high_beta => {
                factors.push(format!("High Beta ({:.2}) - More volatile than market", beta));
                score += 1;
            }
            Some(beta) => {
                factors.push(format!("Average Beta ({:.2})", beta));
            }
            None => {
                factors.push("Beta N/A".to_string());
            }
        }

        let month_change = (closes[closes.len() - 1] / closes[closes.len() - 30] - 1.0) * 100.0;
        if month_change < -15.0 {
            factors.push(format!("Sharp Decline ({:.1}% in 30 days)", month_change));
            score += 2;
        } else if month_change > 15.0 {
            factors.push(format!("Sharp Rise ({:.1}% in 30 days)", month_change));
            score += 1;
        }

        let level = if score <= 0 {
            RiskLevel::Low
        } else if score <= 2 {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        };

        RiskAssessment {
            level,
            score,
            volatility: Some(daily_volatility * (252.0_f64).sqrt() * 100.0),
            factors,
        }
    }
}

impl Default for RiskAssessor {
    fn default() -> Self {
        Self::new(RiskThresholds::default())
    }
}

/// Daily percent-change returns between consecutive closes
pub fn daily_returns(closes: &[f64]) -> Vec<f64> {
    closes.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect()
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
                high: close,
                low: close,
                close,
                volume: 1_000_000.0,
            })
            .collect();
        PriceSeries::from_bars(bars).unwrap()
    }

    // 40 bars oscillating between 100 and 100*(1+amplitude)
    fn oscillating(amplitude: f64) -> Vec<f64> {
        (0..40)
            .map(|i| {
                if i % 2 == 0 {
                    100.0
                } else {
                    100.0 * (1.0 + amplitude)
                }
            })
            .collect()
    }

    fn overview_with_beta(beta: Option<f64>) -> OverviewRecord {
        OverviewRecord {
            symbol: "TEST".to_string(),
            beta,
            ..Default::default()
        }
    }

    #[test]
    fn test_short_series_is_unknown() {
        let assessor = RiskAssessor::default();
        let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let result = assessor.assess(&series(&closes), &overview_with_beta(None));

        assert_eq!(result.level, RiskLevel::Unknown);
        assert_eq!(result.score, 5);
        assert!(result.volatility.is_none());
        assert!(result.factors.is_empty());
    }

    #[test]
    fn test_quiet_series_is_low_risk() {
        let assessor = RiskAssessor::default();
        let result = assessor.assess(&series(&oscillating(0.001)), &overview_with_beta(None));

        assert_eq!(result.level, RiskLevel::Low);
        assert_eq!(result.score, -1);
        assert!(result.factors[0].contains("Low Volatility"));
        assert!(result.factors[1].contains("Beta N/A"));
    }

    #[test]
    fn test_volatile_series_with_high_beta() {
        let assessor = RiskAssessor::default();
        let result = assessor.assess(&series(&oscillating(0.05)), &overview_with_beta(Some(1.8)));

        // +2 volatility, +1 beta
        assert_eq!(result.score, 3);
        assert_eq!(result.level, RiskLevel::High);
        assert!(result.factors[0].contains("High Volatility"));
        assert!(result.factors[1].contains("High Beta (1.80)"));
    }

    #[test]
    fn test_risk_score_monotonic_in_volatility() {
        let assessor = RiskAssessor::default();
        let overview = overview_with_beta(Some(1.0));

        let quiet = assessor.assess(&series(&oscillating(0.001)), &overview);
        let moderate = assessor.assess(&series(&oscillating(0.02)), &overview);
        let wild = assessor.assess(&series(&oscillating(0.05)), &overview);

        assert!(quiet.score < moderate.score);
        assert!(moderate.score < wild.score);
    }

    #[test]
    fn test_sharp_decline_raises_risk() {
        let assessor = RiskAssessor::default();

        // Flat for 10 bars, then a steady slide from 100 to 80
        let mut closes = vec![100.0; 10];
        for i in 1..=30 {
            closes.push(100.0 - (20.0 * i as f64 / 30.0));
        }
        let result = assessor.assess(&series(&closes), &overview_with_beta(None));

        assert!(result.factors.iter().any(|f| f.contains("Sharp Decline")));
        assert_eq!(result.level, RiskLevel::Moderate);
    }

    #[test]
    fn test_low_beta_reduces_risk() {
        let assessor = RiskAssessor::default();
        let result = assessor.assess(&series(&oscillating(0.02)), &overview_with_beta(Some(0.5)));

        // +1 volatility, -1 beta
        assert_eq!(result.score, 0);
        assert_eq!(result.level, RiskLevel::Low);
        assert!(result.factors[1].contains("Low Beta (0.50)"));
    }

    #[test]
    fn test_volatility_is_annualized_percent() {
        let assessor = RiskAssessor::default();
        let result = assessor.assess(&series(&oscillating(0.02)), &overview_with_beta(None));

        // Daily stdev near 2% scales to roughly 32% annualized
        let volatility = result.volatility.unwrap();
        assert!(volatility > 20.0 && volatility < 45.0);
    }
}
