use analysis_core::{ForecastRange, PriceSeries, StrategyChoice, StrategyReport};
use statrs::statistics::Statistics;

const LOOKBACK_BARS: usize = 252;
const PRINCIPAL: f64 = 10_000.0;
const DCA_PURCHASES: usize = 12;
const DCA_INTERVAL: usize = 21;
const HIGH_VOLATILITY_CUTOFF: f64 = 0.25;

/// Replays the trailing trading year as two fixed-principal strategies:
/// everything on day one versus twelve monthly installments.
pub struct StrategyBacktester;

impl StrategyBacktester {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate_strategy(&self, series: &PriceSeries) -> StrategyReport {
        let closes = series.closes();
        if closes.len() < LOOKBACK_BARS {
            return StrategyReport::InsufficientData {
                required: LOOKBACK_BARS,
                actual: closes.len(),
            };
        }

        let start = closes.len() - LOOKBACK_BARS;
        let start_price = closes[start];
        let current_price = closes[closes.len() - 1];

        let lump_sum_return_pct = (current_price / start_price - 1.0) * 100.0;

        // One installment every 21 trading days, last buy 21 bars before the end
        let installment = PRINCIPAL / DCA_PURCHASES as f64;
        let mut shares = 0.0;
        for purchase in 0..DCA_PURCHASES {
            shares += installment / closes[start + purchase * DCA_INTERVAL];
        }
        let dca_return_pct = (shares * current_price / PRINCIPAL - 1.0) * 100.0;

        let returns: Vec<f64> = closes[start..]
            .windows(2)
            .map(|w| (w[1] - w[0]) / w[0])
            .collect();
        let annualized_volatility = returns.as_slice().std_dev() * (252.0_f64).sqrt();

        let winner = if dca_return_pct > lump_sum_return_pct {
            StrategyChoice::Dca
        } else {
            StrategyChoice::LumpSum
        };
        let strategy = if annualized_volatility > HIGH_VOLATILITY_CUTOFF
            || winner == StrategyChoice::Dca
        {
            StrategyChoice::Dca
        } else {
            StrategyChoice::LumpSum
        };

        let growth = current_price / start_price - 1.0;
        let forecast = ForecastRange {
            optimistic: PRINCIPAL * (1.0 + growth + 0.5 * annualized_volatility),
            realistic: PRINCIPAL * (1.0 + growth),
            pessimistic: PRINCIPAL * (1.0 + growth - annualized_volatility),
        };

        StrategyReport::Backtested {
            strategy,
            winner,
            lump_sum_return_pct,
            dca_return_pct,
            annualized_volatility,
            forecast,
        }
    }
}

impl Default for StrategyBacktester {
    fn default() -> Self {
        Self::new()
    }
}
