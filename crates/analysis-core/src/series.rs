use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::types::Bar;

/// Normalized price history: ascending timestamps, duplicates collapsed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Build a series from raw provider bars. Bars are sorted ascending by
    /// timestamp, duplicate timestamps keep the last bar seen, and bars with
    /// a non-finite close are dropped.
    pub fn from_bars(mut bars: Vec<Bar>) -> Result<Self, AnalysisError> {
        bars.retain(|b| b.close.is_finite() && b.close > 0.0);
        bars.sort_by_key(|b| b.timestamp);

        let mut deduped: Vec<Bar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match deduped.last_mut() {
                Some(last) if last.timestamp == bar.timestamp => *last = bar,
                _ => deduped.push(bar),
            }
        }

        if deduped.is_empty() {
            return Err(AnalysisError::InvalidData(
                "no usable price bars after normalization".to_string(),
            ));
        }

        Ok(Self { bars: deduped })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Latest bar; the series is never empty after construction
    pub fn last(&self) -> &Bar {
        &self.bars[self.bars.len() - 1]
    }

    pub fn first(&self) -> &Bar {
        &self.bars[0]
    }
}
