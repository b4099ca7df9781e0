use std::collections::HashMap;

use analysis_core::{AnalysisError, OverviewRecord, PriceSeries, ScanEntry};
use rayon::prelude::*;
use technical_analysis::{classify, compute_indicators};

use crate::StockAnalyzer;

impl StockAnalyzer {
    /// Rank a pre-fetched batch of series by recommendation score, best
    /// first. Symbols that cannot be analyzed are skipped, not errors.
    pub fn scan(&self, series_by_symbol: &HashMap<String, PriceSeries>) -> Vec<ScanEntry> {
        let mut entries: Vec<ScanEntry> = series_by_symbol
            .par_iter()
            .filter_map(|(symbol, series)| match self.scan_entry(symbol, series) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!("Skipping {} in scan: {}", symbol, e);
                    None
                }
            })
            .collect();

        entries.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.symbol.cmp(&b.symbol))
        });

        entries
    }

    fn scan_entry(&self, symbol: &str, series: &PriceSeries) -> Result<ScanEntry, AnalysisError> {
        let indicators = compute_indicators(series, &self.config.indicators)?;
        let technical = classify(series, &indicators, &self.config.indicators);

        // Batch mode carries no overview data; fundamentals stay neutral
        // and risk rates on price action alone
        let overview = OverviewRecord {
            symbol: symbol.to_string(),
            ..Default::default()
        };
        let fundamental = self.scorer.score_overview(&overview);
        let risk = self.assessor.assess(series, &overview);
        let recommendation = self.synthesizer.synthesize(&technical, &fundamental, &risk);

        Ok(ScanEntry {
            symbol: symbol.to_string(),
            price: series.last().close,
            trend: technical.trend,
            rsi: technical.rsi,
            score: recommendation.total_score,
        })
    }
}
