use analysis_core::{FundamentalScore, OverviewRecord};

pub struct FundamentalScorer;

impl FundamentalScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score an overview record field by field. Missing or non-numeric
    /// fields fall to their unscored branch; nothing here can fail.
    pub fn score_overview(&self, overview: &OverviewRecord) -> FundamentalScore {
        let mut score = 0;

        let pe_rating = match overview.pe_ratio {
            Some(pe) if pe > 0.0 && pe < 15.0 => {
                score += 2;
                "Undervalued"
            }
            Some(pe) if pe >= 15.0 && pe < 25.0 => {
                score += 1;
                "Fair Value"
            }
            Some(pe) if pe >= 25.0 => "Overvalued",
            _ => "N/A",
        };

        let size_class = match overview.market_cap {
            Some(cap) if cap > 200_000_000_000.0 => {
                score += 2;
                "Mega Cap"
            }
            Some(cap) if cap > 10_000_000_000.0 => {
                score += 1;
                "Large Cap"
            }
            Some(cap) if cap > 2_000_000_000.0 => "Mid Cap",
            Some(_) => {
                score -= 1;
                "Small Cap"
            }
            None => "Unknown",
        };

        let dividend_rating = match overview.dividend_yield {
            Some(dividend) if dividend > 0.03 => {
                score += 1;
                "Good Dividend"
            }
            Some(_) => "Low/No Dividend",
            None => "N/A",
        };

        FundamentalScore {
            score,
            pe_rating: pe_rating.to_string(),
            size_class: size_class.to_string(),
            dividend_rating: dividend_rating.to_string(),
        }
    }
}

impl Default for FundamentalScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overview(pe: Option<f64>, cap: Option<f64>, dividend: Option<f64>) -> OverviewRecord {
        OverviewRecord {
            symbol: "TEST".to_string(),
            pe_ratio: pe,
            market_cap: cap,
            dividend_yield: dividend,
            ..Default::default()
        }
    }

    #[test]
    fn test_strong_fundamentals() {
        let scorer = FundamentalScorer::new();
        let result = scorer.score_overview(&overview(Some(10.0), Some(500e9), Some(0.04)));

        // 2 for the PE, 2 for the cap, 1 for the dividend
        assert_eq!(result.score, 5);
        assert_eq!(result.pe_rating, "Undervalued");
        assert_eq!(result.size_class, "Mega Cap");
        assert_eq!(result.dividend_rating, "Good Dividend");
    }

    #[test]
    fn test_pe_bands() {
        let scorer = FundamentalScorer::new();

        assert_eq!(
            scorer
                .score_overview(&overview(Some(14.99), None, None))
                .pe_rating,
            "Undervalued"
        );
        assert_eq!(
            scorer
                .score_overview(&overview(Some(15.0), None, None))
                .pe_rating,
            "Fair Value"
        );
        assert_eq!(
            scorer
                .score_overview(&overview(Some(25.0), None, None))
                .pe_rating,
            "Overvalued"
        );
    }

    #[test]
    fn test_negative_pe_is_not_undervalued() {
        // A loss-making company has no meaningful PE
        let scorer = FundamentalScorer::new();
        let result = scorer.score_overview(&overview(Some(-8.0), None, None));

        assert_eq!(result.pe_rating, "N/A");
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_cap_bands() {
        let scorer = FundamentalScorer::new();

        let result = scorer.score_overview(&overview(None, Some(50e9), None));
        assert_eq!(result.size_class, "Large Cap");
        assert_eq!(result.score, 1);

        let result = scorer.score_overview(&overview(None, Some(5e9), None));
        assert_eq!(result.size_class, "Mid Cap");
        assert_eq!(result.score, 0);

        let result = scorer.score_overview(&overview(None, Some(500e6), None));
        assert_eq!(result.size_class, "Small Cap");
        assert_eq!(result.score, -1);
    }

    #[test]
    fn test_missing_fields_never_fail() {
        let scorer = FundamentalScorer::new();
        let result = scorer.score_overview(&overview(None, None, None));

        assert_eq!(result.score, 0);
        assert_eq!(result.pe_rating, "N/A");
        assert_eq!(result.size_class, "Unknown");
        assert_eq!(result.dividend_rating, "N/A");
    }

    #[test]
    fn test_low_dividend_scores_nothing() {
        let scorer = FundamentalScorer::new();
        let result = scorer.score_overview(&overview(None, None, Some(0.01)));

        assert_eq!(result.dividend_rating, "Low/No Dividend");
        assert_eq!(result.score, 0);
    }
}
