use analysis_core::{
    Advice, Confidence, FundamentalScore, LongTermAdvice, Recommendation, RiskAssessment,
    ScoringWeights, TechnicalSignals,
};

/// Folds the component scores into one ranked short-term call plus a
/// long-term stance driven by fundamentals and risk alone.
pub struct RecommendationEngine {
    weights: ScoringWeights,
}

impl RecommendationEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn synthesize(
        &self,
        technical: &TechnicalSignals,
        fundamental: &FundamentalScore,
        risk: &RiskAssessment,
    ) -> Recommendation {
        let mut score = technical.trend.to_score() as f64;

        if technical.momentum.contains("Oversold") {
            score += 1.0;
        } else if technical.momentum.contains("Overbought") {
            score -= 1.0;
        }

        score += fundamental.score as f64 * self.weights.fundamental_weight;
        score -= risk.score as f64 * self.weights.risk_weight;

        let (short_term, short_term_confidence) = if score >= 3.0 {
            (Advice::StrongBuy, Confidence::High)
        } else if score >= 1.5 {
            (Advice::Buy, Confidence::Medium)
        } else if score >= 0.0 {
            (Advice::Hold, Confidence::Medium)
        } else if score >= -1.5 {
            (Advice::Sell, Confidence::Medium)
        } else {
            (Advice::StrongSell, Confidence::High)
        };

        let long_term_score = fundamental.score as f64 * self.weights.long_term_fundamental_weight
            - risk.score as f64 * self.weights.long_term_risk_weight;
        let long_term = if long_term_score >= 2.0 {
            LongTermAdvice::StrongBuyHold
        } else if long_term_score >= 1.0 {
            LongTermAdvice::BuyHold
        } else if long_term_score >= -1.0 {
            LongTermAdvice::Hold
        } else {
            LongTermAdvice::Avoid
        };

        let explanation = format!(
            "Trend: {} | Momentum: {} | Risk: {} | Valuation: {}",
            technical.trend.to_label(),
            technical.momentum,
            risk.level.to_label(),
            fundamental.pe_rating
        );

        Recommendation {
            short_term,
            short_term_confidence,
            long_term,
            total_score: score,
            explanation,
        }
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}
