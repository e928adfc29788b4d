mod config;
mod criteria;
mod guidance;
mod report;

pub use config::{
    ComplexityMultipliers, CriterionWeights, ScoringConfig, ScoringConfigError, UrgencyTimelines,
};
pub use guidance::BidGuidance;
pub use report::{BidScoreReport, Criterion, CriterionScore};

use crate::marketplace::domain::{Bid, Mission, Provider};

/// Stateless engine applying the criterion rubric and fixed weights to a bid.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    /// Build an engine, rejecting configurations whose weights do not sum
    /// to 1.0.
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Produce the multi-criteria score report for one bid.
    pub fn score_bid(&self, bid: &Bid, mission: &Mission, provider: &Provider) -> BidScoreReport {
        let criteria = criteria::score_criteria(bid, mission, provider, &self.config);
        report::aggregate(bid, mission, provider, criteria, &self.config)
    }

    /// Suggest a competitive price for a new bid on the mission.
    pub fn suggest_bid(&self, mission: &Mission, current_prices: &[f64]) -> BidGuidance {
        guidance::suggest_bid(mission, current_prices, &self.config)
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self {
            config: ScoringConfig::default(),
        }
    }
}
