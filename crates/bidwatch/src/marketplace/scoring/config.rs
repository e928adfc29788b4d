use crate::marketplace::domain::{MissionComplexity, MissionUrgency};
use serde::{Deserialize, Serialize};

/// Fixed aggregation weights for the six bid criteria.
///
/// The weights must sum to 1.0; [`ScoringConfig::validate`] enforces this as
/// an invariant rather than a convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionWeights {
    pub price: f64,
    pub quality: f64,
    pub fit: f64,
    pub delay: f64,
    pub risk: f64,
    pub completion_probability: f64,
}

impl CriterionWeights {
    pub fn sum(&self) -> f64 {
        self.price + self.quality + self.fit + self.delay + self.risk + self.completion_probability
    }
}

impl Default for CriterionWeights {
    fn default() -> Self {
        Self {
            price: 0.25,
            quality: 0.20,
            fit: 0.20,
            delay: 0.15,
            risk: 0.10,
            completion_probability: 0.10,
        }
    }
}

/// Budget-normalization multipliers per mission complexity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexityMultipliers {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl ComplexityMultipliers {
    pub fn for_complexity(&self, complexity: MissionComplexity) -> f64 {
        match complexity {
            MissionComplexity::Low => self.low,
            MissionComplexity::Medium => self.medium,
            MissionComplexity::High => self.high,
        }
    }
}

impl Default for ComplexityMultipliers {
    fn default() -> Self {
        Self {
            low: 0.8,
            medium: 1.0,
            high: 1.2,
        }
    }
}

/// Expected delivery timelines (days) per mission urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencyTimelines {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
}

impl UrgencyTimelines {
    pub fn expected_days(&self, urgency: MissionUrgency) -> u32 {
        match urgency {
            MissionUrgency::Low => self.low,
            MissionUrgency::Medium => self.medium,
            MissionUrgency::High => self.high,
        }
    }
}

impl Default for UrgencyTimelines {
    fn default() -> Self {
        Self {
            low: 30,
            medium: 14,
            high: 7,
        }
    }
}

/// Rubric configuration for bid scoring.
///
/// The defaults reproduce the thresholds the marketplace has been running
/// with; whether those were ever calibrated against outcome data is an open
/// question, so tune them only with evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: CriterionWeights,
    pub complexity_multipliers: ComplexityMultipliers,
    pub urgency_timelines: UrgencyTimelines,
    /// Adjusted price/budget ratio at or below which a bid lands in the
    /// dumping-risk price tier.
    pub dumping_tier_ceiling: f64,
    /// Adjusted ratio below which a bid is priced attractively.
    pub attractive_price_ceiling: f64,
    /// Criterion scores below this threshold carry a recommendation.
    pub recommendation_threshold: f64,
    /// Criterion scores below this threshold surface as risk factors.
    pub critical_score_threshold: f64,
    /// Bid price below this share of the budget raises a dumping risk flag.
    pub dumping_budget_ratio: f64,
    /// Providers below this completed-project count raise an inexperience flag.
    pub inexperience_floor: u32,
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > 1e-9 {
            return Err(ScoringConfigError::WeightSum { sum });
        }
        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: CriterionWeights::default(),
            complexity_multipliers: ComplexityMultipliers::default(),
            urgency_timelines: UrgencyTimelines::default(),
            dumping_tier_ceiling: 0.4,
            attractive_price_ceiling: 0.7,
            recommendation_threshold: 60.0,
            critical_score_threshold: 50.0,
            dumping_budget_ratio: 0.5,
            inexperience_floor: 3,
        }
    }
}

/// Error raised when a scoring configuration violates its invariants.
#[derive(Debug, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("criterion weights sum to {sum}, expected 1.0")]
    WeightSum { sum: f64 },
}
