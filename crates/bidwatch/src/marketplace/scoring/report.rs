use super::config::ScoringConfig;
use crate::marketplace::domain::{Bid, BidId, Mission, Provider};
use serde::{Deserialize, Serialize};

/// The six independent dimensions scored per bid before aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Price,
    Quality,
    Fit,
    Delay,
    Risk,
    CompletionProbability,
}

impl Criterion {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Price => "Price",
            Self::Quality => "Quality",
            Self::Fit => "Fit",
            Self::Delay => "Delay",
            Self::Risk => "Risk",
            Self::CompletionProbability => "Completion probability",
        }
    }
}

/// Discrete contribution to a bid score, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub criterion: Criterion,
    pub score: f64,
    pub weight: f64,
    pub explanation: String,
    pub factors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

/// Aggregated scoring output for one bid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidScoreReport {
    pub bid_id: BidId,
    pub final_score: u8,
    pub confidence: u8,
    pub criteria: Vec<CriterionScore>,
    pub risk_factors: Vec<String>,
}

pub(crate) fn aggregate(
    bid: &Bid,
    mission: &Mission,
    provider: &Provider,
    criteria: Vec<CriterionScore>,
    config: &ScoringConfig,
) -> BidScoreReport {
    let weighted_sum: f64 = criteria
        .iter()
        .map(|criterion| criterion.score * criterion.weight)
        .sum();
    let final_score = finite(weighted_sum, "weighted bid total").round() as u8;

    BidScoreReport {
        bid_id: bid.id.clone(),
        final_score,
        confidence: confidence(provider, &criteria),
        risk_factors: risk_factors(bid, mission, provider, &criteria, config),
        criteria,
    }
}

/// Confidence in the final score, driven by how much history backs the
/// provider and how much the sub-scores agree with each other.
fn confidence(provider: &Provider, criteria: &[CriterionScore]) -> u8 {
    let mut confidence: f64 = 75.0;

    if provider.completed_projects >= 20 {
        confidence += 15.0;
    } else if provider.completed_projects < 5 {
        confidence -= 10.0;
    }

    if provider.rating >= 4.5 {
        confidence += 10.0;
    } else if provider.rating < 3.5 {
        confidence -= 15.0;
    }

    let scores: Vec<f64> = criteria.iter().map(|criterion| criterion.score).collect();
    if population_variance(&scores) < 200.0 {
        confidence += 5.0;
    }

    finite(confidence, "confidence").clamp(50.0, 95.0) as u8
}

fn risk_factors(
    bid: &Bid,
    mission: &Mission,
    provider: &Provider,
    criteria: &[CriterionScore],
    config: &ScoringConfig,
) -> Vec<String> {
    let mut flags = Vec::new();

    for criterion in criteria {
        if criterion.score < config.critical_score_threshold {
            flags.push(format!(
                "{}: critical score ({}%)",
                criterion.criterion.label(),
                criterion.score.round() as i64
            ));
        }
    }

    if mission.budget > 0.0 && bid.price < config.dumping_budget_ratio * mission.budget {
        flags.push(format!(
            "Price: below {:.0}% of the mission budget (possible dumping)",
            config.dumping_budget_ratio * 100.0
        ));
    }

    if provider.completed_projects < config.inexperience_floor {
        flags.push(format!(
            "Provider: fewer than {} completed projects",
            config.inexperience_floor
        ));
    }

    flags
}

fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / values.len() as f64
}

// NaN or infinity reaching a report is a programming error, not input noise;
// surface it in debug builds instead of clamping it away.
fn finite(value: f64, context: &str) -> f64 {
    debug_assert!(value.is_finite(), "non-finite value in {context}");
    value
}
