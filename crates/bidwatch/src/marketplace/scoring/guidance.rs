use super::config::ScoringConfig;
use crate::marketplace::domain::{Mission, MissionUrgency};
use serde::{Deserialize, Serialize};

/// Deterministic price guidance for a provider drafting a bid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidGuidance {
    pub suggested_price: f64,
    pub nudges: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anti_dumping_warning: Option<String>,
}

/// Suggest a competitive price given the prices already bid on the mission.
///
/// The suggestion never drops below the dumping floor derived from the
/// mission budget, and the nudges are a fixed catalogue keyed off the
/// mission state so that two calls with the same inputs render identically.
pub(crate) fn suggest_bid(
    mission: &Mission,
    current_prices: &[f64],
    config: &ScoringConfig,
) -> BidGuidance {
    if mission.budget <= 0.0 {
        return BidGuidance {
            suggested_price: 0.0,
            nudges: vec!["Mission budget unavailable; price from the scope instead.".to_string()],
            anti_dumping_warning: None,
        };
    }

    let average_bid = if current_prices.is_empty() {
        mission.budget
    } else {
        current_prices.iter().sum::<f64>() / current_prices.len() as f64
    };

    let floor = mission.budget * config.dumping_tier_ceiling;
    let competitive = (average_bid * 0.95).min(mission.budget * 0.9);
    let suggested_price = competitive.max(floor);

    let mut nudges = Vec::new();
    if suggested_price < mission.budget * config.dumping_budget_ratio {
        nudges.push("Aggressive price point; be sure quality holds at this level.".to_string());
    }
    if current_prices.len() > 5 {
        nudges.push("Crowded mission; differentiate on quality rather than price.".to_string());
    }
    if mission.urgency == MissionUrgency::High {
        nudges.push("Urgent mission; emphasize immediate availability.".to_string());
    }

    let anti_dumping_warning = (suggested_price <= floor)
        .then(|| "A lower price would risk being flagged as dumping.".to_string());

    BidGuidance {
        suggested_price,
        nudges,
        anti_dumping_warning,
    }
}
