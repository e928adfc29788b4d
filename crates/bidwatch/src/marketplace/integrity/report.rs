use super::collusion::CollusionGroup;
use super::config::IntegrityConfig;
use super::dumping::{DumpingCase, DumpingSeverity};
use crate::marketplace::domain::BidId;
use serde::{Deserialize, Serialize};

/// Dumping findings for one mission's bid set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DumpingAssessment {
    pub cases: Vec<DumpingCase>,
    /// Worst severity present, `None` when no bid was flagged.
    pub severity: Option<DumpingSeverity>,
}

/// Collusion findings for one mission's bid set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollusionAssessment {
    pub groups: Vec<CollusionGroup>,
    /// Maximum evidence score among reported groups, 0 when none.
    pub confidence: u8,
}

/// Mission-level risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Why a bid was left out of the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NonFinitePrice,
    NonPositivePrice,
}

impl SkipReason {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NonFinitePrice => "non-finite price",
            Self::NonPositivePrice => "non-positive price",
        }
    }
}

/// Typed partial-analysis notes so dashboards always have something to
/// render instead of an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AnalysisCaveat {
    MarketPriceUnavailable { market_price: f64 },
    BidSkipped { bid_id: BidId, reason: SkipReason },
}

/// Top-level integrity verdict for one mission's bid set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub dumping: DumpingAssessment,
    pub collusion: CollusionAssessment,
    pub overall_risk: RiskLevel,
    pub recommendations: Vec<String>,
    pub caveats: Vec<AnalysisCaveat>,
}

pub(crate) fn build(
    dumping: DumpingAssessment,
    collusion: CollusionAssessment,
    caveats: Vec<AnalysisCaveat>,
    config: &IntegrityConfig,
) -> IntegrityReport {
    let overall_risk = overall_risk(&dumping, &collusion, config);
    let recommendations = recommendations(&dumping, &collusion, config);

    IntegrityReport {
        dumping,
        collusion,
        overall_risk,
        recommendations,
        caveats,
    }
}

fn overall_risk(
    dumping: &DumpingAssessment,
    collusion: &CollusionAssessment,
    config: &IntegrityConfig,
) -> RiskLevel {
    if dumping.severity == Some(DumpingSeverity::Severe) || collusion.confidence > config.high_confidence {
        RiskLevel::High
    } else if dumping.severity == Some(DumpingSeverity::Moderate)
        || collusion.confidence > config.medium_confidence
    {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

// Recommendations are a fixed catalogue keyed by which detector fired, in a
// stable order, never free text.
fn recommendations(
    dumping: &DumpingAssessment,
    collusion: &CollusionAssessment,
    config: &IntegrityConfig,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if !dumping.cases.is_empty() {
        recommendations.push(
            "Require a cost justification from providers bidding below the market reference."
                .to_string(),
        );
        if dumping.severity == Some(DumpingSeverity::Severe) {
            recommendations
                .push("Hold the award until flagged bids pass a manual review.".to_string());
        }
    }

    if !collusion.groups.is_empty() {
        recommendations
            .push("Investigate relationships between providers in the flagged groups.".to_string());
        if collusion.confidence > config.high_confidence {
            recommendations
                .push("Extend the bidding window to attract independent offers.".to_string());
        }
    }

    if recommendations.is_empty() {
        recommendations.push("No action required; continue routine monitoring.".to_string());
    }

    recommendations
}
