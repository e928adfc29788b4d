use super::config::IntegrityConfig;
use super::report::{AnalysisCaveat, DumpingAssessment};
use crate::marketplace::domain::{Bid, BidId};
use serde::{Deserialize, Serialize};

/// Price ratio below which a bid's commercial viability is doubtful. This
/// floor is deliberately not configurable: it marks bids no tuning of the
/// dumping threshold should ever un-flag.
const VIABILITY_FLOOR: f64 = 0.3;

// Severity boundaries are part of the fixed classification function of the
// price ratio; only the recording threshold above them is tunable.
const SEVERE_CEILING: f64 = 0.4;
const MODERATE_CEILING: f64 = 0.5;

/// Severity tier of a single underpriced bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DumpingSeverity {
    Mild,
    Moderate,
    Severe,
}

impl DumpingSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }
}

/// One bid flagged as priced below the market reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DumpingCase {
    pub bid_id: BidId,
    pub price_ratio: f64,
    pub severity: DumpingSeverity,
    pub reasons: Vec<String>,
}

/// Severity is a function of the price ratio alone.
pub(crate) fn classify_severity(ratio: f64) -> DumpingSeverity {
    if ratio < SEVERE_CEILING {
        DumpingSeverity::Severe
    } else if ratio < MODERATE_CEILING {
        DumpingSeverity::Moderate
    } else {
        DumpingSeverity::Mild
    }
}

pub(crate) fn detect(
    bids: &[&Bid],
    market_price: f64,
    config: &IntegrityConfig,
    caveats: &mut Vec<AnalysisCaveat>,
) -> DumpingAssessment {
    if !market_price.is_finite() || market_price <= 0.0 {
        tracing::warn!(market_price, "market reference unusable, skipping dumping detection");
        caveats.push(AnalysisCaveat::MarketPriceUnavailable { market_price });
        return DumpingAssessment {
            cases: Vec::new(),
            severity: None,
        };
    }

    let mut cases = Vec::new();
    for bid in bids {
        let ratio = bid.price / market_price;
        // The viability floor applies even when the configured threshold is
        // tuned below it.
        if ratio >= config.dumping_threshold && ratio >= VIABILITY_FLOOR {
            continue;
        }

        let mut reasons = vec![format!(
            "price is {:.0}% of the market reference",
            ratio * 100.0
        )];
        if ratio < VIABILITY_FLOOR {
            reasons.push("viability doubtful at this price".to_string());
        }

        cases.push(DumpingCase {
            bid_id: bid.id.clone(),
            price_ratio: ratio,
            severity: classify_severity(ratio),
            reasons,
        });
    }

    let severity = cases.iter().map(|case| case.severity).max();

    DumpingAssessment { cases, severity }
}
