mod collusion;
mod config;
mod dumping;
mod report;

pub use collusion::CollusionGroup;
pub use config::IntegrityConfig;
pub use dumping::{DumpingCase, DumpingSeverity};
pub use report::{
    AnalysisCaveat, CollusionAssessment, DumpingAssessment, IntegrityReport, RiskLevel, SkipReason,
};

use crate::marketplace::domain::Bid;

/// Stateless analyzer flagging price dumping and bid-rigging across one
/// mission's bid set.
#[derive(Debug, Clone, Default)]
pub struct IntegrityAnalyzer {
    config: IntegrityConfig,
}

impl IntegrityAnalyzer {
    pub fn new(config: IntegrityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IntegrityConfig {
        &self.config
    }

    /// Analyze a snapshot of bids against the externally supplied market
    /// reference price.
    ///
    /// Malformed bids are skipped with a caveat, never a failure: one bad
    /// bid must not abort analysis of the rest. Identical inputs produce
    /// identical reports.
    pub fn analyze(&self, bids: &[Bid], market_price: f64) -> IntegrityReport {
        let mut caveats = Vec::new();

        let valid: Vec<&Bid> = bids
            .iter()
            .filter(|bid| match validate_bid(bid) {
                Some(reason) => {
                    tracing::warn!(bid = %bid.id.0, reason = reason.label(), "skipping bid");
                    caveats.push(AnalysisCaveat::BidSkipped {
                        bid_id: bid.id.clone(),
                        reason,
                    });
                    false
                }
                None => true,
            })
            .collect();

        let dumping = dumping::detect(&valid, market_price, &self.config, &mut caveats);
        let collusion = collusion::detect(&valid, &self.config);

        report::build(dumping, collusion, caveats, &self.config)
    }
}

fn validate_bid(bid: &Bid) -> Option<SkipReason> {
    if !bid.price.is_finite() {
        Some(SkipReason::NonFinitePrice)
    } else if bid.price <= 0.0 {
        Some(SkipReason::NonPositivePrice)
    } else {
        None
    }
}
