use serde::{Deserialize, Serialize};

/// Thresholds driving dumping and collusion detection.
///
/// The defaults reproduce the values the marketplace shipped with. None of
/// them carries a documented empirical derivation, so treat changes as
/// behavior changes: the classification boundaries are load-bearing for
/// report parity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegrityConfig {
    /// Price/market ratio below which a bid is recorded as a dumping case.
    pub dumping_threshold: f64,
    /// Pairwise relative price difference tolerated inside a collusion group.
    pub price_tolerance: f64,
    /// Window within which two submissions count as near-simultaneous.
    pub timing_window_minutes: i64,
    /// Groups smaller than this are discarded before pattern checks.
    pub min_group_size: usize,
    /// variance/mean^2 ceiling under which group prices count as similar.
    pub price_similarity_ceiling: f64,
    /// Share of negative successive price deltas that counts as a decline.
    pub decline_share: f64,
    /// Evidence added by the near-simultaneous submission pattern.
    pub timing_evidence: u8,
    /// Evidence added by the price-similarity pattern.
    pub similarity_evidence: u8,
    /// Evidence added by the coordinated price-decline pattern.
    pub decline_evidence: u8,
    /// Minimum evidence before a group is reported at all.
    pub report_threshold: u8,
    /// Collusion confidence above which mission risk is high.
    pub high_confidence: u8,
    /// Collusion confidence above which mission risk is at least medium.
    pub medium_confidence: u8,
}

impl Default for IntegrityConfig {
    fn default() -> Self {
        Self {
            dumping_threshold: 0.6,
            price_tolerance: 0.05,
            timing_window_minutes: 30,
            min_group_size: 3,
            price_similarity_ceiling: 0.02,
            decline_share: 0.7,
            timing_evidence: 30,
            similarity_evidence: 25,
            decline_evidence: 35,
            report_threshold: 40,
            high_confidence: 70,
            medium_confidence: 40,
        }
    }
}
