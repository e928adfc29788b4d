//! Bid scoring and market-abuse detection for competitive missions.
//!
//! Everything under this module is a pure function of an immutable snapshot
//! of bids, missions, and provider records: the scoring engine produces a
//! per-bid [`scoring::BidScoreReport`], the integrity analyzer produces a
//! per-mission [`integrity::IntegrityReport`], and the analysis service in
//! [`service`] schedules recomputations without ever sharing mutable state
//! with the engines themselves.

pub mod domain;
pub mod integrity;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Bid, BidId, Mission, MissionComplexity, MissionId, MissionUrgency, Provider, ProviderId,
};
pub use integrity::{
    AnalysisCaveat, CollusionGroup, DumpingCase, DumpingSeverity, IntegrityAnalyzer,
    IntegrityConfig, IntegrityReport, RiskLevel,
};
pub use router::{
    marketplace_router, GuidanceRequest, IntegrityRequest, MarketplaceEngines, ScoreBidRequest,
};
pub use scoring::{
    BidGuidance, BidScoreReport, Criterion, CriterionScore, ScoringConfig, ScoringConfigError,
    ScoringEngine,
};
pub use service::{
    AnalysisError, AnalysisOutcome, MissionAnalysisService, MissionSnapshot, PublishError,
    ReportSink, SnapshotError, SnapshotSource,
};
