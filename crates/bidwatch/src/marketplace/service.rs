use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::domain::{Bid, Mission, MissionId};
use super::integrity::{IntegrityAnalyzer, IntegrityConfig, IntegrityReport};
use tokio::sync::Semaphore;

/// Immutable per-mission input snapshot for one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionSnapshot {
    pub mission: Mission,
    pub bids: Vec<Bid>,
    /// Market reference price supplied by the pricing collaborator; this
    /// engine never computes it.
    pub market_price: f64,
}

/// Snapshot abstraction so the service can be exercised without a store.
pub trait SnapshotSource: Send + Sync {
    fn snapshot(&self, mission_id: &MissionId) -> Result<MissionSnapshot, SnapshotError>;
}

/// Error enumeration for snapshot fetch failures.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("mission not found")]
    MissionNotFound,
    #[error("snapshot store unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing where finished integrity reports are delivered.
pub trait ReportSink: Send + Sync {
    fn publish(&self, mission_id: &MissionId, report: IntegrityReport) -> Result<(), PublishError>;
}

/// Report delivery error.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("report sink unavailable: {0}")]
    Unavailable(String),
}

/// Error raised by the analysis service.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Publish(#[from] PublishError),
    #[error("analysis worker failed: {0}")]
    Worker(String),
}

/// How a triggered recomputation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// The run completed against the latest snapshot and was published.
    Published,
    /// A newer trigger superseded this run; nothing was published.
    Superseded,
}

/// Per-mission single-flight coordinator for integrity recomputations.
///
/// Triggers for the same mission are coalesced through an epoch counter:
/// every trigger bumps the mission's epoch, and a finished run publishes
/// only if its epoch is still current, so overlapping recomputations never
/// interleave their output and the last snapshot wins. Runs across
/// different missions proceed in parallel, bounded by the worker pool so a
/// bid-submission burst cannot starve the serving path.
pub struct MissionAnalysisService<S, P> {
    source: Arc<S>,
    sink: Arc<P>,
    analyzer: Arc<IntegrityAnalyzer>,
    epochs: Mutex<HashMap<MissionId, u64>>,
    permits: Arc<Semaphore>,
}

impl<S, P> MissionAnalysisService<S, P>
where
    S: SnapshotSource + 'static,
    P: ReportSink + 'static,
{
    pub fn new(source: Arc<S>, sink: Arc<P>, config: IntegrityConfig, worker_limit: usize) -> Self {
        Self {
            source,
            sink,
            analyzer: Arc::new(IntegrityAnalyzer::new(config)),
            epochs: Mutex::new(HashMap::new()),
            permits: Arc::new(Semaphore::new(worker_limit.max(1))),
        }
    }

    /// Recompute the mission's integrity report from the current snapshot.
    ///
    /// Safe to call concurrently; a run that is superseded mid-flight is
    /// abandoned without publishing (there is no partial-result contract).
    pub async fn trigger(&self, mission_id: &MissionId) -> Result<AnalysisOutcome, AnalysisError> {
        let epoch = self.begin(mission_id);

        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|err| AnalysisError::Worker(err.to_string()))?;

        if self.superseded(mission_id, epoch) {
            tracing::debug!(mission = %mission_id.0, epoch, "analysis superseded before start");
            return Ok(AnalysisOutcome::Superseded);
        }

        let snapshot = self.source.snapshot(mission_id)?;

        let analyzer = Arc::clone(&self.analyzer);
        let report = tokio::task::spawn_blocking(move || {
            analyzer.analyze(&snapshot.bids, snapshot.market_price)
        })
        .await
        .map_err(|err| AnalysisError::Worker(err.to_string()))?;

        if self.superseded(mission_id, epoch) {
            tracing::debug!(mission = %mission_id.0, epoch, "analysis superseded mid-run, abandoned");
            return Ok(AnalysisOutcome::Superseded);
        }

        self.sink.publish(mission_id, report)?;
        Ok(AnalysisOutcome::Published)
    }

    fn begin(&self, mission_id: &MissionId) -> u64 {
        let mut epochs = self.epochs.lock().expect("epoch map poisoned");
        let entry = epochs.entry(mission_id.clone()).or_insert(0);
        *entry += 1;
        *entry
    }

    fn superseded(&self, mission_id: &MissionId, epoch: u64) -> bool {
        let epochs = self.epochs.lock().expect("epoch map poisoned");
        epochs.get(mission_id).copied() != Some(epoch)
    }
}
