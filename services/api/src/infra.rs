use bidwatch::marketplace::domain::MissionId;
use bidwatch::marketplace::integrity::IntegrityReport;
use bidwatch::marketplace::service::{
    MissionSnapshot, PublishError, ReportSink, SnapshotError, SnapshotSource,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Mission snapshots held in memory, keyed by mission. The production
/// deployment swaps this for the marketplace's bid store.
#[derive(Default)]
pub(crate) struct InMemorySnapshotSource {
    snapshots: Mutex<HashMap<MissionId, MissionSnapshot>>,
}

impl InMemorySnapshotSource {
    pub(crate) fn upsert(&self, mission_id: MissionId, snapshot: MissionSnapshot) {
        let mut guard = self.snapshots.lock().expect("snapshot mutex poisoned");
        guard.insert(mission_id, snapshot);
    }
}

impl SnapshotSource for InMemorySnapshotSource {
    fn snapshot(&self, mission_id: &MissionId) -> Result<MissionSnapshot, SnapshotError> {
        let guard = self.snapshots.lock().expect("snapshot mutex poisoned");
        guard
            .get(mission_id)
            .cloned()
            .ok_or(SnapshotError::MissionNotFound)
    }
}

/// Latest published integrity report per mission.
#[derive(Default)]
pub(crate) struct InMemoryReportSink {
    reports: Mutex<HashMap<MissionId, IntegrityReport>>,
}

impl InMemoryReportSink {
    pub(crate) fn latest(&self, mission_id: &MissionId) -> Option<IntegrityReport> {
        let guard = self.reports.lock().expect("report mutex poisoned");
        guard.get(mission_id).cloned()
    }
}

impl ReportSink for InMemoryReportSink {
    fn publish(&self, mission_id: &MissionId, report: IntegrityReport) -> Result<(), PublishError> {
        let mut guard = self.reports.lock().expect("report mutex poisoned");
        guard.insert(mission_id.clone(), report);
        Ok(())
    }
}
