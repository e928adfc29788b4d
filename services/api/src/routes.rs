use crate::infra::{AppState, InMemoryReportSink, InMemorySnapshotSource};
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use bidwatch::marketplace::domain::{Bid, Mission, MissionId};
use bidwatch::marketplace::router::{marketplace_router, MarketplaceEngines};
use bidwatch::marketplace::service::{
    AnalysisError, AnalysisOutcome, MissionAnalysisService, MissionSnapshot, SnapshotError,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

pub(crate) type AnalysisService = MissionAnalysisService<InMemorySnapshotSource, InMemoryReportSink>;

/// Shared handles for the stateful mission-analysis endpoints.
#[derive(Clone)]
pub(crate) struct AnalysisContext {
    pub(crate) service: Arc<AnalysisService>,
    pub(crate) source: Arc<InMemorySnapshotSource>,
    pub(crate) sink: Arc<InMemoryReportSink>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SnapshotUpsertRequest {
    pub(crate) mission: Mission,
    pub(crate) bids: Vec<Bid>,
    pub(crate) market_price: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnalysisTriggerResponse {
    pub(crate) mission_id: MissionId,
    pub(crate) outcome: &'static str,
}

pub(crate) fn with_marketplace_routes(
    engines: Arc<MarketplaceEngines>,
    context: AnalysisContext,
) -> axum::Router {
    marketplace_router(engines)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/missions/:mission_id/snapshot",
            axum::routing::put(snapshot_upsert_endpoint),
        )
        .route(
            "/api/v1/missions/:mission_id/report",
            axum::routing::get(mission_report_endpoint),
        )
        .layer(Extension(context))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Store the latest bid snapshot for a mission and recompute its report.
///
/// The recomputation is coalesced per mission: when snapshots arrive in
/// quick succession only the latest one's report is published.
pub(crate) async fn snapshot_upsert_endpoint(
    Extension(context): Extension<AnalysisContext>,
    Path(mission_id): Path<String>,
    Json(payload): Json<SnapshotUpsertRequest>,
) -> impl IntoResponse {
    let mission_id = MissionId(mission_id);
    context.source.upsert(
        mission_id.clone(),
        MissionSnapshot {
            mission: payload.mission,
            bids: payload.bids,
            market_price: payload.market_price,
        },
    );

    match context.service.trigger(&mission_id).await {
        Ok(outcome) => {
            let outcome = match outcome {
                AnalysisOutcome::Published => "published",
                AnalysisOutcome::Superseded => "superseded",
            };
            (
                StatusCode::ACCEPTED,
                Json(json!(AnalysisTriggerResponse {
                    mission_id,
                    outcome,
                })),
            )
                .into_response()
        }
        Err(AnalysisError::Snapshot(SnapshotError::MissionNotFound)) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "mission not found" })),
        )
            .into_response(),
        Err(other) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": other.to_string() })),
        )
            .into_response(),
    }
}

pub(crate) async fn mission_report_endpoint(
    Extension(context): Extension<AnalysisContext>,
    Path(mission_id): Path<String>,
) -> impl IntoResponse {
    let mission_id = MissionId(mission_id);
    match context.sink.latest(&mission_id) {
        Some(report) => (StatusCode::OK, Json(json!(report))).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "mission_id": mission_id.0,
                "error": "no report published yet",
            })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use bidwatch::marketplace::domain::{
        BidId, MissionComplexity, MissionUrgency, ProviderId,
    };
    use bidwatch::marketplace::integrity::IntegrityConfig;
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use tower::util::ServiceExt;

    fn sample_mission(id: &str) -> Mission {
        Mission {
            id: MissionId(id.to_string()),
            budget: 5000.0,
            complexity: MissionComplexity::Medium,
            urgency: MissionUrgency::Medium,
            required_skills: vec!["Rust".to_string()],
            category: "web-development".to_string(),
        }
    }

    fn sample_bid(id: &str, provider: &str, price: f64, minutes_after: i64) -> Bid {
        Bid {
            id: BidId(id.to_string()),
            provider_id: ProviderId(provider.to_string()),
            mission_id: MissionId("m-1".to_string()),
            price,
            timeline_days: 12,
            submitted_at: Utc
                .with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
                .single()
                .expect("valid timestamp")
                + Duration::minutes(minutes_after),
            message: "Bid message".to_string(),
        }
    }

    fn test_app() -> (axum::Router, AnalysisContext) {
        let source = Arc::new(InMemorySnapshotSource::default());
        let sink = Arc::new(InMemoryReportSink::default());
        let service = Arc::new(MissionAnalysisService::new(
            source.clone(),
            sink.clone(),
            IntegrityConfig::default(),
            2,
        ));
        let context = AnalysisContext {
            service,
            source,
            sink,
        };
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(
                metrics_exporter_prometheus::PrometheusBuilder::new()
                    .build_recorder()
                    .handle(),
            ),
        };
        let app = with_marketplace_routes(Arc::new(MarketplaceEngines::default()), context.clone())
            .layer(Extension(state));
        (app, context)
    }

    async fn read_json_body(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn snapshot_upsert_publishes_a_report() {
        let (app, context) = test_app();
        let payload = json!({
            "mission": sample_mission("m-1"),
            "bids": [
                sample_bid("b-1", "p-1", 4000.0, 0),
                sample_bid("b-2", "p-2", 450.0, 30),
            ],
            "market_price": 1000.0,
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/v1/missions/m-1/snapshot")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let body = read_json_body(response).await;
        assert_eq!(body["outcome"], json!("published"));

        let report = context
            .sink
            .latest(&MissionId("m-1".to_string()))
            .expect("report published");
        assert_eq!(report.dumping.cases.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn report_endpoint_returns_404_before_any_analysis() {
        let (app, _context) = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/missions/ghost/report")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn healthcheck_reports_ok() {
        let (app, _context) = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["status"], json!("ok"));
    }
}
