use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryReportSink, InMemorySnapshotSource};
use crate::routes::{with_marketplace_routes, AnalysisContext};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use bidwatch::config::AppConfig;
use bidwatch::error::AppError;
use bidwatch::marketplace::integrity::IntegrityConfig;
use bidwatch::marketplace::router::MarketplaceEngines;
use bidwatch::marketplace::scoring::ScoringConfig;
use bidwatch::marketplace::service::MissionAnalysisService;
use bidwatch::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let engines = Arc::new(MarketplaceEngines::new(
        ScoringConfig::default(),
        IntegrityConfig::default(),
    )?);

    let source = Arc::new(InMemorySnapshotSource::default());
    let sink = Arc::new(InMemoryReportSink::default());
    let analysis_service = Arc::new(MissionAnalysisService::new(
        source.clone(),
        sink.clone(),
        IntegrityConfig::default(),
        config.analysis.worker_limit,
    ));
    let context = AnalysisContext {
        service: analysis_service,
        source,
        sink,
    };

    let app = with_marketplace_routes(engines, context)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "bid integrity service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
