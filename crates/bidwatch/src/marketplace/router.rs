use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;

use super::domain::{Bid, Mission, Provider};
use super::integrity::{IntegrityAnalyzer, IntegrityConfig};
use super::scoring::{ScoringConfig, ScoringConfigError, ScoringEngine};

/// The two stateless engines behind the marketplace endpoints.
pub struct MarketplaceEngines {
    pub scoring: ScoringEngine,
    pub integrity: IntegrityAnalyzer,
}

impl MarketplaceEngines {
    pub fn new(
        scoring: ScoringConfig,
        integrity: IntegrityConfig,
    ) -> Result<Self, ScoringConfigError> {
        Ok(Self {
            scoring: ScoringEngine::new(scoring)?,
            integrity: IntegrityAnalyzer::new(integrity),
        })
    }
}

impl Default for MarketplaceEngines {
    fn default() -> Self {
        Self {
            scoring: ScoringEngine::default(),
            integrity: IntegrityAnalyzer::default(),
        }
    }
}

/// Request payload for scoring a single bid.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreBidRequest {
    pub bid: Bid,
    pub mission: Mission,
    pub provider: Provider,
}

/// Request payload for bid price guidance.
#[derive(Debug, Clone, Deserialize)]
pub struct GuidanceRequest {
    pub mission: Mission,
    #[serde(default)]
    pub current_prices: Vec<f64>,
}

/// Request payload for a mission integrity analysis.
#[derive(Debug, Clone, Deserialize)]
pub struct IntegrityRequest {
    pub bids: Vec<Bid>,
    pub market_price: f64,
}

/// Router builder exposing the scoring and integrity endpoints.
pub fn marketplace_router(engines: Arc<MarketplaceEngines>) -> Router {
    Router::new()
        .route("/api/v1/bids/score", post(score_handler))
        .route("/api/v1/bids/guidance", post(guidance_handler))
        .route("/api/v1/missions/integrity", post(integrity_handler))
        .with_state(engines)
}

pub(crate) async fn score_handler(
    State(engines): State<Arc<MarketplaceEngines>>,
    axum::Json(request): axum::Json<ScoreBidRequest>,
) -> Response {
    let report = engines
        .scoring
        .score_bid(&request.bid, &request.mission, &request.provider);
    (StatusCode::OK, axum::Json(report)).into_response()
}

pub(crate) async fn guidance_handler(
    State(engines): State<Arc<MarketplaceEngines>>,
    axum::Json(request): axum::Json<GuidanceRequest>,
) -> Response {
    let guidance = engines
        .scoring
        .suggest_bid(&request.mission, &request.current_prices);
    (StatusCode::OK, axum::Json(guidance)).into_response()
}

pub(crate) async fn integrity_handler(
    State(engines): State<Arc<MarketplaceEngines>>,
    axum::Json(request): axum::Json<IntegrityRequest>,
) -> Response {
    let report = engines
        .integrity
        .analyze(&request.bids, request.market_price);
    (StatusCode::OK, axum::Json(report)).into_response()
}
