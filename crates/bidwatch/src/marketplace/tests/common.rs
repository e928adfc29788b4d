use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::marketplace::domain::{
    Bid, BidId, Mission, MissionComplexity, MissionId, MissionUrgency, Provider, ProviderId,
};
use crate::marketplace::integrity::IntegrityAnalyzer;
use crate::marketplace::scoring::ScoringEngine;

pub(super) fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn mission() -> Mission {
    Mission {
        id: MissionId("mission-1".to_string()),
        budget: 5000.0,
        complexity: MissionComplexity::Medium,
        urgency: MissionUrgency::Medium,
        required_skills: vec!["Rust".to_string(), "Async".to_string()],
        category: "web-development".to_string(),
    }
}

pub(super) fn provider() -> Provider {
    Provider {
        id: ProviderId("provider-1".to_string()),
        rating: 4.5,
        completed_projects: 32,
        success_rate: 0.96,
        response_time_hours: 1.5,
        skills: vec![
            "rust".to_string(),
            "async runtimes".to_string(),
            "sql".to_string(),
        ],
        location: "Lyon".to_string(),
    }
}

pub(super) fn bid(id: &str, provider: &str, price: f64, minutes_after: i64) -> Bid {
    Bid {
        id: BidId(format!("bid-{id}")),
        provider_id: ProviderId(format!("provider-{provider}")),
        mission_id: MissionId("mission-1".to_string()),
        price,
        timeline_days: 12,
        submitted_at: base_time() + Duration::minutes(minutes_after),
        message: "Available to start immediately.".to_string(),
    }
}

pub(super) fn scoring_engine() -> ScoringEngine {
    ScoringEngine::default()
}

pub(super) fn analyzer() -> IntegrityAnalyzer {
    IntegrityAnalyzer::default()
}
