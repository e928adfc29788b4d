use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for a submitted bid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BidId(pub String);

/// Identifier wrapper for a provider account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProviderId(pub String);

/// Identifier wrapper for a posted mission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MissionId(pub String);

/// Technical complexity band declared on the mission brief.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionComplexity {
    Low,
    Medium,
    High,
}

impl MissionComplexity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Urgency band declared on the mission brief.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionUrgency {
    Low,
    Medium,
    High,
}

impl MissionUrgency {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// A provider's offer on a mission. Immutable once scored; a revision is a
/// new bid with its own identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub id: BidId,
    pub provider_id: ProviderId,
    pub mission_id: MissionId,
    pub price: f64,
    pub timeline_days: u32,
    pub submitted_at: DateTime<Utc>,
    pub message: String,
}

/// Marketplace profile snapshot for the provider behind a bid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: ProviderId,
    /// Aggregate review rating on a 0-5 scale.
    pub rating: f64,
    pub completed_projects: u32,
    /// Share of past missions delivered successfully, 0-1.
    pub success_rate: f64,
    pub response_time_hours: f64,
    pub skills: Vec<String>,
    pub location: String,
}

/// The posted mission a bid competes for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub budget: f64,
    pub complexity: MissionComplexity,
    pub urgency: MissionUrgency,
    pub required_skills: Vec<String>,
    pub category: String,
}
