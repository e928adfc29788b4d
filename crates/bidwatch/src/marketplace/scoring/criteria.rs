use super::config::ScoringConfig;
use super::report::{Criterion, CriterionScore};
use crate::marketplace::domain::{Bid, Mission, MissionComplexity, Provider};

/// Score a bid against all six criteria, in fixed report order.
pub(crate) fn score_criteria(
    bid: &Bid,
    mission: &Mission,
    provider: &Provider,
    config: &ScoringConfig,
) -> Vec<CriterionScore> {
    vec![
        price_score(bid, mission, config),
        quality_score(provider, config),
        fit_score(mission, provider, config),
        delay_score(bid, mission, provider, config),
        risk_score(mission, provider, config),
        completion_probability_score(bid, mission, provider, config),
    ]
}

/// Price attractiveness relative to the complexity-adjusted budget.
///
/// Moderate undercutting is rewarded while both extreme undercutting and
/// overruns are penalized; the asymmetry is a deliberate market-shaping
/// choice, not an artifact.
fn price_score(bid: &Bid, mission: &Mission, config: &ScoringConfig) -> CriterionScore {
    let weight = config.weights.price;

    if mission.budget <= 0.0 {
        return CriterionScore {
            criterion: Criterion::Price,
            score: 50.0,
            weight,
            explanation: "mission budget unavailable".to_string(),
            factors: vec!["price could not be compared to a budget".to_string()],
            recommendation: Some("Confirm the mission budget before comparing bids.".to_string()),
        };
    }

    let multiplier = config.complexity_multipliers.for_complexity(mission.complexity);
    let ratio = (bid.price / mission.budget) / multiplier;

    let (score, explanation) = if ratio <= config.dumping_tier_ceiling {
        (
            25.0,
            "price far below budget carries dumping risk".to_string(),
        )
    } else if ratio < config.attractive_price_ceiling {
        (90.0, "attractive price for the mission budget".to_string())
    } else if ratio <= 1.0 {
        (80.0, "price within the mission budget".to_string())
    } else {
        let decayed = (80.0 - (ratio - 1.0) * 40.0).max(30.0);
        (decayed, "price exceeds the mission budget".to_string())
    };

    let factors = vec![
        format!("adjusted price/budget ratio {:.2}", ratio),
        format!(
            "complexity multiplier {:.1} ({})",
            multiplier,
            mission.complexity.label()
        ),
    ];

    CriterionScore {
        criterion: Criterion::Price,
        score,
        weight,
        explanation,
        factors,
        recommendation: recommend_below_threshold(
            score,
            config,
            "Request a detailed cost breakdown before shortlisting.",
        ),
    }
}

/// Track-record quality from rating, experience tier, and success rate.
fn quality_score(provider: &Provider, config: &ScoringConfig) -> CriterionScore {
    let rating_points = 0.4 * (provider.rating / 5.0 * 100.0);
    // The tier values are already on the 100-point scale, i.e. pre-weighted.
    let experience_points = match provider.completed_projects {
        projects if projects >= 50 => 30.0,
        projects if projects >= 20 => 25.0,
        projects if projects >= 5 => 20.0,
        _ => 10.0,
    };
    let success_points = 0.3 * (provider.success_rate * 100.0);
    let score = rating_points + experience_points + success_points;

    let explanation = if score >= 80.0 {
        "excellent track record".to_string()
    } else if score >= 60.0 {
        "solid track record".to_string()
    } else {
        "limited track record".to_string()
    };

    CriterionScore {
        criterion: Criterion::Quality,
        score,
        weight: config.weights.quality,
        explanation,
        factors: vec![
            format!("rating {:.1}/5", provider.rating),
            format!("{} completed projects", provider.completed_projects),
            format!("success rate {:.0}%", provider.success_rate * 100.0),
        ],
        recommendation: recommend_below_threshold(
            score,
            config,
            "Check references before engaging.",
        ),
    }
}

/// Skill coverage of the mission requirements plus a flat geo baseline.
fn fit_score(mission: &Mission, provider: &Provider, config: &ScoringConfig) -> CriterionScore {
    let weight = config.weights.fit;
    let geo_baseline = 0.1;

    if mission.required_skills.is_empty() {
        return CriterionScore {
            criterion: Criterion::Fit,
            score: geo_baseline * 100.0,
            weight,
            explanation: "no required skills listed".to_string(),
            factors: vec!["geo baseline only".to_string()],
            recommendation: Some("Clarify the mission's required skills.".to_string()),
        };
    }

    let matched = mission
        .required_skills
        .iter()
        .filter(|required| {
            provider
                .skills
                .iter()
                .any(|skill| skills_match(required, skill))
        })
        .count();
    let extra = provider.skills.len().saturating_sub(matched);

    let match_share = matched as f64 / mission.required_skills.len() as f64;
    let extra_bonus = (0.2 * extra as f64).min(0.2);
    let score = (0.7 * match_share + extra_bonus + geo_baseline) * 100.0;

    let explanation = if score >= 80.0 {
        "strong skill coverage".to_string()
    } else if score >= 60.0 {
        "adequate skill coverage".to_string()
    } else {
        "weak skill coverage".to_string()
    };

    CriterionScore {
        criterion: Criterion::Fit,
        score,
        weight,
        explanation,
        factors: vec![
            format!(
                "{matched}/{} required skills matched",
                mission.required_skills.len()
            ),
            format!("{extra} additional skills"),
        ],
        recommendation: recommend_below_threshold(
            score,
            config,
            "Verify the missing skills in an interview.",
        ),
    }
}

fn skills_match(required: &str, offered: &str) -> bool {
    let required = required.to_lowercase();
    let offered = offered.to_lowercase();
    required.contains(&offered) || offered.contains(&required)
}

/// Timeline realism against the urgency-implied deadline, adjusted for
/// provider responsiveness.
fn delay_score(
    bid: &Bid,
    mission: &Mission,
    provider: &Provider,
    config: &ScoringConfig,
) -> CriterionScore {
    let expected = config.urgency_timelines.expected_days(mission.urgency) as f64;
    let timeline = bid.timeline_days as f64;

    let base: f64 = if bid.timeline_days == 0 {
        70.0
    } else if timeline <= 0.8 * expected {
        95.0
    } else if timeline <= expected {
        85.0
    } else if timeline <= 1.5 * expected {
        70.0
    } else {
        40.0
    };

    let adjustment = if provider.response_time_hours <= 2.0 {
        5.0
    } else if provider.response_time_hours > 24.0 {
        -10.0
    } else {
        0.0
    };

    let score = (base + adjustment).clamp(0.0, 100.0);

    let explanation = if score >= 85.0 {
        "timeline comfortably meets the deadline".to_string()
    } else if score >= 70.0 {
        "timeline fits the deadline".to_string()
    } else {
        "timeline is at risk".to_string()
    };

    CriterionScore {
        criterion: Criterion::Delay,
        score,
        weight: config.weights.delay,
        explanation,
        factors: vec![
            format!(
                "{} days offered against {expected:.0} expected ({} urgency)",
                bid.timeline_days,
                mission.urgency.label()
            ),
            format!("responds within {:.1}h", provider.response_time_hours),
        ],
        recommendation: recommend_below_threshold(
            score,
            config,
            "Agree on milestones before award.",
        ),
    }
}

/// Delivery risk, inverted so that higher is safer.
fn risk_score(mission: &Mission, provider: &Provider, config: &ScoringConfig) -> CriterionScore {
    let mut risk_level: f64 = 0.0;
    let mut factors = Vec::new();

    if provider.completed_projects < 5 {
        risk_level += 20.0;
        factors.push("thin delivery history".to_string());
    } else if provider.completed_projects >= 20 {
        risk_level -= 10.0;
        factors.push("extensive delivery history".to_string());
    }

    if provider.success_rate < 0.8 {
        risk_level += 25.0;
        factors.push("below-par success rate".to_string());
    } else if provider.success_rate >= 0.95 {
        risk_level -= 15.0;
        factors.push("outstanding success rate".to_string());
    }

    if mission.complexity == MissionComplexity::High && provider.completed_projects < 10 {
        risk_level += 20.0;
        factors.push("high complexity with limited experience".to_string());
    }

    if factors.is_empty() {
        factors.push("no notable risk drivers".to_string());
    }

    let score = (100.0 - risk_level).clamp(0.0, 100.0);

    let explanation = if score >= 80.0 {
        "low risk".to_string()
    } else if score >= 60.0 {
        "moderate risk".to_string()
    } else {
        "high risk".to_string()
    };

    CriterionScore {
        criterion: Criterion::Risk,
        score,
        weight: config.weights.risk,
        explanation,
        factors,
        recommendation: recommend_below_threshold(
            score,
            config,
            "Consider staged payments to contain risk.",
        ),
    }
}

/// Likelihood the provider completes the mission at the offered price.
fn completion_probability_score(
    bid: &Bid,
    mission: &Mission,
    provider: &Provider,
    config: &ScoringConfig,
) -> CriterionScore {
    let mut score = provider.success_rate * 70.0;
    let mut factors = vec![format!(
        "success rate {:.0}%",
        provider.success_rate * 100.0
    )];

    if mission.budget > 0.0 {
        let price_ratio = bid.price / mission.budget;
        if price_ratio < 0.6 {
            score -= 20.0;
            factors.push("price leaves little margin to finish".to_string());
        } else if price_ratio > 1.2 {
            score -= 10.0;
            factors.push("price well above budget".to_string());
        }
    }

    if provider.completed_projects >= 20 {
        score += 15.0;
        factors.push("seasoned provider".to_string());
    }

    if mission.complexity == MissionComplexity::High {
        score -= 10.0;
        factors.push("high mission complexity".to_string());
    }

    let score = score.clamp(10.0, 95.0);

    let explanation = if score >= 80.0 {
        "very likely to complete".to_string()
    } else if score >= 60.0 {
        "likely to complete".to_string()
    } else {
        "completion uncertain".to_string()
    };

    CriterionScore {
        criterion: Criterion::CompletionProbability,
        score,
        weight: config.weights.completion_probability,
        explanation,
        factors,
        recommendation: recommend_below_threshold(
            score,
            config,
            "Split the mission into smaller deliverables.",
        ),
    }
}

fn recommend_below_threshold(
    score: f64,
    config: &ScoringConfig,
    recommendation: &str,
) -> Option<String> {
    (score < config.recommendation_threshold).then(|| recommendation.to_string())
}
