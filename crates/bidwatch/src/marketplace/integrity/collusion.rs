use super::config::IntegrityConfig;
use super::report::CollusionAssessment;
use crate::marketplace::domain::{Bid, MissionId, ProviderId};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A set of providers whose bids show coordinated price/timing behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollusionGroup {
    pub provider_ids: BTreeSet<ProviderId>,
    pub evidence_score: u8,
    pub patterns: Vec<String>,
    pub mission_ids: BTreeSet<MissionId>,
}

pub(crate) fn detect(bids: &[&Bid], config: &IntegrityConfig) -> CollusionAssessment {
    let mut groups = Vec::new();

    for group in form_groups(bids, config) {
        let (evidence_score, patterns) = score_group(&group, config);
        if evidence_score < config.report_threshold {
            continue;
        }

        groups.push(CollusionGroup {
            provider_ids: group.iter().map(|bid| bid.provider_id.clone()).collect(),
            evidence_score,
            patterns,
            mission_ids: group.iter().map(|bid| bid.mission_id.clone()).collect(),
        });
    }

    let confidence = groups
        .iter()
        .map(|group| group.evidence_score)
        .max()
        .unwrap_or(0);

    CollusionAssessment { groups, confidence }
}

/// First-match greedy grouping by price proximity.
///
/// Each bid joins at most one group, and a candidate joins only when it is
/// within tolerance of every member already in the group. This is not an
/// optimal clustering: earlier bids anchor groups and later near-misses fall
/// through. The bias is intentional and kept stable because reports are
/// compared across recomputations.
fn form_groups<'a>(bids: &[&'a Bid], config: &IntegrityConfig) -> Vec<Vec<&'a Bid>> {
    let mut assigned = vec![false; bids.len()];
    let mut groups = Vec::new();

    for anchor in 0..bids.len() {
        if assigned[anchor] {
            continue;
        }

        let mut group = vec![bids[anchor]];
        assigned[anchor] = true;

        for candidate in anchor + 1..bids.len() {
            if assigned[candidate] {
                continue;
            }
            let close_to_all = group.iter().all(|member| {
                relative_difference(member.price, bids[candidate].price) <= config.price_tolerance
            });
            if close_to_all {
                group.push(bids[candidate]);
                assigned[candidate] = true;
            }
        }

        if group.len() >= config.min_group_size {
            groups.push(group);
        }
    }

    groups
}

fn relative_difference(a: f64, b: f64) -> f64 {
    let scale = a.max(b);
    if scale <= 0.0 {
        return 0.0;
    }
    (a - b).abs() / scale
}

fn score_group(group: &[&Bid], config: &IntegrityConfig) -> (u8, Vec<String>) {
    let mut evidence: u8 = 0;
    let mut patterns = Vec::new();

    if near_simultaneous_count(group, config) >= 2 {
        evidence += config.timing_evidence;
        patterns.push("near-simultaneous bids".to_string());
    }

    let prices: Vec<f64> = group.iter().map(|bid| bid.price).collect();
    if price_similarity(&prices) < config.price_similarity_ceiling {
        evidence += config.similarity_evidence;
        patterns.push("suspiciously similar prices".to_string());
    }

    if declining_share(group) >= config.decline_share {
        evidence += config.decline_evidence;
        patterns.push("coordinated price decline".to_string());
    }

    (evidence, patterns)
}

/// Number of bids with at least one other group member submitted within the
/// timing window.
fn near_simultaneous_count(group: &[&Bid], config: &IntegrityConfig) -> usize {
    let window = Duration::minutes(config.timing_window_minutes);
    group
        .iter()
        .filter(|bid| {
            group.iter().any(|other| {
                other.id != bid.id
                    && (other.submitted_at - bid.submitted_at).abs() <= window
            })
        })
        .count()
}

/// Squared coefficient of variation: population variance over mean squared.
fn price_similarity(prices: &[f64]) -> f64 {
    let mean = prices.iter().sum::<f64>() / prices.len() as f64;
    if mean <= 0.0 {
        return f64::INFINITY;
    }
    let variance = prices
        .iter()
        .map(|price| (price - mean).powi(2))
        .sum::<f64>()
        / prices.len() as f64;
    variance / (mean * mean)
}

/// Share of successive price deltas that are negative, in submission order.
fn declining_share(group: &[&Bid]) -> f64 {
    let mut ordered: Vec<&Bid> = group.to_vec();
    ordered.sort_by_key(|bid| bid.submitted_at);

    let deltas = ordered.len() - 1;
    if deltas == 0 {
        return 0.0;
    }

    let negative = ordered
        .windows(2)
        .filter(|pair| pair[1].price < pair[0].price)
        .count();

    negative as f64 / deltas as f64
}
