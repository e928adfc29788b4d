use super::common::*;
use crate::marketplace::domain::{MissionComplexity, MissionUrgency};
use crate::marketplace::scoring::Criterion;

fn criterion_score(report: &crate::marketplace::scoring::BidScoreReport, criterion: Criterion) -> f64 {
    report
        .criteria
        .iter()
        .find(|entry| entry.criterion == criterion)
        .map(|entry| entry.score)
        .unwrap_or_else(|| panic!("criterion {criterion:?} missing from report"))
}

#[test]
fn price_at_dumping_boundary_scores_twenty_five() {
    let engine = scoring_engine();
    // budget 5000, medium complexity, price 2000 -> adjusted ratio exactly 0.4
    let report = engine.score_bid(&bid("1", "1", 2000.0, 0), &mission(), &provider());

    assert_eq!(criterion_score(&report, Criterion::Price), 25.0);
}

#[test]
fn price_in_attractive_band_scores_ninety() {
    let engine = scoring_engine();
    let report = engine.score_bid(&bid("1", "1", 3000.0, 0), &mission(), &provider());

    assert_eq!(criterion_score(&report, Criterion::Price), 90.0);
}

#[test]
fn price_within_budget_scores_eighty() {
    let engine = scoring_engine();
    let report = engine.score_bid(&bid("1", "1", 4000.0, 0), &mission(), &provider());

    assert_eq!(criterion_score(&report, Criterion::Price), 80.0);
}

#[test]
fn over_budget_price_decays_linearly_with_floor() {
    let engine = scoring_engine();

    let report = engine.score_bid(&bid("1", "1", 7500.0, 0), &mission(), &provider());
    assert_eq!(criterion_score(&report, Criterion::Price), 60.0);

    let report = engine.score_bid(&bid("2", "1", 15000.0, 0), &mission(), &provider());
    assert_eq!(criterion_score(&report, Criterion::Price), 30.0);
}

#[test]
fn complexity_multiplier_normalizes_the_price_ratio() {
    let engine = scoring_engine();

    let mut high = mission();
    high.complexity = MissionComplexity::High;
    // 3000/5000 = 0.6, divided by 1.2 -> 0.5, attractive band
    let report = engine.score_bid(&bid("1", "1", 3000.0, 0), &high, &provider());
    assert_eq!(criterion_score(&report, Criterion::Price), 90.0);

    let mut low = mission();
    low.complexity = MissionComplexity::Low;
    // 0.6 / 0.8 -> 0.75, acceptable band
    let report = engine.score_bid(&bid("2", "1", 3000.0, 0), &low, &provider());
    assert_eq!(criterion_score(&report, Criterion::Price), 80.0);
}

#[test]
fn zero_budget_falls_back_to_neutral_price_score() {
    let engine = scoring_engine();
    let mut mission = mission();
    mission.budget = 0.0;

    let report = engine.score_bid(&bid("1", "1", 3000.0, 0), &mission, &provider());

    assert_eq!(criterion_score(&report, Criterion::Price), 50.0);
    let price = report
        .criteria
        .iter()
        .find(|entry| entry.criterion == Criterion::Price)
        .expect("price criterion present");
    assert!(price.recommendation.is_some());
}

#[test]
fn quality_combines_rating_experience_and_success() {
    let engine = scoring_engine();
    // 0.4*(4.5/5*100) + 25 + 0.3*96 = 36 + 25 + 28.8
    let report = engine.score_bid(&bid("1", "1", 4000.0, 0), &mission(), &provider());

    let quality = criterion_score(&report, Criterion::Quality);
    assert!((quality - 89.8).abs() < 1e-9);
}

#[test]
fn quality_experience_tiers_step_with_project_count() {
    let engine = scoring_engine();
    let mission = mission();

    let mut newcomer = provider();
    newcomer.completed_projects = 4;
    let mut junior = provider();
    junior.completed_projects = 5;
    let mut veteran = provider();
    veteran.completed_projects = 50;

    let newcomer_score =
        criterion_score(&engine.score_bid(&bid("1", "1", 4000.0, 0), &mission, &newcomer), Criterion::Quality);
    let junior_score =
        criterion_score(&engine.score_bid(&bid("2", "1", 4000.0, 0), &mission, &junior), Criterion::Quality);
    let veteran_score =
        criterion_score(&engine.score_bid(&bid("3", "1", 4000.0, 0), &mission, &veteran), Criterion::Quality);

    assert!((junior_score - newcomer_score - 10.0).abs() < 1e-9);
    assert!((veteran_score - junior_score - 10.0).abs() < 1e-9);
}

#[test]
fn fit_without_required_skills_returns_geo_baseline() {
    let engine = scoring_engine();
    let mut mission = mission();
    mission.required_skills.clear();

    let report = engine.score_bid(&bid("1", "1", 4000.0, 0), &mission, &provider());

    assert_eq!(criterion_score(&report, Criterion::Fit), 10.0);
}

#[test]
fn fit_matches_skills_case_insensitively_in_both_directions() {
    let engine = scoring_engine();
    let mut mission = mission();
    mission.required_skills = vec!["SQL".to_string()];
    let mut provider = provider();
    provider.skills = vec!["PostgreSQL".to_string()];

    let report = engine.score_bid(&bid("1", "1", 4000.0, 0), &mission, &provider);

    // required "sql" is a substring of offered "postgresql": full match, no extras
    assert_eq!(criterion_score(&report, Criterion::Fit), 80.0);
}

#[test]
fn delay_rewards_fast_timelines_and_responsiveness() {
    let engine = scoring_engine();
    // medium urgency expects 14 days; 10 <= 0.8*14, responsive provider adds 5
    let report = engine.score_bid(
        &{
            let mut bid = bid("1", "1", 4000.0, 0);
            bid.timeline_days = 10;
            bid
        },
        &mission(),
        &provider(),
    );

    assert_eq!(criterion_score(&report, Criterion::Delay), 100.0);
}

#[test]
fn delay_penalizes_slow_timelines_and_slow_responders() {
    let engine = scoring_engine();
    let mut slow = provider();
    slow.response_time_hours = 30.0;
    let mut late_bid = bid("1", "1", 4000.0, 0);
    late_bid.timeline_days = 25;

    let report = engine.score_bid(&late_bid, &mission(), &slow);

    // beyond 1.5x expected -> 40, minus 10 for responsiveness
    assert_eq!(criterion_score(&report, Criterion::Delay), 30.0);
}

#[test]
fn delay_without_timeline_uses_the_baseline() {
    let engine = scoring_engine();
    let mut undated = bid("1", "1", 4000.0, 0);
    undated.timeline_days = 0;
    let mut neutral = provider();
    neutral.response_time_hours = 12.0;

    let report = engine.score_bid(&undated, &mission(), &neutral);

    assert_eq!(criterion_score(&report, Criterion::Delay), 70.0);
}

#[test]
fn risk_accumulates_for_inexperienced_providers_on_hard_missions() {
    let engine = scoring_engine();
    let mut mission = mission();
    mission.complexity = MissionComplexity::High;
    let mut rookie = provider();
    rookie.completed_projects = 2;
    rookie.success_rate = 0.7;

    let report = engine.score_bid(&bid("1", "1", 4000.0, 0), &mission, &rookie);

    // 20 (history) + 25 (success) + 20 (complexity) -> 100 - 65
    assert_eq!(criterion_score(&report, Criterion::Risk), 35.0);
}

#[test]
fn risk_clamps_at_one_hundred_for_strong_providers() {
    let engine = scoring_engine();
    let report = engine.score_bid(&bid("1", "1", 4000.0, 0), &mission(), &provider());

    assert_eq!(criterion_score(&report, Criterion::Risk), 100.0);
}

#[test]
fn completion_probability_stays_within_its_clamp() {
    let engine = scoring_engine();
    let mut mission = mission();
    mission.complexity = MissionComplexity::High;
    let mut struggling = provider();
    struggling.success_rate = 0.1;
    struggling.completed_projects = 1;

    // dumping-priced bid on a hard mission from a struggling provider
    let report = engine.score_bid(&bid("1", "1", 1000.0, 0), &mission, &struggling);

    assert_eq!(
        criterion_score(&report, Criterion::CompletionProbability),
        10.0
    );
}

#[test]
fn completion_probability_rewards_seasoned_providers() {
    let engine = scoring_engine();
    let report = engine.score_bid(&bid("1", "1", 4000.0, 0), &mission(), &provider());

    // 0.96*70 + 15 = 82.2
    let score = criterion_score(&report, Criterion::CompletionProbability);
    assert!((score - 82.2).abs() < 1e-9);
}

#[test]
fn urgency_drives_the_expected_timeline() {
    let engine = scoring_engine();
    let mut urgent = mission();
    urgent.urgency = MissionUrgency::High;
    let mut neutral = provider();
    neutral.response_time_hours = 12.0;
    let mut offer = bid("1", "1", 4000.0, 0);
    offer.timeline_days = 9;

    // 9 days against 7 expected lands between 1x and 1.5x
    let report = engine.score_bid(&offer, &urgent, &neutral);

    assert_eq!(criterion_score(&report, Criterion::Delay), 70.0);
}
