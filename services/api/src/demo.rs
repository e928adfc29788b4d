use bidwatch::error::AppError;
use bidwatch::marketplace::domain::{
    Bid, BidId, Mission, MissionComplexity, MissionId, MissionUrgency, Provider, ProviderId,
};
use bidwatch::marketplace::integrity::{IntegrityAnalyzer, IntegrityReport};
use bidwatch::marketplace::scoring::ScoringEngine;
use chrono::{Duration, TimeZone, Utc};
use clap::Args;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Market reference price used for the integrity analysis
    #[arg(long, default_value_t = 2500.0)]
    pub(crate) market_price: f64,
}

#[derive(Args, Debug)]
pub(crate) struct IntegrityReportArgs {
    /// Path to a JSON export containing the mission's bids
    #[arg(long)]
    pub(crate) bids_json: PathBuf,
    /// Market reference price for the mission's category
    #[arg(long)]
    pub(crate) market_price: f64,
}

pub(crate) fn run_integrity_report(args: IntegrityReportArgs) -> Result<(), AppError> {
    let file = File::open(&args.bids_json)?;
    let bids: Vec<Bid> = serde_json::from_reader(BufReader::new(file))?;

    let analyzer = IntegrityAnalyzer::default();
    let report = analyzer.analyze(&bids, args.market_price);

    println!(
        "Integrity report for {} bid(s), market reference {:.2}",
        bids.len(),
        args.market_price
    );
    render_integrity_report(&report);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let mission = demo_mission();
    let entries = demo_bids();

    println!("Bid scoring demo");
    println!(
        "Mission {} | budget {:.0} | complexity {} | urgency {}",
        mission.id.0,
        mission.budget,
        mission.complexity.label(),
        mission.urgency.label()
    );

    let engine = ScoringEngine::default();
    println!("\nScored bids");
    for (bid, provider) in &entries {
        let report = engine.score_bid(bid, &mission, provider);
        println!(
            "- {} by {} at {:.0}: score {}/100, confidence {}%",
            bid.id.0, provider.id.0, bid.price, report.final_score, report.confidence
        );
        for criterion in &report.criteria {
            println!(
                "    {} {:.0} ({})",
                criterion.criterion.label(),
                criterion.score,
                criterion.explanation
            );
        }
        if report.risk_factors.is_empty() {
            println!("    risk factors: none");
        } else {
            for flag in &report.risk_factors {
                println!("    risk factor: {flag}");
            }
        }
    }

    let bids: Vec<Bid> = entries.iter().map(|(bid, _)| bid.clone()).collect();
    let analyzer = IntegrityAnalyzer::default();
    let report = analyzer.analyze(&bids, args.market_price);

    println!(
        "\nIntegrity analysis (market reference {:.0})",
        args.market_price
    );
    render_integrity_report(&report);
    Ok(())
}

fn render_integrity_report(report: &IntegrityReport) {
    println!("Overall risk: {}", report.overall_risk.label());

    if report.dumping.cases.is_empty() {
        println!("Dumping: none detected");
    } else {
        println!(
            "Dumping: {} case(s), worst severity {}",
            report.dumping.cases.len(),
            report
                .dumping
                .severity
                .map(|severity| severity.label())
                .unwrap_or("none")
        );
        for case in &report.dumping.cases {
            println!(
                "- {} at {:.0}% of market: {}",
                case.bid_id.0,
                case.price_ratio * 100.0,
                case.reasons.join("; ")
            );
        }
    }

    if report.collusion.groups.is_empty() {
        println!("Collusion: no suspicious groups");
    } else {
        println!(
            "Collusion: {} group(s), confidence {}",
            report.collusion.groups.len(),
            report.collusion.confidence
        );
        for group in &report.collusion.groups {
            let providers: Vec<&str> = group
                .provider_ids
                .iter()
                .map(|provider| provider.0.as_str())
                .collect();
            println!(
                "- providers [{}], evidence {}: {}",
                providers.join(", "),
                group.evidence_score,
                group.patterns.join("; ")
            );
        }
    }

    println!("Recommendations");
    for recommendation in &report.recommendations {
        println!("- {recommendation}");
    }

    if !report.caveats.is_empty() {
        println!("Caveats");
        for caveat in &report.caveats {
            println!("- {caveat:?}");
        }
    }
}

fn demo_mission() -> Mission {
    Mission {
        id: MissionId("mission-demo".to_string()),
        budget: 5000.0,
        complexity: MissionComplexity::Medium,
        urgency: MissionUrgency::Medium,
        required_skills: vec![
            "Rust".to_string(),
            "PostgreSQL".to_string(),
            "REST APIs".to_string(),
        ],
        category: "web-development".to_string(),
    }
}

fn demo_bids() -> Vec<(Bid, Provider)> {
    let base = Utc
        .with_ymd_and_hms(2025, 6, 2, 9, 0, 0)
        .single()
        .expect("valid timestamp");

    let bid = |id: &str, provider: &str, price: f64, minutes: i64, timeline: u32| Bid {
        id: BidId(id.to_string()),
        provider_id: ProviderId(provider.to_string()),
        mission_id: MissionId("mission-demo".to_string()),
        price,
        timeline_days: timeline,
        submitted_at: base + Duration::minutes(minutes),
        message: "See attached proposal.".to_string(),
    };

    let provider = |id: &str, rating: f64, completed: u32, success: f64, response: f64| Provider {
        id: ProviderId(id.to_string()),
        rating,
        completed_projects: completed,
        success_rate: success,
        response_time_hours: response,
        skills: vec![
            "rust".to_string(),
            "postgresql".to_string(),
            "rest apis".to_string(),
        ],
        location: "Bordeaux".to_string(),
    };

    vec![
        (
            bid("bid-steady", "provider-steady", 4200.0, 0, 12),
            provider("provider-steady", 4.7, 41, 0.97, 1.0),
        ),
        (
            bid("bid-budget", "provider-budget", 3400.0, 25, 14),
            provider("provider-budget", 4.1, 12, 0.88, 6.0),
        ),
        (
            bid("bid-dumper", "provider-dumper", 900.0, 40, 10),
            provider("provider-dumper", 3.2, 2, 0.7, 30.0),
        ),
        (
            bid("bid-ring-a", "provider-ring-a", 1500.0, 60, 15),
            provider("provider-ring-a", 3.9, 9, 0.85, 5.0),
        ),
        (
            bid("bid-ring-b", "provider-ring-b", 1515.0, 66, 15),
            provider("provider-ring-b", 3.8, 7, 0.84, 5.5),
        ),
        (
            bid("bid-ring-c", "provider-ring-c", 1490.0, 71, 15),
            provider("provider-ring-c", 4.0, 11, 0.86, 4.0),
        ),
    ]
}
