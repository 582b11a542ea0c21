use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use tender_curation::error::AppError;
use tender_curation::workflows::evaluation::{
    BatchOptions, BudgetInput, EvaluationEngine, PrecomputedSignals, ScoredTender, TenderId,
    TenderRecord,
};

use crate::infra::build_engine;
use crate::render::render_ranking;

/// Expertise declared for the demo organization.
const DEMO_EXPERTISE: [&str; 5] = [
    "climate adaptation",
    "renewable energy",
    "water management",
    "disaster risk",
    "gender",
];

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let keywords: Vec<String> = DEMO_EXPERTISE.iter().map(|k| k.to_string()).collect();
    let engine = build_engine(None, &keywords)?;

    println!("Tender curation demo");
    println!("Expertise keywords: {}", DEMO_EXPERTISE.join(", "));
    println!();
    println!("{}", demo_report(&engine, today)?);
    Ok(())
}

pub(crate) fn demo_report(engine: &EvaluationEngine, today: NaiveDate) -> Result<String, AppError> {
    let records = sample_tenders(today);
    let signals: PrecomputedSignals = [
        (TenderId("pac-climate-001".to_string()), 0.82),
        (TenderId("afr-water-014".to_string()), 0.64),
    ]
    .into_iter()
    .collect();

    let outcome = engine.score_batch(&records, &signals, today, &BatchOptions::default())?;
    let ranked: Vec<&ScoredTender> = outcome.ranked();
    Ok(render_ranking(
        today,
        &ranked,
        &outcome.skipped,
        &outcome.tier_summary(),
    ))
}

fn sample_tenders(today: NaiveDate) -> Vec<TenderRecord> {
    let record = |id: &str, title: &str, source: &str| TenderRecord {
        id: TenderId(id.to_string()),
        title: title.to_string(),
        description: String::new(),
        source: source.to_string(),
        sectors: Vec::new(),
        location: None,
        budget: None,
        deadline: None,
        documents: Vec::new(),
    };

    vec![
        TenderRecord {
            description: "Technical assistance for climate adaptation planning, disaster risk \
                          assessment and renewable energy feasibility across outer islands."
                .to_string(),
            sectors: vec!["Climate Change".to_string(), "Capacity Building".to_string()],
            location: Some("Fiji, Vanuatu, Samoa".to_string()),
            budget: Some(BudgetInput::Text("USD 80,000 - 180,000".to_string())),
            deadline: Some(today + Duration::days(38)),
            documents: vec!["https://tenders.example.org/pac-climate-001/tor.pdf".to_string()],
            ..record(
                "pac-climate-001",
                "Pacific climate resilience technical assistance",
                "Pacific Procurement Portal",
            )
        },
        TenderRecord {
            description: "Design and supervision of rural water management systems with a \
                          gender-responsive community engagement plan."
                .to_string(),
            sectors: vec!["Infrastructure".to_string()],
            location: Some("Kenya".to_string()),
            budget: Some(BudgetInput::Range {
                min: Some(400_000.0),
                max: Some(750_000.0),
            }),
            deadline: Some(today + Duration::days(21)),
            ..record(
                "afr-water-014",
                "Rural water supply design and supervision",
                "Development Bank eProcurement",
            )
        },
        TenderRecord {
            description: "Review of public financial management policy for line ministries."
                .to_string(),
            sectors: vec!["Governance".to_string()],
            location: Some("Global".to_string()),
            budget: Some(BudgetInput::Text("EUR 1.2 million".to_string())),
            deadline: Some(today + Duration::days(60)),
            ..record(
                "glb-gov-203",
                "Public financial management policy review",
                "UN Global Marketplace",
            )
        },
        TenderRecord {
            sectors: vec!["Environmental".to_string()],
            location: Some("Tonga".to_string()),
            budget: Some(BudgetInput::Text("45k".to_string())),
            deadline: Some(today - Duration::days(3)),
            ..record(
                "pac-env-077",
                "Coastal environmental baseline survey",
                "Pacific Procurement Portal",
            )
        },
        record("misc-550", "Consultancy services", "Regional Tenders Board"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
    }

    fn engine() -> EvaluationEngine {
        let keywords: Vec<String> = DEMO_EXPERTISE.iter().map(|k| k.to_string()).collect();
        build_engine(None, &keywords).expect("engine builds")
    }

    #[test]
    fn demo_ranks_pacific_climate_work_first() {
        let report = demo_report(&engine(), today()).expect("demo scores");

        let lines: Vec<&str> = report.lines().collect();
        assert!(lines[1].contains("Pacific climate resilience technical assistance"));
        assert!(report.contains("(5 scored, 0 skipped)"));
    }

    #[test]
    fn demo_places_expired_tender_last() {
        let report = demo_report(&engine(), today()).expect("demo scores");

        let expired = report
            .find("Coastal environmental baseline survey")
            .expect("expired tender listed");
        let sparse = report.find("Consultancy services").expect("sparse tender listed");
        assert!(sparse < expired);
        assert!(report.contains("deadline expired 3 days ago"));
    }
}
