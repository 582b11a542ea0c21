use axum::http::StatusCode;
use axum::response::Response;
use chrono::{Duration, NaiveDate};
use serde_json::Value;

use crate::workflows::evaluation::domain::{
    BudgetInput, OrganizationProfile, TenderId, TenderRecord,
};
use crate::workflows::evaluation::{CriteriaConfig, EvaluationEngine};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

pub(super) fn days_from_today(days: i64) -> NaiveDate {
    today() + Duration::days(days)
}

pub(super) fn expertise_keywords() -> Vec<&'static str> {
    vec![
        "climate adaptation",
        "renewable energy",
        "water management",
        "disaster risk",
        "gender",
    ]
}

pub(super) fn profile() -> OrganizationProfile {
    OrganizationProfile::new(expertise_keywords())
}

pub(super) fn engine() -> EvaluationEngine {
    EvaluationEngine::new(CriteriaConfig::load_defaults(), profile()).expect("valid criteria")
}

pub(super) fn engine_with(config: CriteriaConfig) -> EvaluationEngine {
    EvaluationEngine::new(config, profile()).expect("valid criteria")
}

pub(super) fn bare_record(id: &str, title: &str) -> TenderRecord {
    TenderRecord {
        id: TenderId(id.to_string()),
        title: title.to_string(),
        description: String::new(),
        source: "pacific-portal".to_string(),
        sectors: Vec::new(),
        location: None,
        budget: None,
        deadline: None,
        documents: Vec::new(),
    }
}

/// Pacific climate work, mid budget, comfortable deadline, 2 of 5 keywords.
pub(super) fn scenario_a() -> TenderRecord {
    TenderRecord {
        description: "Technical assistance on climate adaptation planning and disaster risk \
                      reduction for coastal communities."
            .to_string(),
        sectors: vec!["Climate Change".to_string()],
        location: Some("Fiji, Vanuatu".to_string()),
        budget: Some(BudgetInput::Text("200000-500000".to_string())),
        deadline: Some(days_from_today(45)),
        documents: vec!["https://tenders.example.org/a/tor.pdf".to_string()],
        ..bare_record("tender-a", "Climate resilience advisory")
    }
}

/// Scenario A with a deadline two days in the past.
pub(super) fn scenario_b() -> TenderRecord {
    TenderRecord {
        id: TenderId("tender-b".to_string()),
        deadline: Some(days_from_today(-2)),
        ..scenario_a()
    }
}

/// Nothing but identity and a generic title.
pub(super) fn scenario_c() -> TenderRecord {
    bare_record("tender-c", "Consultancy services")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collects");
    serde_json::from_slice(&bytes).expect("json body")
}

pub(super) fn assert_ok(response: &Response) {
    assert_eq!(response.status(), StatusCode::OK);
}
