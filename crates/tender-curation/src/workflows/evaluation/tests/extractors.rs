use super::common::*;
use crate::workflows::evaluation::domain::{AiContentSignal, BudgetInput};
use crate::workflows::evaluation::rules::{
    ai_content_feature, budget_feature, deadline_feature, experience_feature, geography_feature,
    sector_feature,
};
use crate::workflows::evaluation::{CriteriaConfig, CriteriaOverrides};

fn approx(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-9
}

fn normalized_keywords() -> Vec<String> {
    engine().expertise_keywords().to_vec()
}

#[test]
fn sector_takes_the_highest_matching_weight() {
    let config = CriteriaConfig::load_defaults();
    let mut record = bare_record("s-1", "Programme support");
    record.sectors = vec!["Governance".to_string(), "Climate-Change".to_string()];

    let feature = sector_feature(&record, &config);

    assert!(approx(feature.score, 1.0));
    assert!(feature.notes.contains("climate change"));
}

#[test]
fn sector_falls_back_to_title_keywords() {
    let config = CriteriaConfig::load_defaults();
    let record = bare_record("s-2", "Rural infrastructure upgrade");

    let feature = sector_feature(&record, &config);

    assert!(approx(feature.score, 4.2 / 5.0));
}

#[test]
fn unmatched_sector_scores_the_unclassified_weight() {
    let config = CriteriaConfig::load_defaults();
    let feature = sector_feature(&scenario_c(), &config);

    assert!(approx(feature.score, config.unclassified_weight / 5.0));
    assert!(feature.notes.starts_with("no priority sector"));
}

#[test]
fn geography_uses_first_match_in_priority_order() {
    let config = CriteriaConfig::load_defaults();
    let mut record = scenario_c();

    record.location = Some("Fiji".to_string());
    assert!(approx(geography_feature(&record, &config).score, 1.0));

    record.location = Some("Asia Pacific".to_string());
    let feature = geography_feature(&record, &config);
    assert!(approx(feature.score, 1.0));
    assert!(feature.notes.contains("'pacific'"));

    record.location = Some("South-East Asia".to_string());
    assert!(approx(geography_feature(&record, &config).score, 0.8));
}

#[test]
fn geography_handles_missing_and_unmatched_locations() {
    let config = CriteriaConfig::load_defaults();
    let mut record = scenario_c();
    assert!(approx(geography_feature(&record, &config).score, 0.5));

    record.location = Some("   ".to_string());
    assert!(approx(geography_feature(&record, &config).score, 0.5));

    record.location = Some("Norway".to_string());
    assert!(approx(geography_feature(&record, &config).score, 0.4));
}

#[test]
fn geography_discounts_regions_found_only_in_description() {
    let config = CriteriaConfig::load_defaults();
    let mut record = scenario_c();
    record.location = Some("Regional".to_string());
    record.description = "Field missions to Samoa and Tonga".to_string();

    let feature = geography_feature(&record, &config);

    assert!(approx(feature.score, 0.8));
    assert!(feature.notes.contains("description"));
}

#[test]
fn budget_scores_band_weight_with_range_bonus() {
    let config = CriteriaConfig::load_defaults();
    let mut record = scenario_c();

    record.budget = Some(BudgetInput::Text("200000-500000".to_string()));
    assert!(approx(budget_feature(&record, &config).score, 2.2 / 5.0));

    record.budget = Some(BudgetInput::Text("50,000 - 150,000".to_string()));
    let capped = budget_feature(&record, &config);
    assert!(approx(capped.score, 1.0));

    record.budget = Some(BudgetInput::Range {
        min: Some(10_000.0),
        max: Some(20_000.0),
    });
    assert!(approx(budget_feature(&record, &config).score, 3.3 / 5.0));
}

#[test]
fn budget_without_bonus_for_open_ended_amounts() {
    let config = CriteriaConfig::load_defaults();
    let mut record = scenario_c();
    record.budget = Some(BudgetInput::Text("$2,000,000+".to_string()));

    let feature = budget_feature(&record, &config);

    assert!(approx(feature.score, 1.5 / 5.0));
    assert!(!feature.notes.contains("published range"));
}

#[test]
fn unreadable_budget_scores_the_unknown_weight() {
    let config = CriteriaConfig::load_defaults();
    let mut record = scenario_c();
    assert!(approx(budget_feature(&record, &config).score, 0.5));

    record.budget = Some(BudgetInput::Text("to be announced".to_string()));
    let feature = budget_feature(&record, &config);
    assert!(approx(feature.score, 0.5));
    assert!(feature.notes.contains("unreadable"));
}

#[test]
fn deadline_penalises_short_windows_linearly() {
    let config = CriteriaConfig::load_defaults();
    let mut record = scenario_c();

    record.deadline = Some(days_from_today(45));
    let comfortable = deadline_feature(&record, &config, today());
    assert!(approx(comfortable.feature.score, 1.0));
    assert_eq!(comfortable.days_remaining, Some(45));

    record.deadline = Some(days_from_today(30));
    assert!(approx(deadline_feature(&record, &config, today()).feature.score, 1.0));

    record.deadline = Some(days_from_today(15));
    let rushed = deadline_feature(&record, &config, today());
    assert!(approx(rushed.feature.score, 0.5));
    assert!(!rushed.expired);
}

#[test]
fn deadline_today_or_past_is_expired() {
    let config = CriteriaConfig::load_defaults();
    let mut record = scenario_c();

    record.deadline = Some(today());
    let closing = deadline_feature(&record, &config, today());
    assert!(closing.expired);
    assert_eq!(closing.feature.score, 0.0);

    record.deadline = Some(days_from_today(-3));
    let past = deadline_feature(&record, &config, today());
    assert!(past.expired);
    assert_eq!(past.days_remaining, Some(-3));
    assert!(past.feature.notes.starts_with("deadline expired 3 days ago"));
}

#[test]
fn deadline_expiry_window_is_configurable() {
    let config = CriteriaConfig::load_defaults()
        .merge(CriteriaOverrides {
            deadline_expiry_days: Some(3),
            ..CriteriaOverrides::default()
        })
        .expect("valid overrides");
    let mut record = scenario_c();
    record.deadline = Some(days_from_today(2));

    let feature = deadline_feature(&record, &config, today());

    assert!(feature.expired);
    assert!(feature.feature.notes.starts_with("deadline expired"));
}

#[test]
fn zero_expiry_window_keeps_same_day_deadlines_open() {
    let config = CriteriaConfig::load_defaults()
        .merge(CriteriaOverrides {
            deadline_expiry_days: Some(0),
            ..CriteriaOverrides::default()
        })
        .expect("valid overrides");
    let mut record = scenario_a();
    record.deadline = Some(today());

    let feature = deadline_feature(&record, &config, today());
    assert!(!feature.expired);
    assert_eq!(feature.days_remaining, Some(0));
    assert_eq!(feature.feature.score, 0.0);

    let scored = engine_with(config)
        .score(&record, AiContentSignal::Unavailable, today())
        .expect("valid record");
    assert!(scored.composite > 0.0);
    assert!(!scored.rationale[0].starts_with("deadline expired"));
}

#[test]
fn missing_deadline_is_neutral_not_expired() {
    let config = CriteriaConfig::load_defaults();
    let feature = deadline_feature(&scenario_c(), &config, today());

    assert!(!feature.expired);
    assert_eq!(feature.days_remaining, None);
    assert!(approx(feature.feature.score, 0.5));
}

#[test]
fn experience_scales_keyword_ratio_and_caps_at_ceiling() {
    let config = CriteriaConfig::load_defaults();
    let keywords = normalized_keywords();

    let partial = experience_feature(&scenario_a(), &keywords, &config);
    assert!(approx(partial.score, 0.4 * 1.25));
    assert!(partial.notes.contains("climate adaptation"));

    let mut record = scenario_c();
    record.description = "Gender-responsive water management, renewable energy pilots, \
                          climate adaptation and disaster risk mapping"
        .to_string();
    assert!(approx(experience_feature(&record, &keywords, &config).score, 1.0));

    record.description = "Office furniture supply".to_string();
    assert_eq!(experience_feature(&record, &keywords, &config).score, 0.0);
}

#[test]
fn experience_is_neutral_without_keywords_or_description() {
    let config = CriteriaConfig::load_defaults();

    let no_keywords = experience_feature(&scenario_a(), &[], &config);
    assert!(approx(no_keywords.score, 0.5));

    let no_description = experience_feature(&scenario_c(), &normalized_keywords(), &config);
    assert!(approx(no_description.score, 0.5));
}

#[test]
fn ai_content_uses_signal_or_neutral() {
    let config = CriteriaConfig::load_defaults();

    assert!(approx(
        ai_content_feature(AiContentSignal::Available(0.9), &config).score,
        0.9
    ));
    assert!(approx(
        ai_content_feature(AiContentSignal::Unavailable, &config).score,
        0.5
    ));
    assert!(approx(
        ai_content_feature(AiContentSignal::Available(3.0), &config).score,
        0.5
    ));
}
