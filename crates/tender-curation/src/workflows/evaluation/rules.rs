use chrono::NaiveDate;

use super::budget::{resolve_budget, BudgetParse};
use super::criteria::{CriteriaConfig, MAX_CATEGORY_WEIGHT};
use super::domain::{AiContentSignal, TenderRecord};
use super::tokens::{keyword_matches, token_set};

/// Normalized per-criterion sub-score with the reason it was given.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Feature {
    pub score: f64,
    pub notes: String,
}

impl Feature {
    fn new(score: f64, notes: String) -> Self {
        Self {
            score: score.clamp(0.0, 1.0),
            notes,
        }
    }
}

pub(crate) struct DeadlineFeature {
    pub feature: Feature,
    pub days_remaining: Option<i64>,
    pub expired: bool,
}

pub(crate) fn sector_feature(record: &TenderRecord, config: &CriteriaConfig) -> Feature {
    let tokens = token_set(
        record
            .sectors
            .iter()
            .map(String::as_str)
            .chain([record.title.as_str(), record.description.as_str()]),
    );

    let mut best: Option<(&str, f64)> = None;
    for entry in &config.sector_weights {
        if !keyword_matches(&entry.keyword, &tokens) {
            continue;
        }
        if best.map_or(true, |(_, weight)| entry.weight > weight) {
            best = Some((entry.keyword.as_str(), entry.weight));
        }
    }

    match best {
        Some((keyword, weight)) => Feature::new(
            weight / MAX_CATEGORY_WEIGHT,
            format!("priority sector '{keyword}' (weight {weight:.1}/5)"),
        ),
        None => Feature::new(
            config.unclassified_weight / MAX_CATEGORY_WEIGHT,
            format!(
                "no priority sector identified (unclassified weight {:.1}/5)",
                config.unclassified_weight
            ),
        ),
    }
}

pub(crate) fn geography_feature(record: &TenderRecord, config: &CriteriaConfig) -> Feature {
    let location = record
        .location
        .as_deref()
        .map(str::trim)
        .filter(|location| !location.is_empty());

    let Some(location) = location else {
        return Feature::new(
            config.unspecified_multiplier,
            format!(
                "location not specified (multiplier {:.2})",
                config.unspecified_multiplier
            ),
        );
    };

    let location_tokens = token_set([location]);
    if let Some(entry) = config
        .geo_weights
        .iter()
        .find(|entry| keyword_matches(&entry.keyword, &location_tokens))
    {
        return Feature::new(
            entry.multiplier,
            format!(
                "location '{location}' matches region '{}' (multiplier {:.2})",
                entry.keyword, entry.multiplier
            ),
        );
    }

    let description_tokens = token_set([record.description.as_str()]);
    if let Some(entry) = config
        .geo_weights
        .iter()
        .find(|entry| keyword_matches(&entry.keyword, &description_tokens))
    {
        let multiplier = entry.multiplier * config.description_match_factor;
        return Feature::new(
            multiplier,
            format!(
                "region '{}' mentioned only in the description (multiplier {:.2})",
                entry.keyword, multiplier
            ),
        );
    }

    Feature::new(
        config.unmatched_multiplier,
        format!(
            "location '{location}' outside preferred regions (multiplier {:.2})",
            config.unmatched_multiplier
        ),
    )
}

pub(crate) fn budget_feature(record: &TenderRecord, config: &CriteriaConfig) -> Feature {
    let parsed = resolve_budget(record.budget.as_ref());
    let band = parsed
        .representative_amount()
        .and_then(|amount| config.budget_band_for(amount));

    match (parsed, band) {
        (
            BudgetParse::Range { min, max, currency },
            Some(band),
        ) => {
            let published = match (min, max) {
                (Some(min), Some(max)) => format!("{min:.0}-{max:.0}"),
                (Some(min), None) => format!("{min:.0}+"),
                (None, Some(max)) => format!("up to {max:.0}"),
                (None, None) => String::new(),
            };
            let mut weight = band.weight;
            let mut notes = format!(
                "budget {published} {} in band {} (weight {:.1}/5",
                currency.code(),
                band.label(),
                band.weight
            );
            if parsed.is_well_defined() && config.range_bonus > 1.0 {
                weight = (weight * config.range_bonus).min(MAX_CATEGORY_WEIGHT);
                notes.push_str(&format!(", x{:.2} for a published range", config.range_bonus));
            }
            notes.push(')');
            Feature::new(weight / MAX_CATEGORY_WEIGHT, notes)
        }
        (BudgetParse::Range { .. }, None) => Feature::new(
            config.unknown_budget_weight / MAX_CATEGORY_WEIGHT,
            format!(
                "budget outside configured bands (unknown weight {:.1}/5)",
                config.unknown_budget_weight
            ),
        ),
        (BudgetParse::Unknown, _) => Feature::new(
            config.unknown_budget_weight / MAX_CATEGORY_WEIGHT,
            format!(
                "budget not published or unreadable (unknown weight {:.1}/5)",
                config.unknown_budget_weight
            ),
        ),
    }
}

pub(crate) fn deadline_feature(
    record: &TenderRecord,
    config: &CriteriaConfig,
    today: NaiveDate,
) -> DeadlineFeature {
    let policy = &config.deadline;
    let Some(deadline) = record.deadline else {
        return DeadlineFeature {
            feature: Feature::new(
                policy.neutral,
                format!("no deadline published (neutral {:.2})", policy.neutral),
            ),
            days_remaining: None,
            expired: false,
        };
    };

    let days = deadline.signed_duration_since(today).num_days();
    let penalty_days = i64::from(policy.penalty_days);

    let (score, notes, expired) = if days < 0 {
        let ago = -days;
        let unit = if ago == 1 { "day" } else { "days" };
        (0.0, format!("deadline expired {ago} {unit} ago ({deadline})"), true)
    } else if days < i64::from(policy.expiry_days) {
        (
            0.0,
            format!(
                "deadline expired: closes in {days} days, inside the {}-day response window",
                policy.expiry_days
            ),
            true,
        )
    } else if days < penalty_days {
        let score = days as f64 / penalty_days as f64;
        (
            score,
            format!("closes in {days} days, under the {penalty_days}-day preparation window"),
            false,
        )
    } else {
        (1.0, format!("closes in {days} days"), false)
    };

    DeadlineFeature {
        feature: Feature::new(score, notes),
        days_remaining: Some(days),
        expired,
    }
}

/// `keywords` must already be normalized.
pub(crate) fn experience_feature(
    record: &TenderRecord,
    keywords: &[String],
    config: &CriteriaConfig,
) -> Feature {
    if keywords.is_empty() {
        return Feature::new(
            config.neutral_experience,
            format!(
                "no expertise keywords declared (neutral {:.2})",
                config.neutral_experience
            ),
        );
    }
    if record.description.trim().is_empty() {
        return Feature::new(
            config.neutral_experience,
            format!(
                "no description to compare against expertise (neutral {:.2})",
                config.neutral_experience
            ),
        );
    }

    let tokens = token_set([record.description.as_str()]);
    let matched: Vec<&str> = keywords
        .iter()
        .filter(|keyword| keyword_matches(keyword, &tokens))
        .map(String::as_str)
        .collect();

    let ratio = matched.len() as f64 / keywords.len() as f64;
    let score = (ratio * config.experience_multiplier).min(config.experience_ceiling);
    let notes = if matched.is_empty() {
        format!("none of {} expertise keywords mentioned", keywords.len())
    } else {
        format!(
            "matched {} of {} expertise keywords ({})",
            matched.len(),
            keywords.len(),
            matched.join(", ")
        )
    };

    Feature::new(score, notes)
}

pub(crate) fn ai_content_feature(signal: AiContentSignal, config: &CriteriaConfig) -> Feature {
    match signal.value() {
        Some(value) => Feature::new(value, format!("content analysis fit {value:.2}")),
        None => Feature::new(
            config.neutral_ai_content,
            format!(
                "content analysis unavailable (neutral {:.2})",
                config.neutral_ai_content
            ),
        ),
    }
}
