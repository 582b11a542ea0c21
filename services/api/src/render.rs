use chrono::NaiveDate;
use tender_curation::workflows::evaluation::{
    PriorityTier, ScoredTender, SkippedRecord, TierSummary,
};

/// Plain-text ranking for terminal output.
pub(crate) fn render_ranking(
    today: NaiveDate,
    ranked: &[&ScoredTender],
    skipped: &[SkippedRecord],
    summary: &TierSummary,
) -> String {
    let mut lines = vec![format!(
        "Tender ranking for {today} ({} scored, {} skipped)",
        summary.scored(),
        summary.skipped
    )];

    if ranked.is_empty() {
        lines.push("- No tenders met the criteria".to_string());
    }

    for (position, tender) in ranked.iter().enumerate() {
        lines.push(format!(
            "{:>2}. [{} {:.2}] {} ({}, {})",
            position + 1,
            tender.tier.label(),
            tender.composite,
            tender.title,
            tender.tender_id,
            if tender.source.is_empty() {
                "unknown source"
            } else {
                tender.source.as_str()
            }
        ));
        lines.push(format!(
            "    {} | {}",
            deadline_label(tender.deadline_days),
            tender.recommended_action()
        ));
        for line in &tender.rationale {
            lines.push(format!("    - {line}"));
        }
        let strengths = tender.strengths();
        if !strengths.is_empty() {
            lines.push(format!("    Strengths: {}", strengths.join("; ")));
        }
        let concerns = tender.concerns();
        if !concerns.is_empty() {
            lines.push(format!("    Concerns: {}", concerns.join("; ")));
        }
    }

    let tiers: Vec<String> = PriorityTier::ALL
        .iter()
        .map(|tier| format!("{} {}", tier.label(), summary.count(*tier)))
        .collect();
    lines.push(format!("Tier summary: {}", tiers.join(" | ")));

    if !skipped.is_empty() {
        lines.push("Skipped records:".to_string());
        for record in skipped {
            let id = record
                .tender_id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_else(|| "no id".to_string());
            lines.push(format!("  - row {} ({id}): {}", record.index + 1, record.reason));
        }
    }

    lines.join("\n")
}

fn deadline_label(days: Option<i64>) -> String {
    match days {
        None => "no deadline published".to_string(),
        Some(days) if days < 0 => format!("closed {} days ago", -days),
        Some(0) => "closes today".to_string(),
        Some(1) => "closes tomorrow".to_string(),
        Some(days) => format!("closes in {days} days"),
    }
}
