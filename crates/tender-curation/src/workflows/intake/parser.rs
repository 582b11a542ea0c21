use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use tracing::debug;

use crate::workflows::evaluation::domain::{BudgetInput, TenderId, TenderRecord};

use super::ImportedTender;

const LIST_SEPARATOR: char = ';';

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<ImportedTender>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut tenders = Vec::new();

    for row in csv_reader.deserialize::<TenderRow>() {
        tenders.push(row?.into_imported());
    }

    Ok(tenders)
}

#[derive(Debug, Deserialize)]
struct TenderRow {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    source: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    sectors: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    budget: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    deadline: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    documents: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    ai_score: Option<String>,
}

impl TenderRow {
    fn into_imported(self) -> ImportedTender {
        let deadline = self.deadline.as_deref().and_then(|raw| {
            let parsed = parse_deadline(raw);
            if parsed.is_none() {
                debug!(tender_id = %self.id, deadline = raw, "unreadable deadline treated as missing");
            }
            parsed
        });

        let ai_content = self.ai_score.as_deref().and_then(|raw| {
            let parsed = raw.parse::<f64>().ok();
            if parsed.is_none() {
                debug!(tender_id = %self.id, ai_score = raw, "unreadable content score ignored");
            }
            parsed
        });

        ImportedTender {
            record: TenderRecord {
                id: TenderId(self.id),
                title: self.title,
                description: self.description,
                source: self.source,
                sectors: split_list(self.sectors.as_deref()),
                location: self.location,
                budget: self.budget.map(BudgetInput::Text),
                deadline,
                documents: split_list(self.documents.as_deref()),
            },
            ai_content,
        }
    }
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|raw| {
            raw.split(LIST_SEPARATOR)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (date part, UTC).
pub(crate) fn parse_deadline(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.naive_utc().date())
}
