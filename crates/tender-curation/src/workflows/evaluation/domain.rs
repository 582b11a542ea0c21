use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Stable identifier assigned to a tender by the upstream scraper.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenderId(pub String);

impl TenderId {
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for TenderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalized tender as produced by the scraping collaborators. A null or
/// missing id or title reads as blank and is rejected per record by
/// `check_structure`, never by the decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenderRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: TenderId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sectors: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub budget: Option<BudgetInput>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub documents: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Budget as published: either the raw text scraped from the listing or a
/// range that an upstream parser already resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BudgetInput {
    Text(String),
    Range {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
}

/// Criteria contributing to the composite, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Sector,
    Geography,
    Budget,
    Deadline,
    Experience,
    AiContent,
}

impl Criterion {
    pub const ALL: [Criterion; 6] = [
        Criterion::Sector,
        Criterion::Geography,
        Criterion::Budget,
        Criterion::Deadline,
        Criterion::Experience,
        Criterion::AiContent,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Criterion::Sector => "Sector",
            Criterion::Geography => "Geography",
            Criterion::Budget => "Budget",
            Criterion::Deadline => "Deadline",
            Criterion::Experience => "Experience",
            Criterion::AiContent => "AI content",
        }
    }
}

/// Output of the external text-analysis collaborator for one tender.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiContentSignal {
    Available(f64),
    Unavailable,
}

impl AiContentSignal {
    /// Treats out-of-contract values as missing instead of trusting them.
    pub fn from_optional(value: Option<f64>) -> Self {
        match value {
            Some(score) if score.is_finite() && (0.0..=1.0).contains(&score) => {
                Self::Available(score)
            }
            _ => Self::Unavailable,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Available(score) if score.is_finite() && (0.0..=1.0).contains(score) => {
                Some(*score)
            }
            _ => None,
        }
    }
}

/// Expertise the organization declares; matched against tender descriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationProfile {
    #[serde(default)]
    pub expertise_keywords: Vec<String>,
}

impl OrganizationProfile {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            expertise_keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

/// Structural problems that prevent a single record from being scored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordError {
    #[error("tender has no identifier")]
    MissingIdentity,
    #[error("tender {id} has no title")]
    MissingTitle { id: TenderId },
}

impl TenderRecord {
    pub(crate) fn check_structure(&self) -> Result<(), RecordError> {
        if self.id.is_blank() {
            return Err(RecordError::MissingIdentity);
        }
        if self.title.trim().is_empty() {
            return Err(RecordError::MissingTitle {
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}
