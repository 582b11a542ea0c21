//! Multi-criteria evaluation of tenders against the organization's priorities.
//!
//! Extractors in `rules` turn a record into six normalized sub-scores; `policy`
//! combines them into the 0-5 composite and priority tier. Nothing here does
//! I/O or reads the clock: the evaluation date and any content-analysis signal
//! are supplied by the caller.

mod batch;
pub mod budget;
pub mod criteria;
pub mod domain;
pub mod policy;
pub mod router;
mod rules;
mod signals;
mod tokens;

#[cfg(test)]
mod tests;

pub use batch::{BatchError, BatchOptions, BatchOutcome, CancellationToken, SkippedRecord, TierSummary};
pub use budget::{parse_budget, BudgetParse, Currency};
pub use criteria::{
    BudgetBand, CriteriaConfig, CriteriaError, CriteriaOverrides, CriterionWeights,
    DeadlinePolicy, GeoWeight, NormalizedWeights, SectorWeight,
};
pub use domain::{
    AiContentSignal, BudgetInput, Criterion, OrganizationProfile, RecordError, TenderId,
    TenderRecord,
};
pub use policy::PriorityTier;
pub use router::{tender_router, ScoreRequest, ScoreResponse};
pub use signals::{AlignedSignals, ContentSignalSource, NoContentSignals, PrecomputedSignals};

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use policy::{aggregate, CONCERN_THRESHOLD, STRENGTH_THRESHOLD};
use tokens::normalize_keyword;

/// Stateless scorer; the validated catalog is shared read-only between workers.
#[derive(Debug, Clone)]
pub struct EvaluationEngine {
    config: Arc<CriteriaConfig>,
    keywords: Arc<Vec<String>>,
}

impl EvaluationEngine {
    pub fn new(
        config: CriteriaConfig,
        profile: OrganizationProfile,
    ) -> Result<Self, CriteriaError> {
        config.validate()?;

        let mut keywords: Vec<String> = Vec::new();
        for keyword in profile.expertise_keywords.iter().map(|k| normalize_keyword(k)) {
            if !keyword.is_empty() && !keywords.contains(&keyword) {
                keywords.push(keyword);
            }
        }

        Ok(Self {
            config: Arc::new(config),
            keywords: Arc::new(keywords),
        })
    }

    pub fn config(&self) -> &CriteriaConfig {
        &self.config
    }

    pub fn expertise_keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn score(
        &self,
        record: &TenderRecord,
        signal: AiContentSignal,
        today: NaiveDate,
    ) -> Result<ScoredTender, RecordError> {
        record.check_structure()?;
        let config = self.config.as_ref();

        let sector = rules::sector_feature(record, config);
        let geography = rules::geography_feature(record, config);
        let budget = rules::budget_feature(record, config);
        let deadline = rules::deadline_feature(record, config, today);
        let experience = rules::experience_feature(record, &self.keywords, config);
        let ai_content = rules::ai_content_feature(signal, config);

        let sub_scores = SubScores {
            sector: sector.score,
            geography: geography.score,
            budget: budget.score,
            deadline: deadline.feature.score,
            experience: experience.score,
            ai_content: ai_content.score,
        };

        let notes = vec![
            (Criterion::Sector, sector.notes),
            (Criterion::Geography, geography.notes),
            (Criterion::Budget, budget.notes),
            (Criterion::Deadline, deadline.feature.notes),
            (Criterion::Experience, experience.notes),
            (Criterion::AiContent, ai_content.notes),
        ];

        let outcome = aggregate(&sub_scores, notes, deadline.expired, config);
        let rationale = outcome
            .components
            .iter()
            .map(|component| {
                if deadline.expired && component.criterion == Criterion::Deadline {
                    format!("{}; composite forced to 0", component.notes)
                } else {
                    format!(
                        "{}: {} ({:.2} pts)",
                        component.criterion.label(),
                        component.notes,
                        component.contribution
                    )
                }
            })
            .collect();

        debug!(
            tender_id = %record.id,
            composite = outcome.composite,
            tier = outcome.tier.label(),
            "tender scored"
        );

        Ok(ScoredTender {
            tender_id: record.id.clone(),
            title: record.title.trim().to_string(),
            source: record.source.clone(),
            deadline: record.deadline,
            deadline_days: deadline.days_remaining,
            sub_scores,
            composite: outcome.composite,
            tier: outcome.tier,
            components: outcome.components,
            rationale,
        })
    }
}

/// The six normalized sub-scores, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub sector: f64,
    pub geography: f64,
    pub budget: f64,
    pub deadline: f64,
    pub experience: f64,
    pub ai_content: f64,
}

impl SubScores {
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Sector => self.sector,
            Criterion::Geography => self.geography,
            Criterion::Budget => self.budget,
            Criterion::Deadline => self.deadline,
            Criterion::Experience => self.experience,
            Criterion::AiContent => self.ai_content,
        }
    }
}

/// Discrete contribution to the composite, kept for audits and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub criterion: Criterion,
    pub score: f64,
    pub weight: f64,
    /// Points on the 0-5 scale.
    pub contribution: f64,
    pub notes: String,
}

/// Evaluation result for one tender. Re-evaluation produces a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTender {
    pub tender_id: TenderId,
    pub title: String,
    pub source: String,
    pub deadline: Option<NaiveDate>,
    pub deadline_days: Option<i64>,
    pub sub_scores: SubScores,
    pub composite: f64,
    pub tier: PriorityTier,
    pub components: Vec<ScoreComponent>,
    pub rationale: Vec<String>,
}

impl ScoredTender {
    pub fn strengths(&self) -> Vec<String> {
        Criterion::ALL
            .iter()
            .filter(|criterion| self.sub_scores.get(**criterion) >= STRENGTH_THRESHOLD)
            .map(|criterion| {
                format!(
                    "Strong {} fit ({:.1}/5.0)",
                    criterion.label(),
                    self.sub_scores.get(*criterion) * criteria::MAX_CATEGORY_WEIGHT
                )
            })
            .collect()
    }

    pub fn concerns(&self) -> Vec<String> {
        Criterion::ALL
            .iter()
            .filter(|criterion| self.sub_scores.get(**criterion) <= CONCERN_THRESHOLD)
            .map(|criterion| {
                format!(
                    "Weak {} fit ({:.1}/5.0)",
                    criterion.label(),
                    self.sub_scores.get(*criterion) * criteria::MAX_CATEGORY_WEIGHT
                )
            })
            .collect()
    }

    pub fn recommended_action(&self) -> &'static str {
        self.tier.recommended_action()
    }
}
