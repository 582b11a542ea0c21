use serde::{Deserialize, Serialize};

use super::criteria::{CriteriaConfig, MAX_CATEGORY_WEIGHT};
use super::domain::Criterion;
use super::{ScoreComponent, SubScores};

/// Display bands only; never fed back into scoring.
pub const HIGH_PRIORITY_THRESHOLD: f64 = 4.0;
pub const MEDIUM_PRIORITY_THRESHOLD: f64 = 3.0;
pub const LOW_PRIORITY_THRESHOLD: f64 = 2.0;

/// Sub-scores at or above this are reported as strengths.
pub const STRENGTH_THRESHOLD: f64 = 0.8;
/// Sub-scores at or below this are reported as concerns.
pub const CONCERN_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    VeryLow,
    Low,
    Medium,
    High,
}

impl PriorityTier {
    pub const ALL: [PriorityTier; 4] = [
        PriorityTier::High,
        PriorityTier::Medium,
        PriorityTier::Low,
        PriorityTier::VeryLow,
    ];

    pub fn classify(composite: f64) -> Self {
        if composite >= HIGH_PRIORITY_THRESHOLD {
            PriorityTier::High
        } else if composite >= MEDIUM_PRIORITY_THRESHOLD {
            PriorityTier::Medium
        } else if composite >= LOW_PRIORITY_THRESHOLD {
            PriorityTier::Low
        } else {
            PriorityTier::VeryLow
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriorityTier::High => "High",
            PriorityTier::Medium => "Medium",
            PriorityTier::Low => "Low",
            PriorityTier::VeryLow => "Very Low",
        }
    }

    pub fn recommended_action(&self) -> &'static str {
        match self {
            PriorityTier::High => "Highly recommended for immediate consideration",
            PriorityTier::Medium => "Recommended for review and consideration",
            PriorityTier::Low => "Consider if resources available",
            PriorityTier::VeryLow => "Not recommended unless specific interest",
        }
    }
}

pub(crate) struct Aggregate {
    pub composite: f64,
    pub tier: PriorityTier,
    pub components: Vec<ScoreComponent>,
}

/// Weighted average on the 0-5 scale, with the expired-deadline floor and
/// components ordered by contribution.
pub(crate) fn aggregate(
    sub_scores: &SubScores,
    notes: Vec<(Criterion, String)>,
    expired: bool,
    config: &CriteriaConfig,
) -> Aggregate {
    let weights = config.normalized_weights();

    let mut components: Vec<ScoreComponent> = notes
        .into_iter()
        .map(|(criterion, notes)| {
            let score = sub_scores.get(criterion);
            let weight = weights.get(criterion);
            ScoreComponent {
                criterion,
                score,
                weight,
                contribution: round2(weight * score * MAX_CATEGORY_WEIGHT),
                notes,
            }
        })
        .collect();

    let weighted: f64 = Criterion::ALL
        .iter()
        .map(|criterion| weights.get(*criterion) * sub_scores.get(*criterion))
        .sum();

    let composite = if expired {
        0.0
    } else {
        round2((weighted * MAX_CATEGORY_WEIGHT).clamp(0.0, MAX_CATEGORY_WEIGHT))
    };

    components.sort_by(|left, right| {
        let pinned = |component: &ScoreComponent| {
            expired && component.criterion == Criterion::Deadline
        };
        pinned(right)
            .cmp(&pinned(left))
            .then_with(|| right.contribution.total_cmp(&left.contribution))
            .then_with(|| left.criterion.cmp(&right.criterion))
    });

    Aggregate {
        composite,
        tier: PriorityTier::classify(composite),
        components,
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
