use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{RecordError, TenderId, TenderRecord};
use super::policy::PriorityTier;
use super::signals::ContentSignalSource;
use super::{EvaluationEngine, ScoredTender};

/// Shared stop flag checked by workers before they pick up the next record.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, AtomicOrdering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(AtomicOrdering::SeqCst)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Worker threads; `0` uses one per available CPU.
    pub workers: usize,
    pub cancel: CancellationToken,
}

impl BatchOptions {
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers,
            ..Self::default()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("failed to start scoring workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Record that could not be scored, with its position in the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRecord {
    pub index: usize,
    pub tender_id: Option<TenderId>,
    pub reason: RecordError,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchOutcome {
    /// Scored tenders in input order.
    pub scored: Vec<ScoredTender>,
    pub skipped: Vec<SkippedRecord>,
    /// True when cancellation left records unscored.
    pub cancelled: bool,
}

impl BatchOutcome {
    /// Highest composite first; ties go to the earlier deadline, then the
    /// lower tender id.
    pub fn ranked(&self) -> Vec<&ScoredTender> {
        let mut ranked: Vec<&ScoredTender> = self.scored.iter().collect();
        ranked.sort_by(|left, right| rank_order(left, right));
        ranked
    }

    pub fn shortlist(&self, min_score: f64) -> Vec<&ScoredTender> {
        self.ranked()
            .into_iter()
            .filter(|tender| tender.composite >= min_score)
            .collect()
    }

    pub fn tier_summary(&self) -> TierSummary {
        let mut summary = TierSummary {
            total: self.scored.len() + self.skipped.len(),
            skipped: self.skipped.len(),
            ..TierSummary::default()
        };
        for tender in &self.scored {
            match tender.tier {
                PriorityTier::High => summary.high += 1,
                PriorityTier::Medium => summary.medium += 1,
                PriorityTier::Low => summary.low += 1,
                PriorityTier::VeryLow => summary.very_low += 1,
            }
        }
        summary
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierSummary {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub very_low: usize,
    pub skipped: usize,
}

impl TierSummary {
    pub fn count(&self, tier: PriorityTier) -> usize {
        match tier {
            PriorityTier::High => self.high,
            PriorityTier::Medium => self.medium,
            PriorityTier::Low => self.low,
            PriorityTier::VeryLow => self.very_low,
        }
    }

    pub fn scored(&self) -> usize {
        self.high + self.medium + self.low + self.very_low
    }
}

pub(crate) fn rank_order(left: &ScoredTender, right: &ScoredTender) -> Ordering {
    right
        .composite
        .total_cmp(&left.composite)
        .then_with(|| deadline_order(left.deadline, right.deadline))
        .then_with(|| left.tender_id.cmp(&right.tender_id))
}

fn deadline_order(left: Option<NaiveDate>, right: Option<NaiveDate>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

enum Slot {
    Scored(Box<ScoredTender>),
    Skipped(SkippedRecord),
    NotStarted,
}

impl EvaluationEngine {
    /// Scores every record on a dedicated worker pool. Records are
    /// independent; a structurally broken record is skipped, never fatal.
    pub fn score_batch(
        &self,
        records: &[TenderRecord],
        signals: &dyn ContentSignalSource,
        today: NaiveDate,
        options: &BatchOptions,
    ) -> Result<BatchOutcome, BatchError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.workers)
            .thread_name(|index| format!("tender-score-{index}"))
            .build()?;

        info!(
            records = records.len(),
            workers = pool.current_num_threads(),
            %today,
            "scoring tender batch"
        );

        let cancel = &options.cancel;
        let slots: Vec<Slot> = pool.install(|| {
            records
                .par_iter()
                .enumerate()
                .map(|(index, record)| {
                    if cancel.is_cancelled() {
                        return Slot::NotStarted;
                    }
                    match self.score(record, signals.signal_for(index, record), today) {
                        Ok(scored) => Slot::Scored(Box::new(scored)),
                        Err(reason) => Slot::Skipped(SkippedRecord {
                            index,
                            tender_id: (!record.id.is_blank()).then(|| record.id.clone()),
                            reason,
                        }),
                    }
                })
                .collect()
        });

        let mut outcome = BatchOutcome::default();
        for slot in slots {
            match slot {
                Slot::Scored(scored) => outcome.scored.push(*scored),
                Slot::Skipped(skipped) => {
                    warn!(
                        index = skipped.index,
                        tender_id = skipped.tender_id.as_ref().map(|id| id.0.as_str()),
                        reason = %skipped.reason,
                        "skipping tender record"
                    );
                    outcome.skipped.push(skipped);
                }
                Slot::NotStarted => outcome.cancelled = true,
            }
        }

        info!(
            scored = outcome.scored.len(),
            skipped = outcome.skipped.len(),
            cancelled = outcome.cancelled,
            "tender batch complete"
        );

        Ok(outcome)
    }
}
