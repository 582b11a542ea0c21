use std::collections::HashMap;

use super::domain::{AiContentSignal, TenderRecord, TenderId};

/// Seam to the external text-analysis collaborator. Implementations must not
/// block on I/O per call; results are expected to be computed ahead of scoring.
/// `index` is the record's position in the batch being scored.
pub trait ContentSignalSource: Send + Sync {
    fn signal_for(&self, index: usize, record: &TenderRecord) -> AiContentSignal;
}

/// Every tender scores the neutral content-analysis value.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContentSignals;

impl ContentSignalSource for NoContentSignals {
    fn signal_for(&self, _index: usize, _record: &TenderRecord) -> AiContentSignal {
        AiContentSignal::Unavailable
    }
}

/// Signals keyed by tender id. Ids are expected to be unique within a batch;
/// use [`AlignedSignals`] when they may repeat.
#[derive(Debug, Clone, Default)]
pub struct PrecomputedSignals {
    scores: HashMap<TenderId, f64>,
}

impl PrecomputedSignals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: TenderId, score: f64) {
        self.scores.insert(id, score);
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl FromIterator<(TenderId, f64)> for PrecomputedSignals {
    fn from_iter<T: IntoIterator<Item = (TenderId, f64)>>(iter: T) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}

impl ContentSignalSource for PrecomputedSignals {
    fn signal_for(&self, _index: usize, record: &TenderRecord) -> AiContentSignal {
        AiContentSignal::from_optional(self.scores.get(&record.id).copied())
    }
}

/// Signals delivered alongside the records, one slot per input position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedSignals {
    scores: Vec<Option<f64>>,
}

impl AlignedSignals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, score: Option<f64>) {
        self.scores.push(score);
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl FromIterator<Option<f64>> for AlignedSignals {
    fn from_iter<T: IntoIterator<Item = Option<f64>>>(iter: T) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}

impl ContentSignalSource for AlignedSignals {
    fn signal_for(&self, index: usize, _record: &TenderRecord) -> AiContentSignal {
        AiContentSignal::from_optional(self.scores.get(index).copied().flatten())
    }
}
