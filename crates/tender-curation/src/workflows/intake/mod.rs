//! Tender import from scraper exports (CSV or JSON).

mod parser;

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::workflows::evaluation::domain::TenderRecord;
use crate::workflows::evaluation::AlignedSignals;

/// One imported tender plus the content-analysis score delivered with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedTender {
    #[serde(flatten)]
    pub record: TenderRecord,
    #[serde(default, rename = "ai_score")]
    pub ai_content: Option<f64>,
}

/// Splits imported tenders into records and the signals aligned with them by
/// position, so repeated ids keep their own scores.
pub fn split_signals(tenders: Vec<ImportedTender>) -> (Vec<TenderRecord>, AlignedSignals) {
    let mut signals = AlignedSignals::new();
    let mut records = Vec::with_capacity(tenders.len());
    for tender in tenders {
        signals.push(tender.ai_content);
        records.push(tender.record);
    }
    (records, signals)
}

#[derive(Debug)]
pub enum TenderImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for TenderImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TenderImportError::Io(err) => write!(f, "failed to read tender export: {}", err),
            TenderImportError::Csv(err) => write!(f, "invalid tender CSV data: {}", err),
            TenderImportError::Json(err) => write!(f, "invalid tender JSON data: {}", err),
        }
    }
}

impl std::error::Error for TenderImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TenderImportError::Io(err) => Some(err),
            TenderImportError::Csv(err) => Some(err),
            TenderImportError::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for TenderImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for TenderImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for TenderImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

pub struct TenderImporter;

impl TenderImporter {
    /// Reads a CSV export, or a JSON array when the path ends in `.json`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ImportedTender>, TenderImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_reader(file)
        } else {
            Self::from_reader(file)
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ImportedTender>, TenderImportError> {
        Ok(parser::parse_rows(reader)?)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<ImportedTender>, TenderImportError> {
        Ok(serde_json::from_reader(reader)?)
    }
}
