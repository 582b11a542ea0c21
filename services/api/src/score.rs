use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use tender_curation::config::{split_keywords, AppConfig};
use tender_curation::error::AppError;
use tender_curation::telemetry;
use tender_curation::workflows::evaluation::{
    BatchOptions, EvaluationEngine, ScoreResponse, ScoredTender,
};
use tender_curation::workflows::intake::{split_signals, ImportedTender, TenderImporter};

use crate::infra::build_engine;
use crate::render::render_ranking;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Tender export to score (.csv, or .json for a JSON array)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// JSON criteria overrides (defaults to TENDER_CRITERIA_PATH)
    #[arg(long)]
    pub(crate) criteria: Option<PathBuf>,
    /// Comma-separated expertise keywords (defaults to TENDER_EXPERTISE_KEYWORDS)
    #[arg(long)]
    pub(crate) keywords: Option<String>,
    /// Only list tenders scoring at least this much
    #[arg(long)]
    pub(crate) min_score: Option<f64>,
    /// Worker threads (defaults to TENDER_SCORING_WORKERS; 0 = one per CPU)
    #[arg(long)]
    pub(crate) workers: Option<usize>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let criteria_path = args.criteria.clone().or(config.scoring.criteria_path.clone());
    let keywords = args
        .keywords
        .as_deref()
        .map(split_keywords)
        .unwrap_or_else(|| config.scoring.expertise_keywords.clone());
    let engine = build_engine(criteria_path.as_deref(), &keywords)?;

    let tenders = TenderImporter::from_path(&args.input)?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let workers = args.workers.unwrap_or(config.scoring.workers);

    let output = score_tenders(&engine, tenders, today, workers, args.min_score, args.format)?;
    println!("{output}");
    Ok(())
}

pub(crate) fn score_tenders(
    engine: &EvaluationEngine,
    tenders: Vec<ImportedTender>,
    today: NaiveDate,
    workers: usize,
    min_score: Option<f64>,
    format: OutputFormat,
) -> Result<String, AppError> {
    let (records, signals) = split_signals(tenders);
    let outcome = engine.score_batch(
        &records,
        &signals,
        today,
        &BatchOptions::with_workers(workers),
    )?;

    let ranked: Vec<&ScoredTender> = match min_score {
        Some(min_score) => outcome.shortlist(min_score),
        None => outcome.ranked(),
    };
    let summary = outcome.tier_summary();

    match format {
        OutputFormat::Text => Ok(render_ranking(today, &ranked, &outcome.skipped, &summary)),
        OutputFormat::Json => {
            let response = ScoreResponse {
                scored: ranked.into_iter().cloned().collect(),
                skipped: outcome.skipped.clone(),
                summary,
                cancelled: outcome.cancelled,
            };
            Ok(serde_json::to_string_pretty(&response)?)
        }
    }
}
