use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use super::batch::{BatchError, BatchOptions, SkippedRecord, TierSummary};
use super::{EvaluationEngine, ScoredTender};
use crate::workflows::intake::{split_signals, ImportedTender};

#[derive(Debug, Clone)]
pub(crate) struct ScoringState {
    engine: Arc<EvaluationEngine>,
    workers: usize,
}

/// Router exposing batch scoring over HTTP. `workers` is the pool size used
/// when a request does not ask for one, and the ceiling for those that do.
pub fn tender_router(engine: Arc<EvaluationEngine>, workers: usize) -> Router {
    Router::new()
        .route("/api/v1/tenders/score", post(score_handler))
        .with_state(ScoringState { engine, workers })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub today: NaiveDate,
    #[serde(default)]
    pub tenders: Vec<ImportedTender>,
    #[serde(default)]
    pub min_score: Option<f64>,
    #[serde(default)]
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResponse {
    /// Ranked, filtered by `min_score` when one was given.
    pub scored: Vec<ScoredTender>,
    pub skipped: Vec<SkippedRecord>,
    pub summary: TierSummary,
    pub cancelled: bool,
}

pub(crate) async fn score_handler(
    State(state): State<ScoringState>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response {
    let workers = request_workers(request.workers, state.workers);
    let engine = state.engine.clone();

    let joined = tokio::task::spawn_blocking(move || score_request(&engine, request, workers)).await;

    match joined {
        Ok(Ok(response)) => (StatusCode::OK, axum::Json(response)).into_response(),
        Ok(Err(batch_error)) => {
            error!(error = %batch_error, "tender batch failed");
            let payload = json!({ "error": batch_error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
        Err(join_error) => {
            error!(error = %join_error, "tender scoring task aborted");
            let payload = json!({ "error": "scoring task aborted" });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

/// Pool size for one request. Requests may shrink the pool but never grow it
/// past the configured size; `0` means one worker per available CPU.
pub(crate) fn request_workers(requested: Option<usize>, configured: usize) -> usize {
    let ceiling = match configured {
        0 => std::thread::available_parallelism().map_or(1, |count| count.get()),
        configured => configured,
    };
    match requested {
        None => configured,
        Some(0) => ceiling,
        Some(requested) => requested.min(ceiling),
    }
}

pub(crate) fn score_request(
    engine: &EvaluationEngine,
    request: ScoreRequest,
    workers: usize,
) -> Result<ScoreResponse, BatchError> {
    let (records, signals) = split_signals(request.tenders);

    let outcome = engine.score_batch(
        &records,
        &signals,
        request.today,
        &BatchOptions::with_workers(workers),
    )?;

    let ranked = match request.min_score {
        Some(min_score) => outcome.shortlist(min_score),
        None => outcome.ranked(),
    };

    Ok(ScoreResponse {
        scored: ranked.into_iter().cloned().collect(),
        skipped: outcome.skipped.clone(),
        summary: outcome.tier_summary(),
        cancelled: outcome.cancelled,
    })
}
