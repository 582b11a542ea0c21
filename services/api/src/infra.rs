use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tender_curation::error::AppError;
use tender_curation::workflows::evaluation::{
    CriteriaConfig, CriteriaOverrides, EvaluationEngine, OrganizationProfile,
};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Built-in catalog, with the JSON overrides at `path` merged on top.
pub(crate) fn load_criteria(path: Option<&Path>) -> Result<CriteriaConfig, AppError> {
    let defaults = CriteriaConfig::load_defaults();
    let Some(path) = path else {
        return Ok(defaults);
    };

    let raw = std::fs::read_to_string(path)?;
    let overrides: CriteriaOverrides = serde_json::from_str(&raw)?;
    let merged = defaults.merge(overrides)?;
    info!(path = %path.display(), "loaded criteria overrides");
    Ok(merged)
}

pub(crate) fn build_engine(
    criteria_path: Option<&Path>,
    expertise_keywords: &[String],
) -> Result<EvaluationEngine, AppError> {
    let criteria = load_criteria(criteria_path)?;
    let profile = OrganizationProfile::new(expertise_keywords.iter().cloned());
    Ok(EvaluationEngine::new(criteria, profile)?)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
