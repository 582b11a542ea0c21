use crate::cli::ServeArgs;
use crate::infra::{build_engine, AppState};
use crate::routes::with_tender_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tender_curation::config::AppConfig;
use tender_curation::error::AppError;
use tender_curation::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let engine = Arc::new(build_engine(
        config.scoring.criteria_path.as_deref(),
        &config.scoring.expertise_keywords,
    )?);
    info!(
        expertise_keywords = engine.expertise_keywords().len(),
        sectors = engine.config().sector_weights.len(),
        "evaluation criteria validated"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_tender_routes(engine, config.scoring.workers)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "tender scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
