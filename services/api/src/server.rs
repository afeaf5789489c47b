use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySurveyRepository};
use crate::routes::with_survey_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use welfare_foundation::config::AppConfig;
use welfare_foundation::error::AppError;
use welfare_foundation::telemetry;
use welfare_foundation::workflows::survey::SurveyWorkflowService;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemorySurveyRepository::default());
    let survey_service = Arc::new(
        SurveyWorkflowService::new(repository).with_queue_limit(config.workflow.queue_limit),
    );

    let app = with_survey_routes(survey_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        queue_limit = config.workflow.queue_limit,
        "beneficiary assessment service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
