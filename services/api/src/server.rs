use crate::cli::ServeArgs;
use crate::infra::{AppState, AssessmentService};
use crate::routes::with_assessment_routes;
use ai_maturity::config::AppConfig;
use ai_maturity::error::AppError;
use ai_maturity::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = AssessmentService::from_settings(config.assessment.clone(), args.data);
    let loader = service.loader();
    info!(
        policy = ?service.engine().config().policy,
        sources = ?loader.sources(),
        "assessment engine configured"
    );

    let app = with_assessment_routes(Arc::new(service))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "ai maturity assessment service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
