use crate::cli::ServeArgs;
use crate::infra::{scoring_engine, AppState, InMemoryDeliveryPublisher, InMemoryLeadRepository};
use crate::routes::with_lead_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fin_health::config::AppConfig;
use fin_health::error::AppError;
use fin_health::leads::{LeadService, ReviewGate};
use fin_health::telemetry;
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

    let engine = scoring_engine(&config.scoring, None)?;
    let gate = ReviewGate::with_policy(config.scoring.review_policy());

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        engine: Arc::new(engine.clone()),
    };

    let repository = Arc::new(InMemoryLeadRepository::default());
    let delivery = Arc::new(InMemoryDeliveryPublisher::default());
    let lead_service = Arc::new(LeadService::new(engine, gate, repository, delivery));

    let app = with_lead_routes(lead_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        variant = config.scoring.variant.label(),
        review_limit = config.scoring.max_monthly_investment,
        "financial health scoring service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
