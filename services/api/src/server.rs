use crate::cli::ServeArgs;
use crate::infra::{build_taxonomy, AppState, RecentNotifications};
use crate::routes::with_taxonomy_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use registry_taxonomy::config::AppConfig;
use registry_taxonomy::error::AppError;
use registry_taxonomy::taxonomy::TaxonomyService;
use registry_taxonomy::telemetry;
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
    if args.empty {
        config.taxonomy.seed_defaults = false;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let notifications = Arc::new(RecentNotifications::default());
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        notifications: notifications.clone(),
    };

    let taxonomy = build_taxonomy(&config.taxonomy);
    let taxonomy_service = Arc::new(TaxonomyService::new(taxonomy, notifications));

    let app = with_taxonomy_routes(taxonomy_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        seeded = config.taxonomy.seed_defaults,
        "registry taxonomy service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
