use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryComplaintStore, InMemoryIdentityStore};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use govcomplaint::accounts::{AccountService, Argon2Hasher};
use govcomplaint::complaints::ComplaintService;
use govcomplaint::config::AppConfig;
use govcomplaint::error::AppError;
use govcomplaint::telemetry;
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

    let identity_store = Arc::new(InMemoryIdentityStore::default());
    let complaint_store = Arc::new(InMemoryComplaintStore::default());
    let account_service = Arc::new(AccountService::new(
        identity_store.clone(),
        Arc::new(Argon2Hasher),
    ));
    let complaint_service = Arc::new(ComplaintService::new(complaint_store, identity_store));

    let app = with_service_routes(account_service, complaint_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "complaint portal ready");

    axum::serve(listener, app).await?;
    Ok(())
}
