use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use trinity_os::config::AppConfig;
use trinity_os::error::AppError;
use trinity_os::nutrition::{NutritionSearchService, ReqwestFoodDataClient};
use trinity_os::telemetry;
use trinity_os::wellness::{InMemoryWellnessStore, WellnessService};
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemoryWellnessStore::default());
    let wellness = Arc::new(WellnessService::new(store, config.wellness));
    let food_data = Arc::new(ReqwestFoodDataClient::from_config(&config.nutrition)?);
    let nutrition = Arc::new(NutritionSearchService::new(food_data));

    let app = with_service_routes(wellness, nutrition)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        upstream = %config.nutrition.base_url,
        window = config.wellness.recent_window,
        "trinity wellness service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
