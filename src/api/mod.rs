use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::clients::{MetadataProvider, OmdbClient};
use crate::config::Config;
use crate::db::Store;
use crate::services::{CatalogService, DefaultCatalogService, QueryPlanner};

mod error;
mod movies;
mod observability;
mod system;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogService>,

    pub store: Store,

    pub config: Arc<Config>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

/// Opens the configured database and wires the OMDb client into the catalog.
pub async fn create_app_state(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let provider = Arc::new(OmdbClient::from_config(&config.omdb)?);

    Ok(create_app_state_with_provider(
        config,
        provider,
        store,
        prometheus_handle,
    ))
}

/// Builds state around an already-open store and any provider implementation.
pub fn create_app_state_with_provider(
    config: Config,
    provider: Arc<dyn MetadataProvider>,
    store: Store,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    let planner = QueryPlanner::from_config(&config.catalog);
    let catalog = Arc::new(DefaultCatalogService::new(
        provider,
        Arc::new(store.clone()),
        planner,
    ));

    Arc::new(AppState {
        catalog,
        store,
        config: Arc::new(config),
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = &state.config.server.cors_allowed_origins;

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    let api_router = Router::new()
        .route(
            "/movies",
            get(movies::list_movies).post(movies::create_movie),
        )
        .route(
            "/movies/{id}",
            get(movies::get_movie)
                .patch(movies::update_movie)
                .delete(movies::remove_movie),
        )
        .route("/health/live", get(system::health_live))
        .route("/health/ready", get(system::health_ready));

    Router::new()
        .nest("/api", api_router)
        .route("/metrics", get(observability::get_metrics))
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::request_middleware))
        .with_state(state)
}
