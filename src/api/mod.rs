use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::services::{SeaOrmTitleService, TitleService};

mod base;
mod error;
mod observability;
mod titles;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,

    pub title_service: Arc<dyn TitleService>,

    pub cors_allowed_origins: Vec<String>,
}

/// Builds shared state from an already-connected store.
#[must_use]
pub fn create_app_state(store: Store, config: &Config) -> Arc<AppState> {
    if config.security.api_keys.is_empty() {
        tracing::warn!("No API keys configured; create, update and delete will be refused");
    }

    let title_service =
        Arc::new(SeaOrmTitleService::new(store.clone(), &config.security)) as Arc<dyn TitleService>;

    Arc::new(AppState {
        store,
        title_service,
        cors_allowed_origins: config.server.cors_allowed_origins.clone(),
    })
}

pub async fn create_app_state_from_config(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;
    Ok(create_app_state(store, config))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = &state.cors_allowed_origins;
    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    let api_router = Router::new()
        .route("/", get(base::home))
        .route("/health", get(base::health))
        .route("/secure", get(base::secure))
        .route(
            "/titles",
            get(titles::list_titles).post(titles::create_title),
        )
        .route("/title-pages", get(titles::list_titles))
        .route(
            "/titles/{pk}",
            get(titles::get_title)
                .patch(titles::update_title)
                .delete(titles::delete_title),
        );

    Router::new()
        .route("/", get(base::root))
        .route("/api/v1/", get(base::home))
        .nest("/api/v1", api_router)
        .with_state(state)
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
