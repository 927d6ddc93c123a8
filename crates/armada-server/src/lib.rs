//! Armada API Server
//!
//! HTTP transport and infrastructure adapters for the Armada service
//! registry. The binary in `main.rs` only loads configuration and serves
//! the router built here.

use std::sync::Arc;

use axum::{middleware, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod adapters;
pub mod application;
pub mod auth;
pub mod config;
pub mod models;
pub mod routes;

use adapters::{MemoryStore, RandomIdGenerator};
use application::ServiceManager;

/// Application service with concrete adapters
pub type AppServiceManager = ServiceManager<MemoryStore, RandomIdGenerator>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<AppServiceManager>,
    pub api_key: Option<Arc<str>>,
}

impl AppState {
    pub fn new(services: Arc<AppServiceManager>, api_key: Option<String>) -> Self {
        Self {
            services,
            api_key: api_key.map(Arc::from),
        }
    }

    /// State backed by a fresh in-memory store
    pub fn in_memory(api_key: Option<String>) -> Self {
        let store = Arc::new(MemoryStore::new());
        let ids = Arc::new(RandomIdGenerator::new());
        Self::new(Arc::new(ServiceManager::new(store, ids)), api_key)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthCheck {
    pub status: String,
    pub version: String,
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is up", body = HealthCheck)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build the full router: health, docs, and the authenticated API.
pub fn build_router(state: AppState) -> Router {
    // Protected routes (require authentication when a key is configured)
    let protected_routes = Router::new()
        .merge(routes::service::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
