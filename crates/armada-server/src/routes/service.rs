//! Service Routes - Desired-state management
//!
//! HTTP handlers that delegate to ServiceManager for business logic.
//! Manager calls run on the blocking pool since a store transaction may block.

use armada::{DomainError, ListOptions};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::models::{
    CreateServiceRequest, ErrorResponse, ListServicesParams, ListServicesResponse,
    ServiceResponse, UpdateServiceRequest,
};
use crate::routes::{ApiError, ApiJson};
use crate::AppState;

async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::internal(format!("task failed: {e}")))?
        .map_err(ApiError::from)
}

/// List Services
#[utoipa::path(
    get,
    path = "/v1/services",
    params(ListServicesParams),
    responses(
        (status = 200, description = "Matching Services", body = ListServicesResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "Service"
)]
pub async fn list_services(
    State(state): State<AppState>,
    Query(params): Query<ListServicesParams>,
) -> Result<Json<ListServicesResponse>, ApiError> {
    let options = ListOptions::from(params);
    let services = run_blocking(move || state.services.list(Some(&options))).await?;

    Ok(Json(ListServicesResponse { services }))
}

/// Create new Service
#[utoipa::path(
    post,
    path = "/v1/services",
    request_body = CreateServiceRequest,
    responses(
        (status = 201, description = "Service created", body = ServiceResponse),
        (status = 400, description = "Malformed body or spec", body = ErrorResponse),
        (status = 501, description = "Spec uses an unsupported feature", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "Service"
)]
pub async fn create_service(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateServiceRequest>,
) -> Result<(StatusCode, Json<ServiceResponse>), ApiError> {
    let service = run_blocking(move || state.services.create(payload.spec.as_ref())).await?;

    Ok((StatusCode::CREATED, Json(ServiceResponse { service })))
}

/// Get Service by ID
#[utoipa::path(
    get,
    path = "/v1/services/{id}",
    params(
        ("id" = String, Path, description = "Service ID")
    ),
    responses(
        (status = 200, description = "Service found", body = ServiceResponse),
        (status = 404, description = "Service not found", body = ErrorResponse)
    ),
    tag = "Service"
)]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ServiceResponse>, ApiError> {
    let service = run_blocking(move || state.services.get(&id)).await?;

    Ok(Json(ServiceResponse { service }))
}

/// Update Service
#[utoipa::path(
    put,
    path = "/v1/services/{id}",
    params(
        ("id" = String, Path, description = "Service ID")
    ),
    request_body = UpdateServiceRequest,
    responses(
        (status = 200, description = "Service updated", body = ServiceResponse),
        (status = 400, description = "Malformed body, missing version or malformed spec", body = ErrorResponse),
        (status = 404, description = "Service not found", body = ErrorResponse),
        (status = 409, description = "Version is stale", body = ErrorResponse),
        (status = 501, description = "Spec uses an unsupported feature", body = ErrorResponse)
    ),
    tag = "Service"
)]
pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateServiceRequest>,
) -> Result<Json<ServiceResponse>, ApiError> {
    let service = run_blocking(move || {
        state
            .services
            .update(&id, payload.version, payload.spec.as_ref())
    })
    .await?;

    Ok(Json(ServiceResponse { service }))
}

/// Remove Service
#[utoipa::path(
    delete,
    path = "/v1/services/{id}",
    params(
        ("id" = String, Path, description = "Service ID")
    ),
    responses(
        (status = 204, description = "Service removed"),
        (status = 404, description = "Service not found", body = ErrorResponse)
    ),
    tag = "Service"
)]
pub async fn remove_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    run_blocking(move || state.services.remove(&id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/services", get(list_services).post(create_service))
        .route(
            "/v1/services/:id",
            get(get_service).put(update_service).delete(remove_service),
        )
}
