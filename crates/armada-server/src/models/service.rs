//! Service request/response DTOs

use armada::{ErrorKind, ListOptions, Service, ServiceSpec, Version};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Create Service request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateServiceRequest {
    pub spec: Option<ServiceSpec>,
}

/// Update Service request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateServiceRequest {
    /// Version the caller last read; the update fails if it is stale
    pub version: Option<Version>,
    pub spec: Option<ServiceSpec>,
}

/// List Services query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListServicesParams {
    /// Name or ID prefix to filter by
    pub query: Option<String>,
}

impl From<ListServicesParams> for ListOptions {
    fn from(params: ListServicesParams) -> Self {
        Self {
            query: params.query,
        }
    }
}

/// Single Service response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceResponse {
    pub service: Service,
}

/// Service listing response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListServicesResponse {
    pub services: Vec<Service>,
}

/// Error body returned for every rejected request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: ErrorKind,
    pub message: String,
}
