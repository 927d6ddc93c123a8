//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use armada::{
    Annotations, ContainerSpec, ErrorKind, ImageSpec, Meta, PluginSpec, ResourceRequirements,
    Resources, RuntimeSpec, Service, ServiceSpec, TaskTemplate, Version,
};

use crate::models::{
    CreateServiceRequest, ErrorResponse, ListServicesResponse, ServiceResponse,
    UpdateServiceRequest,
};
use crate::HealthCheck;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::health_check,
        super::service::list_services,
        super::service::create_service,
        super::service::get_service,
        super::service::update_service,
        super::service::remove_service,
    ),
    info(
        title = "Armada API",
        version = "0.1.0",
        description = "Armada service registry\n\nValidates and persists the desired state of replicated workloads.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Service", description = "Service - Desired state of a replicated workload"),
    ),
    components(
        schemas(
            // Domain
            Service,
            Meta,
            Version,
            ServiceSpec,
            Annotations,
            TaskTemplate,
            RuntimeSpec,
            ContainerSpec,
            PluginSpec,
            ImageSpec,
            ResourceRequirements,
            Resources,
            ErrorKind,
            // Transport
            CreateServiceRequest,
            UpdateServiceRequest,
            ServiceResponse,
            ListServicesResponse,
            ErrorResponse,
            HealthCheck,
        )
    ),
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_service_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/v1/services"));
        assert!(doc.paths.paths.contains_key("/v1/services/{id}"));
    }

    #[test]
    fn test_document_lists_health_path() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
