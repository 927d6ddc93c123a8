//! Service Application Service (Use Case)
//!
//! The five request handlers for Service records. Each one validates its
//! input first and only then opens a transaction, so a rejected request
//! never costs a store round trip.

use std::sync::Arc;

use armada::domain::validation::validate_service_spec;
use armada::{
    By, DomainError, IdGenerator, ListOptions, Service, ServiceSpec, Store, StoreError, Version,
};

/// Application service for Service operations
pub struct ServiceManager<S: Store, I: IdGenerator> {
    store: Arc<S>,
    ids: Arc<I>,
}

impl<S: Store, I: IdGenerator> ServiceManager<S, I> {
    pub fn new(store: Arc<S>, ids: Arc<I>) -> Self {
        Self { store, ids }
    }

    /// Create a Service from the given spec.
    ///
    /// - `InvalidArgument` if the spec is missing or malformed
    /// - `Unimplemented` if the spec uses an unsupported runtime
    /// - store errors (such as an ID collision) unchanged
    pub fn create(&self, spec: Option<&ServiceSpec>) -> Result<Service, DomainError> {
        let spec = checked_spec(spec)?;

        // TODO: reject duplicate names inside this transaction once name
        // uniqueness is part of the API contract.
        let service = Service::new(self.ids.new_id(), spec.clone());

        let created = self
            .store
            .update(|tx| tx.services().create(&service))?;

        tracing::info!(
            "Created service: {} ({}) at version {}",
            created.name(),
            created.id,
            created.meta.version
        );
        Ok(created)
    }

    /// Get a Service by ID.
    ///
    /// - `InvalidArgument` if the ID is empty
    /// - `NotFound` if no such Service exists
    pub fn get(&self, service_id: &str) -> Result<Service, DomainError> {
        require_id(service_id)?;

        self.store
            .view(|tx| Ok::<_, DomainError>(tx.services().get(service_id)))?
            .ok_or_else(|| DomainError::not_found("service", service_id))
    }

    /// Replace the spec of a Service.
    ///
    /// - `InvalidArgument` if the ID or version is missing, or the spec is malformed
    /// - `Unimplemented` if the spec uses an unsupported runtime
    /// - `NotFound` if no such Service exists
    /// - `Conflict` if `version` is not the stored version
    pub fn update(
        &self,
        service_id: &str,
        version: Option<Version>,
        spec: Option<&ServiceSpec>,
    ) -> Result<Service, DomainError> {
        require_id(service_id)?;
        let Some(version) = version else {
            return Err(DomainError::invalid_argument(
                "service version must be provided",
            ));
        };
        let spec = checked_spec(spec)?;

        let updated = self.store.update(|tx| {
            let services = tx.services();
            let Some(mut service) = services.get(service_id) else {
                return Ok(None);
            };
            if service.meta.version != version {
                return Err(DomainError::Conflict(format!(
                    "service {} is at version {}, update was based on version {}",
                    service_id, service.meta.version, version
                )));
            }
            service.spec = spec.clone();
            Ok(Some(services.update(&service)?))
        })?;

        let updated = updated.ok_or_else(|| DomainError::not_found("service", service_id))?;
        tracing::info!(
            "Updated service: {} ({}) to version {}",
            updated.name(),
            updated.id,
            updated.meta.version
        );
        Ok(updated)
    }

    /// Remove a Service.
    ///
    /// - `InvalidArgument` if the ID is empty
    /// - `NotFound` if no such Service exists
    /// - other store errors unchanged
    pub fn remove(&self, service_id: &str) -> Result<(), DomainError> {
        require_id(service_id)?;

        self.store
            .update(|tx| tx.services().delete(service_id))
            .map_err(|e| match e {
                StoreError::NotExist => DomainError::not_found("service", service_id),
                other => other.into(),
            })?;

        tracing::info!("Removed service: {}", service_id);
        Ok(())
    }

    /// List Services, optionally filtered by a name / ID prefix query.
    ///
    /// An empty match is an empty list, never an error.
    pub fn list(&self, options: Option<&ListOptions>) -> Result<Vec<Service>, DomainError> {
        let by = match options.and_then(ListOptions::query) {
            Some(query) => By::Query(query.to_string()),
            None => By::All,
        };

        Ok(self.store.view(|tx| tx.services().find(&by))?)
    }
}

fn require_id(service_id: &str) -> Result<(), DomainError> {
    if service_id.is_empty() {
        return Err(DomainError::invalid_argument("service ID must be provided"));
    }
    Ok(())
}

fn checked_spec(spec: Option<&ServiceSpec>) -> Result<&ServiceSpec, DomainError> {
    validate_service_spec(spec)?;
    spec.ok_or_else(|| DomainError::invalid_argument("service spec must be provided"))
}
