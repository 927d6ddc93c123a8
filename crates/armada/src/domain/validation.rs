//! ServiceSpec Validation
//!
//! Acceptance rules applied to a ServiceSpec before anything reaches the store.
//! Every function here is pure: no side effects, no store access.
//!
//! Malformed input is `InvalidArgument`. Input that is well formed but asks for
//! something not supported yet (another runtime, a non-image container) is
//! `Unimplemented`.

use crate::domain::{
    Annotations, DomainError, ResourceRequirements, Resources, RuntimeSpec, ServiceSpec,
    MIN_MEMORY_BYTES, MIN_NANO_CPUS,
};

/// Check a single resource quantity pair. Absence is valid.
pub fn validate_resources(r: Option<&Resources>) -> Result<(), DomainError> {
    let Some(r) = r else {
        return Ok(());
    };

    if r.nano_cpus != 0 && r.nano_cpus < MIN_NANO_CPUS {
        return Err(DomainError::invalid_argument(format!(
            "invalid cpu value {}: must be at least {}",
            r.nano_cpus, MIN_NANO_CPUS
        )));
    }

    if r.memory_bytes != 0 && r.memory_bytes < MIN_MEMORY_BYTES {
        return Err(DomainError::invalid_argument(format!(
            "invalid memory value {}: must be at least 4MiB",
            r.memory_bytes
        )));
    }

    Ok(())
}

/// Limits first, then reservations.
pub fn validate_resource_requirements(r: Option<&ResourceRequirements>) -> Result<(), DomainError> {
    let Some(r) = r else {
        return Ok(());
    };
    validate_resources(r.limits.as_ref())?;
    validate_resources(r.reservations.as_ref())?;
    Ok(())
}

/// Names follow `^[a-zA-Z0-9](?:[-_]*[A-Za-z0-9]+)*$`.
pub fn validate_annotations(a: &Annotations) -> Result<(), DomainError> {
    if a.name.is_empty() {
        return Err(DomainError::invalid_argument("meta: name must be provided"));
    }
    if !is_valid_name(&a.name) {
        return Err(DomainError::invalid_argument(format!(
            "meta: invalid name {:?}, only [a-zA-Z0-9][a-zA-Z0-9-_]*[a-zA-Z0-9] are allowed",
            a.name
        )));
    }
    Ok(())
}

fn is_valid_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) => {
            first.is_ascii_alphanumeric()
                && last.is_ascii_alphanumeric()
                && bytes
                    .iter()
                    .all(|b| b.is_ascii_alphanumeric() || *b == b'-' || *b == b'_')
        }
        _ => false,
    }
}

pub fn validate_service_spec_template(spec: &ServiceSpec) -> Result<(), DomainError> {
    let Some(template) = &spec.template else {
        return Err(DomainError::invalid_argument(
            "missing template in service spec",
        ));
    };

    let container = match &template.runtime {
        None => {
            return Err(DomainError::invalid_argument(
                "template: runtime container spec required in service spec task template",
            ))
        }
        Some(RuntimeSpec::Container(container)) => container,
        Some(other) => {
            return Err(DomainError::unimplemented(format!(
                "template: unimplemented runtime {} in service spec task template",
                other.kind()
            )))
        }
    };

    validate_resource_requirements(container.resources.as_ref())?;

    let Some(image) = &container.image else {
        return Err(DomainError::unimplemented(
            "template: container image not specified",
        ));
    };
    if image.reference.is_empty() {
        return Err(DomainError::invalid_argument(
            "template: image reference must be provided",
        ));
    }

    Ok(())
}

/// Full acceptance check: annotations, then the template.
pub fn validate_service_spec(spec: Option<&ServiceSpec>) -> Result<(), DomainError> {
    let Some(spec) = spec else {
        return Err(DomainError::invalid_argument("service spec must be provided"));
    };

    validate_annotations(&spec.annotations)
        .and_then(|_| validate_service_spec_template(spec))
        .inspect_err(|e| tracing::debug!(name = %spec.annotations.name, "rejected service spec: {}", e))
}
