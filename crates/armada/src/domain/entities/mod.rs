//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Service: Persisted desired state of a replicated workload
//! - ServiceSpec: Caller-supplied desired state (annotations + task template)
//! - TaskTemplate: How one instance of the workload runs

mod service;
mod task;

pub use service::*;
pub use task::*;
