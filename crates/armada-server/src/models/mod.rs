//! Armada API Models
//!
//! Request/response DTOs for the HTTP transport. The domain types
//! (Service, ServiceSpec, ...) are embedded as-is.

mod service;

pub use service::*;
