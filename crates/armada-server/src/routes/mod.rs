//! Armada API Routes
//!
//! - /v1/services - Service management
//! - /swagger-ui - OpenAPI documentation

pub mod error;
pub mod service;
pub mod swagger;

pub use error::{ApiError, ApiJson};
