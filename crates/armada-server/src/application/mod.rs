//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! the store and the identity generator.

mod service_manager;

pub use service_manager::ServiceManager;
