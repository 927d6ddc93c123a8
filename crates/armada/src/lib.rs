//! Armada Domain Library
//!
//! Core domain types and interfaces for the Armada service registry:
//! the control-plane boundary that accepts, validates and persists
//! Service records.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Service, ServiceSpec, TaskTemplate)
//!   - `value_objects/`: Immutable value types (Version, Resources, ListOptions)
//!   - `validation`: ServiceSpec acceptance rules
//!   - `errors`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `store`: Transactional store facade and per-entity accessors
//!   - `identity`: Unique identifier minting
//!
//! # Usage
//!
//! ```rust,ignore
//! use armada::domain::validation::validate_service_spec;
//! use armada::ports::{Store, Tx};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Annotations, ContainerSpec, DomainError, ErrorKind, ImageSpec, ListOptions, Meta, PluginSpec,
    ResourceRequirements, Resources, RuntimeSpec, Service, ServiceSpec, TaskTemplate, Version,
};
pub use ports::{
    // Identity
    IdGenerator,
    // Store
    By,
    ReadTx,
    ServiceReader,
    ServiceWriter,
    Store,
    StoreError,
    Tx,
};
