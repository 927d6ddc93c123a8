//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with external systems (the store, the ID minter).
//!
//! Implementations of these traits live in the infrastructure layer.

pub mod identity;
pub mod store;

// Re-exports
pub use identity::*;
pub use store::*;
