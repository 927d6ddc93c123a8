//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod identity;
pub mod memory;

// Re-exports
pub use identity::RandomIdGenerator;
pub use memory::MemoryStore;
