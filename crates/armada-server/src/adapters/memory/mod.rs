//! In-memory Store Implementation

mod store;

pub use store::MemoryStore;
