//! Identity Port
//!
//! Mints opaque identifiers for new records.

/// Source of fresh, unique resource IDs
pub trait IdGenerator: Send + Sync {
    /// Return an ID no previous call has returned
    fn new_id(&self) -> String;
}
