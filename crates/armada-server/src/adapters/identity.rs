//! Random identity generator
//!
//! IDs are 128 random bits rendered as 32 lowercase hex characters.

use armada::IdGenerator;
use uuid::Uuid;

/// UUIDv4-backed implementation of IdGenerator
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl RandomIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for RandomIdGenerator {
    fn new_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}
