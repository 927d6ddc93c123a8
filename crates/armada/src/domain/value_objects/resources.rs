//! Resources - CPU / memory quantities for limits and reservations

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Smallest accepted non-zero CPU quantity, in nanocpus (one millicpu).
pub const MIN_NANO_CPUS: i64 = 1_000_000;

/// Smallest accepted non-zero memory quantity, in bytes (4 MiB).
pub const MIN_MEMORY_BYTES: i64 = 4 * 1024 * 1024;

/// CPU / memory quantity pair. Zero means unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Resources {
    /// CPU quantity in nanocpu units
    #[serde(default)]
    pub nano_cpus: i64,
    /// Memory quantity in bytes
    #[serde(default)]
    pub memory_bytes: i64,
}

impl Resources {
    pub fn new(nano_cpus: i64, memory_bytes: i64) -> Self {
        Self {
            nano_cpus,
            memory_bytes,
        }
    }
}

/// Upper bounds and guaranteed amounts for a task
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResourceRequirements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<Resources>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservations: Option<Resources>,
}
