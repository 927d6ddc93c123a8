//! Version - Optimistic concurrency token

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Opaque version token stamped by the store on every committed write.
///
/// The zero value means "unset": a record that has never been committed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
pub struct Version {
    pub index: u64,
}

impl Version {
    pub fn new(index: u64) -> Self {
        Self { index }
    }

    pub fn is_unset(&self) -> bool {
        self.index == 0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unset() {
        assert!(Version::default().is_unset());
        assert!(!Version::new(3).is_unset());
    }

    #[test]
    fn test_ordering_follows_index() {
        assert!(Version::new(2) > Version::new(1));
        assert_eq!(Version::new(7).to_string(), "7");
    }
}
