//! Domain Errors
//!
//! Error types for domain operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::ports::StoreError;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{entity_type} {id} not found")]
    NotFound { entity_type: String, id: String },

    #[error("unimplemented: {0}")]
    Unimplemented(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Machine-checkable classification of a [`DomainError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    Unimplemented,
    AlreadyExists,
    Conflict,
    /// Missing or wrong credentials; raised by the transport, never by the domain
    Unauthenticated,
    Internal,
}

impl DomainError {
    pub fn invalid_argument<T: Into<String>>(message: T) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn unimplemented<T: Into<String>>(message: T) -> Self {
        Self::Unimplemented(message.into())
    }

    pub fn not_found<T: AsRef<str>>(entity_type: T, id: &str) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::Unimplemented(_) => ErrorKind::Unimplemented,
            DomainError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            DomainError::Conflict(_) => ErrorKind::Conflict,
            DomainError::Store(e) => e.kind(),
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidArgument => write!(f, "invalid_argument"),
            ErrorKind::NotFound => write!(f, "not_found"),
            ErrorKind::Unimplemented => write!(f, "unimplemented"),
            ErrorKind::AlreadyExists => write!(f, "already_exists"),
            ErrorKind::Conflict => write!(f, "conflict"),
            ErrorKind::Unauthenticated => write!(f, "unauthenticated"),
            ErrorKind::Internal => write!(f, "internal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_keep_their_variant() {
        let err: DomainError = StoreError::SequenceConflict.into();
        assert!(matches!(err, DomainError::Store(StoreError::SequenceConflict)));
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let err: DomainError = StoreError::Closed.into();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_not_found_message_names_the_id() {
        let err = DomainError::not_found("service", "abc123");
        assert_eq!(err.to_string(), "service abc123 not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
