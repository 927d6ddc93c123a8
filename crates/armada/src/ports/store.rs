//! Store Port
//!
//! Transactional store facade. All access happens inside a unit of work
//! handed a transaction handle that lives only for that call:
//!
//! - [`Store::update`] runs the closure under a read-write transaction. When the
//!   closure returns `Ok` every change it made commits together; when it returns
//!   `Err` none of them are visible.
//! - [`Store::view`] runs the closure under a read-only transaction.
//!
//! The closure's error type is chosen by the caller so that domain errors can
//! abort a transaction just like store errors do.

use thiserror::Error;

use crate::domain::{ErrorKind, Service};

/// Errors raised by store implementations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("object already exists")]
    Exist,

    #[error("object does not exist")]
    NotExist,

    #[error("update out of sequence")]
    SequenceConflict,

    #[error("invalid find argument")]
    InvalidFindBy,

    #[error("store is closed")]
    Closed,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Exist => ErrorKind::AlreadyExists,
            StoreError::NotExist => ErrorKind::NotFound,
            StoreError::SequenceConflict => ErrorKind::Conflict,
            StoreError::InvalidFindBy => ErrorKind::InvalidArgument,
            StoreError::Closed => ErrorKind::Internal,
        }
    }
}

/// Selection predicate for [`ServiceReader::find`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum By {
    /// Every record
    All,
    /// Exact name match
    Name(String),
    /// IDs starting with the prefix
    IdPrefix(String),
    /// Name or ID starting with the query
    Query(String),
}

impl By {
    /// Reject predicates that cannot select anything meaningful.
    pub fn check(&self) -> Result<(), StoreError> {
        match self {
            By::Name(s) | By::IdPrefix(s) | By::Query(s) if s.is_empty() => {
                Err(StoreError::InvalidFindBy)
            }
            _ => Ok(()),
        }
    }

    pub fn matches(&self, service: &Service) -> bool {
        match self {
            By::All => true,
            By::Name(name) => service.name() == name,
            By::IdPrefix(prefix) => service.id.starts_with(prefix.as_str()),
            By::Query(q) => service.name().starts_with(q.as_str()) || service.id.starts_with(q.as_str()),
        }
    }
}

/// Read accessors for Service records
pub trait ServiceReader {
    fn get(&self, id: &str) -> Option<Service>;

    fn find(&self, by: &By) -> Result<Vec<Service>, StoreError>;
}

/// Write accessors for Service records
///
/// Writers return the record as persisted, with its version stamped.
pub trait ServiceWriter: ServiceReader {
    /// Fails with [`StoreError::Exist`] if the ID is taken.
    fn create(&mut self, service: &Service) -> Result<Service, StoreError>;

    /// Fails with [`StoreError::NotExist`] if the ID is unknown and with
    /// [`StoreError::SequenceConflict`] if `service.meta.version` is not the
    /// stored version.
    fn update(&mut self, service: &Service) -> Result<Service, StoreError>;

    /// Fails with [`StoreError::NotExist`] if the ID is unknown.
    fn delete(&mut self, id: &str) -> Result<(), StoreError>;
}

/// Read-only transaction handle
pub trait ReadTx {
    fn services(&self) -> &dyn ServiceReader;
}

/// Read-write transaction handle
pub trait Tx {
    fn services(&mut self) -> &mut dyn ServiceWriter;
}

/// Transactional store facade
pub trait Store: Send + Sync {
    fn update<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn Tx) -> Result<T, E>,
        E: From<StoreError>;

    fn view<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&dyn ReadTx) -> Result<T, E>,
        E: From<StoreError>;
}
