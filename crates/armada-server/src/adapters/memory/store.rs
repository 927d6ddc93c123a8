//! In-memory implementation of Store
//!
//! Records live in a `BTreeMap` keyed by ID behind a single `RwLock`. Write
//! transactions hold the write lock for their whole duration, so they are
//! serialized; read transactions share the read lock.
//!
//! A write transaction never touches the map directly. Its changes go to an
//! overlay that reads consult first, and the overlay is applied only when the
//! closure returns `Ok`. Every committed transaction that changed something
//! advances the store index by one, and all records it wrote carry that index
//! as their version.

use std::collections::BTreeMap;

use armada::{
    By, Meta, ReadTx, Service, ServiceReader, ServiceWriter, Store, StoreError, Tx, Version,
};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

/// In-memory transactional store
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    services: BTreeMap<String, Service>,
    index: u64,
    closed: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Version of the last committed write transaction
    pub fn version(&self) -> Version {
        Version::new(self.inner.read().index)
    }

    /// Refuse all further transactions
    pub fn close(&self) {
        self.inner.write().closed = true;
        tracing::info!("Memory store closed");
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn update<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn Tx) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut inner = self.inner.write();
        if inner.closed {
            return Err(StoreError::Closed.into());
        }

        let version = Version::new(inner.index + 1);
        let mut tx = WriteBuffer {
            base: &inner.services,
            changes: BTreeMap::new(),
            version,
            now: Utc::now(),
        };
        let handle: &mut dyn Tx = &mut tx;
        let out = f(handle)?;

        let changes = tx.changes;
        if !changes.is_empty() {
            let count = changes.len();
            for (id, change) in changes {
                match change {
                    Some(service) => {
                        inner.services.insert(id, service);
                    }
                    None => {
                        inner.services.remove(&id);
                    }
                }
            }
            inner.index = version.index;
            tracing::debug!(%version, changes = count, "committed write transaction");
        }

        Ok(out)
    }

    fn view<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&dyn ReadTx) -> Result<T, E>,
        E: From<StoreError>,
    {
        let inner = self.inner.read();
        if inner.closed {
            return Err(StoreError::Closed.into());
        }

        let snapshot = Snapshot {
            services: &inner.services,
        };
        f(&snapshot)
    }
}

/// Read-only view over committed records
struct Snapshot<'a> {
    services: &'a BTreeMap<String, Service>,
}

impl ReadTx for Snapshot<'_> {
    fn services(&self) -> &dyn ServiceReader {
        self
    }
}

impl ServiceReader for Snapshot<'_> {
    fn get(&self, id: &str) -> Option<Service> {
        self.services.get(id).cloned()
    }

    fn find(&self, by: &By) -> Result<Vec<Service>, StoreError> {
        by.check()?;
        Ok(self
            .services
            .values()
            .filter(|s| by.matches(s))
            .cloned()
            .collect())
    }
}

/// Pending changes of one write transaction. `None` marks a deletion.
struct WriteBuffer<'a> {
    base: &'a BTreeMap<String, Service>,
    changes: BTreeMap<String, Option<Service>>,
    version: Version,
    now: DateTime<Utc>,
}

impl Tx for WriteBuffer<'_> {
    fn services(&mut self) -> &mut dyn ServiceWriter {
        self
    }
}

impl ServiceReader for WriteBuffer<'_> {
    fn get(&self, id: &str) -> Option<Service> {
        match self.changes.get(id) {
            Some(change) => change.clone(),
            None => self.base.get(id).cloned(),
        }
    }

    fn find(&self, by: &By) -> Result<Vec<Service>, StoreError> {
        by.check()?;

        let mut merged: BTreeMap<&str, &Service> =
            self.base.iter().map(|(id, s)| (id.as_str(), s)).collect();
        for (id, change) in &self.changes {
            match change {
                Some(service) => {
                    merged.insert(id.as_str(), service);
                }
                None => {
                    merged.remove(id.as_str());
                }
            }
        }

        Ok(merged
            .into_values()
            .filter(|s| by.matches(s))
            .cloned()
            .collect())
    }
}

impl ServiceWriter for WriteBuffer<'_> {
    fn create(&mut self, service: &Service) -> Result<Service, StoreError> {
        if self.get(&service.id).is_some() {
            return Err(StoreError::Exist);
        }

        let mut stored = service.clone();
        stored.meta = Meta {
            version: self.version,
            created_at: Some(self.now),
            updated_at: Some(self.now),
        };
        self.changes.insert(stored.id.clone(), Some(stored.clone()));
        Ok(stored)
    }

    fn update(&mut self, service: &Service) -> Result<Service, StoreError> {
        let current = self.get(&service.id).ok_or(StoreError::NotExist)?;
        if current.meta.version != service.meta.version {
            return Err(StoreError::SequenceConflict);
        }

        let mut stored = service.clone();
        stored.meta = Meta {
            version: self.version,
            created_at: current.meta.created_at,
            updated_at: Some(self.now),
        };
        self.changes.insert(stored.id.clone(), Some(stored.clone()));
        Ok(stored)
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        if self.get(id).is_none() {
            return Err(StoreError::NotExist);
        }
        self.changes.insert(id.to_string(), None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armada::{ContainerSpec, ServiceSpec, TaskTemplate};

    fn service(id: &str, name: &str) -> Service {
        Service::new(
            id,
            ServiceSpec::new(name, TaskTemplate::from_container(ContainerSpec::new("redis:7"))),
        )
    }

    fn create(store: &MemoryStore, svc: Service) -> Service {
        store
            .update(|tx| tx.services().create(&svc))
            .expect("create should succeed")
    }

    fn get(store: &MemoryStore, id: &str) -> Option<Service> {
        store
            .view(|tx| Ok::<_, StoreError>(tx.services().get(id)))
            .unwrap()
    }

    #[test]
    fn test_create_stamps_version_and_timestamps() {
        let store = MemoryStore::new();
        let created = create(&store, service("a1", "cache"));

        assert_eq!(created.meta.version, Version::new(1));
        assert!(created.meta.created_at.is_some());
        assert_eq!(created.meta.created_at, created.meta.updated_at);
        assert_eq!(get(&store, "a1"), Some(created));
        assert_eq!(store.version(), Version::new(1));
    }

    #[test]
    fn test_create_existing_id_fails() {
        let store = MemoryStore::new();
        create(&store, service("a1", "cache"));

        let result = store.update(|tx| tx.services().create(&service("a1", "other")));
        assert_eq!(result, Err(StoreError::Exist));
        assert_eq!(get(&store, "a1").unwrap().name(), "cache");
    }

    #[test]
    fn test_failed_transaction_leaves_no_trace() {
        let store = MemoryStore::new();
        create(&store, service("a1", "cache"));

        let result: Result<(), StoreError> = store.update(|tx| {
            let services = tx.services();
            services.create(&service("b2", "queue"))?;
            services.delete("a1")?;
            Err(StoreError::SequenceConflict)
        });

        assert_eq!(result, Err(StoreError::SequenceConflict));
        assert!(get(&store, "b2").is_none());
        assert!(get(&store, "a1").is_some());
        assert_eq!(store.version(), Version::new(1));
    }

    #[test]
    fn test_reads_inside_write_see_pending_changes() {
        let store = MemoryStore::new();
        create(&store, service("a1", "cache"));

        store
            .update(|tx| {
                let services = tx.services();
                services.create(&service("b2", "queue"))?;
                services.delete("a1")?;

                assert!(services.get("b2").is_some());
                assert!(services.get("a1").is_none());
                let all = services.find(&By::All)?;
                assert_eq!(all.len(), 1);
                assert_eq!(all[0].id, "b2");
                Ok::<_, StoreError>(())
            })
            .unwrap();
    }

    #[test]
    fn test_update_requires_current_version() {
        let store = MemoryStore::new();
        let created = create(&store, service("a1", "cache"));

        let mut changed = created.clone();
        changed.spec.instances = 3;
        let updated = store.update(|tx| tx.services().update(&changed)).unwrap();
        assert!(updated.meta.version > created.meta.version);
        assert_eq!(updated.meta.created_at, created.meta.created_at);

        // `changed` still carries the old version
        let stale = store.update(|tx| tx.services().update(&changed));
        assert_eq!(stale, Err(StoreError::SequenceConflict));
        assert_eq!(get(&store, "a1").unwrap().meta.version, updated.meta.version);
    }

    #[test]
    fn test_update_and_delete_missing_fail() {
        let store = MemoryStore::new();

        assert_eq!(
            store.update(|tx| tx.services().update(&service("nope", "x"))),
            Err(StoreError::NotExist)
        );
        assert_eq!(
            store.update(|tx| tx.services().delete("nope")),
            Err(StoreError::NotExist)
        );
        assert_eq!(store.version(), Version::default());
    }

    #[test]
    fn test_find_filters_and_orders_by_id() {
        let store = MemoryStore::new();
        create(&store, service("c3", "web-frontend"));
        create(&store, service("a1", "web-backend"));
        create(&store, service("b2", "db"));

        let all = store.view(|tx| tx.services().find(&By::All)).unwrap();
        let ids: Vec<&str> = all.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a1", "b2", "c3"]);

        let web = store
            .view(|tx| tx.services().find(&By::Query("web".into())))
            .unwrap();
        assert_eq!(web.len(), 2);

        let by_name = store
            .view(|tx| tx.services().find(&By::Name("db".into())))
            .unwrap();
        assert_eq!(by_name[0].id, "b2");

        let none = store
            .view(|tx| tx.services().find(&By::IdPrefix("zz".into())))
            .unwrap();
        assert!(none.is_empty());

        assert_eq!(
            store.view(|tx| tx.services().find(&By::Name(String::new()))),
            Err(StoreError::InvalidFindBy)
        );
    }

    #[test]
    fn test_closed_store_refuses_transactions() {
        let store = MemoryStore::new();
        store.close();

        assert_eq!(
            store.update(|tx| tx.services().create(&service("a1", "cache"))),
            Err(StoreError::Closed)
        );
        assert_eq!(
            store.view(|tx| tx.services().find(&By::All)),
            Err(StoreError::Closed)
        );
    }

    #[test]
    fn test_concurrent_writers_get_distinct_versions() {
        let store = MemoryStore::new();

        let versions: Vec<Version> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let store = &store;
                    scope.spawn(move || {
                        let svc = service(&format!("id{i}"), &format!("svc{i}"));
                        store
                            .update(|tx| tx.services().create(&svc))
                            .unwrap()
                            .meta
                            .version
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let mut sorted = versions.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 8);
        assert_eq!(store.version(), Version::new(8));
    }
}
