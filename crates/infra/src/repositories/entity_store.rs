use std::collections::HashMap;
use std::sync::RwLock;

use storefront_core::Entity;
use storefront_sales::RepositoryError;

/// In-memory keyed store for tests/dev, the backing for every in-memory
/// collaborator in this crate.
///
/// Records are keyed by [`Entity::id`]. A poisoned lock is reported as
/// [`RepositoryError::Unavailable`] rather than panicking.
#[derive(Debug)]
pub struct InMemoryEntityStore<E: Entity> {
    inner: RwLock<HashMap<E::Id, E>>,
}

impl<E: Entity> InMemoryEntityStore<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<E: Entity> Default for InMemoryEntityStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryEntityStore<E>
where
    E: Entity + Clone,
{
    pub fn get(&self, id: &E::Id) -> Result<Option<E>, RepositoryError> {
        self.read(|map| map.get(id).cloned())
    }

    pub fn upsert(&self, entity: E) -> Result<(), RepositoryError> {
        self.write(|map| {
            map.insert(entity.id().clone(), entity);
            Ok(())
        })
    }

    pub fn list(&self) -> Result<Vec<E>, RepositoryError> {
        self.read(|map| map.values().cloned().collect())
    }

    pub fn len(&self) -> Result<usize, RepositoryError> {
        self.read(|map| map.len())
    }

    /// Run `f` against a consistent view of all records.
    pub fn read<R>(&self, f: impl FnOnce(&HashMap<E::Id, E>) -> R) -> Result<R, RepositoryError> {
        let map = self
            .inner
            .read()
            .map_err(|_| RepositoryError::Unavailable("entity store lock poisoned".into()))?;
        Ok(f(&map))
    }

    /// Run `f` with exclusive access; no other reader or writer interleaves.
    pub fn write<R>(
        &self,
        f: impl FnOnce(&mut HashMap<E::Id, E>) -> Result<R, RepositoryError>,
    ) -> Result<R, RepositoryError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| RepositoryError::Unavailable("entity store lock poisoned".into()))?;
        f(&mut map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_parties::{Customer, CustomerId};

    fn customer(id: &str, name: &str) -> Customer {
        Customer::new(id.parse::<CustomerId>().unwrap(), name).unwrap()
    }

    #[test]
    fn upsert_replaces_record_with_same_id() {
        let store = InMemoryEntityStore::new();
        store.upsert(customer("c1", "Ada")).unwrap();
        store.upsert(customer("c1", "Ada Lovelace")).unwrap();

        assert_eq!(store.len().unwrap(), 1);
        let found = store.get(&"c1".parse().unwrap()).unwrap().unwrap();
        assert_eq!(found.name(), "Ada Lovelace");
    }

    #[test]
    fn write_error_is_returned_to_caller() {
        let store = InMemoryEntityStore::new();
        store.upsert(customer("c1", "Ada")).unwrap();

        let err = store
            .write(|_map| -> Result<(), RepositoryError> {
                Err(RepositoryError::Backend("rejected".into()))
            })
            .unwrap_err();
        assert_eq!(err, RepositoryError::Backend("rejected".into()));
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn get_missing_returns_none() {
        let store: InMemoryEntityStore<Customer> = InMemoryEntityStore::new();
        assert!(store.get(&"nobody".parse().unwrap()).unwrap().is_none());
    }
}
