//! JSON file storage backend.
//!
//! Each store keeps the whole collection in memory and mirrors it to a single
//! file holding a JSON array. Every mutation rewrites the entire file; there
//! are no partial writes and no durability guarantee beyond what a plain file
//! write gives.
//!
//! # Locking
//!
//! One `tokio::sync::Mutex` per store guards both the map and the id counter.
//! Every operation holds it for its full duration, file write included, so
//! operations on one store are totally ordered.

use crate::core::entity::{Entity, Named};
use crate::core::error::StorageError;
use crate::core::service::DataService;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Outcome of a closure passed to [`JsonFileStore::modify`]
pub enum Mutation<R> {
    /// The collection changed and must be written back
    Changed(R),
    /// Nothing changed; skip the write
    Unchanged(R),
}

struct StoreState<T> {
    items: BTreeMap<i32, T>,
    next_id: i32,
}

/// File-backed implementation of `DataService<T>`.
///
/// # Example
///
/// ```rust,ignore
/// use ufund::storage::JsonFileStore;
///
/// let toys = JsonFileStore::<Toy>::open("data/toys.json")?;
/// let kite = toys.create(Toy::new(0, "Kite", 3, 4, "outdoor")).await?;
/// ```
pub struct JsonFileStore<T: Entity> {
    path: PathBuf,
    state: Mutex<StoreState<T>>,
}

impl<T: Entity> JsonFileStore<T> {
    /// Load the store from `path`.
    ///
    /// The file must exist and hold a JSON array. The next id is one more
    /// than the largest id found (ids start at 1 for an empty file).
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let bytes = std::fs::read(&path).map_err(|source| StorageError::Read {
            path: path.clone(),
            source,
        })?;
        let loaded: Vec<T> =
            serde_json::from_slice(&bytes).map_err(|source| StorageError::Malformed {
                path: path.clone(),
                source,
            })?;

        let mut items = BTreeMap::new();
        let mut max_id = 0;
        for entity in loaded {
            max_id = max_id.max(entity.id());
            items.insert(entity.id(), entity);
        }

        tracing::info!(
            entity_type = T::entity_type(),
            path = %path.display(),
            count = items.len(),
            "store loaded"
        );

        Ok(Self {
            path,
            state: Mutex::new(StoreState {
                items,
                next_id: max_id + 1,
            }),
        })
    }

    /// Run `f` against the collection inside the store lock.
    ///
    /// The file is rewritten only when `f` reports [`Mutation::Changed`].
    pub async fn modify<R, F>(&self, f: F) -> Result<R, StorageError>
    where
        F: FnOnce(&mut BTreeMap<i32, T>) -> Mutation<R> + Send,
        R: Send,
    {
        let mut state = self.state.lock().await;
        match f(&mut state.items) {
            Mutation::Changed(value) => {
                self.persist(&state.items).await?;
                Ok(value)
            }
            Mutation::Unchanged(value) => Ok(value),
        }
    }

    async fn insert_new(
        &self,
        state: &mut StoreState<T>,
        mut entity: T,
    ) -> Result<T, StorageError> {
        let id = state.next_id;
        state.next_id += 1;

        entity.set_id(id);
        state.items.insert(id, entity.clone());
        // A failed write leaves the entity in memory.
        self.persist(&state.items).await?;

        tracing::debug!(entity_type = T::entity_type(), id, "entity created");
        Ok(entity)
    }

    async fn persist(&self, items: &BTreeMap<i32, T>) -> Result<(), StorageError> {
        let snapshot: Vec<&T> = items.values().collect();
        let bytes = serde_json::to_vec(&snapshot).map_err(|source| StorageError::Encode {
            what: T::entity_type(),
            source,
        })?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })
    }
}

impl<T: Named> JsonFileStore<T> {
    /// Entities whose name contains `text` (case-sensitive); all when `None`
    pub async fn find(&self, text: Option<&str>) -> Vec<T> {
        let state = self.state.lock().await;
        state
            .items
            .values()
            .filter(|entity| entity.name_contains(text))
            .cloned()
            .collect()
    }

    /// Create `entity` unless one with exactly the same name is stored.
    ///
    /// The name check and the insert happen under the same lock. Returns
    /// `None` on a name conflict, without writing.
    pub async fn create_named(&self, entity: T) -> Result<Option<T>, StorageError> {
        let mut state = self.state.lock().await;
        if state
            .items
            .values()
            .any(|existing| existing.name() == entity.name())
        {
            return Ok(None);
        }
        self.insert_new(&mut state, entity).await.map(Some)
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for JsonFileStore<T> {
    async fn list(&self) -> Vec<T> {
        let state = self.state.lock().await;
        state.items.values().cloned().collect()
    }

    async fn get(&self, id: i32) -> Option<T> {
        let state = self.state.lock().await;
        state.items.get(&id).cloned()
    }

    async fn create(&self, entity: T) -> Result<T, StorageError> {
        let mut state = self.state.lock().await;
        self.insert_new(&mut state, entity).await
    }

    async fn update(&self, entity: T) -> Result<Option<T>, StorageError> {
        let mut state = self.state.lock().await;
        if !state.items.contains_key(&entity.id()) {
            return Ok(None);
        }

        state.items.insert(entity.id(), entity.clone());
        self.persist(&state.items).await?;
        Ok(Some(entity))
    }

    async fn delete(&self, id: i32) -> Result<bool, StorageError> {
        let mut state = self.state.lock().await;
        if state.items.remove(&id).is_none() {
            return Ok(false);
        }

        self.persist(&state.items).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Toy, User};
    use std::path::Path;
    use tempfile::TempDir;

    fn seeded(dir: &TempDir, file: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(file);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn read_toys(path: &Path) -> Vec<Toy> {
        serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let result = JsonFileStore::<Toy>::open(dir.path().join("missing.json"));
        assert!(matches!(result, Err(StorageError::Read { .. })));
    }

    #[test]
    fn test_open_malformed_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = seeded(&dir, "toys.json", "{not json");
        let result = JsonFileStore::<Toy>::open(path);
        assert!(matches!(result, Err(StorageError::Malformed { .. })));
    }

    #[tokio::test]
    async fn test_ids_start_at_one_and_ignore_client_id() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::<Toy>::open(seeded(&dir, "toys.json", "[]")).unwrap();

        let first = store.create(Toy::new(42, "Kite", 1, 4, "outdoor")).await.unwrap();
        let second = store.create(Toy::new(1, "Ball", 1, 2, "sport")).await.unwrap();
        let third = store.create(Toy::new(-7, "Top", 1, 1, "classic")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn test_next_id_follows_largest_loaded_id() {
        let dir = TempDir::new().unwrap();
        let path = seeded(
            &dir,
            "users.json",
            r#"[{"name":"ada","id":3},{"name":"grace","id":9}]"#,
        );
        let store = JsonFileStore::<User>::open(path).unwrap();

        let created = store.create(User::new(0, "linus")).await.unwrap();
        assert_eq!(created.id, 10);
    }

    #[tokio::test]
    async fn test_two_instances_keep_separate_counters() {
        let dir = TempDir::new().unwrap();
        let a = JsonFileStore::<Toy>::open(seeded(&dir, "a.json", "[]")).unwrap();
        let b = JsonFileStore::<Toy>::open(seeded(&dir, "b.json", "[]")).unwrap();

        a.create(Toy::new(0, "Kite", 1, 4, "outdoor")).await.unwrap();
        a.create(Toy::new(0, "Ball", 1, 2, "sport")).await.unwrap();
        let from_b = b.create(Toy::new(0, "Top", 1, 1, "classic")).await.unwrap();

        assert_eq!(from_b.id, 1);
    }

    #[tokio::test]
    async fn test_mutations_rewrite_file() {
        let dir = TempDir::new().unwrap();
        let path = seeded(&dir, "toys.json", "[]");
        let store = JsonFileStore::<Toy>::open(&path).unwrap();

        let kite = store.create(Toy::new(0, "Kite", 1, 4, "outdoor")).await.unwrap();
        store.create(Toy::new(0, "Ball", 1, 2, "sport")).await.unwrap();
        assert_eq!(read_toys(&path).len(), 2);

        let mut changed = kite.clone();
        changed.quantity = 8;
        store.update(changed).await.unwrap();
        assert_eq!(read_toys(&path)[0].quantity, 8);

        assert!(store.delete(kite.id).await.unwrap());
        let on_disk = read_toys(&path);
        assert_eq!(on_disk.len(), 1);
        assert_eq!(on_disk[0].name, "Ball");
    }

    #[tokio::test]
    async fn test_reload_sees_persisted_entities() {
        let dir = TempDir::new().unwrap();
        let path = seeded(&dir, "toys.json", "[]");
        {
            let store = JsonFileStore::<Toy>::open(&path).unwrap();
            store.create(Toy::new(0, "Kite", 1, 4, "outdoor")).await.unwrap();
        }

        let reopened = JsonFileStore::<Toy>::open(&path).unwrap();
        assert_eq!(reopened.get(1).await.unwrap().name, "Kite");
        let next = reopened.create(Toy::new(0, "Ball", 1, 2, "sport")).await.unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::<Toy>::open(seeded(&dir, "toys.json", "[]")).unwrap();
        assert!(store.get(999).await.is_none());
    }

    #[tokio::test]
    async fn test_update_missing_returns_none_and_keeps_file() {
        let dir = TempDir::new().unwrap();
        let path = seeded(&dir, "toys.json", "[]");
        let store = JsonFileStore::<Toy>::open(&path).unwrap();

        let result = store.update(Toy::new(5, "Ghost", 1, 1, "none")).await.unwrap();
        assert!(result.is_none());
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::<Toy>::open(seeded(&dir, "toys.json", "[]")).unwrap();
        assert!(!store.delete(3).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let dir = TempDir::new().unwrap();
        let path = seeded(
            &dir,
            "users.json",
            r#"[{"name":"c","id":7},{"name":"a","id":2},{"name":"b","id":4}]"#,
        );
        let store = JsonFileStore::<User>::open(path).unwrap();

        let ids: Vec<i32> = store.list().await.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2, 4, 7]);
    }

    #[tokio::test]
    async fn test_find_is_case_sensitive_substring() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::<Toy>::open(seeded(&dir, "toys.json", "[]")).unwrap();
        store.create(Toy::new(0, "Stunt Kite", 1, 4, "outdoor")).await.unwrap();
        store.create(Toy::new(0, "kite string", 1, 1, "outdoor")).await.unwrap();
        store.create(Toy::new(0, "Ball", 1, 2, "sport")).await.unwrap();

        let found = store.find(Some("Kite")).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Stunt Kite");

        assert_eq!(store.find(None).await.len(), 3);
        assert!(store.find(Some("zzz")).await.is_empty());
    }

    #[tokio::test]
    async fn test_create_named_refuses_exact_name_only() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::<Toy>::open(seeded(&dir, "toys.json", "[]")).unwrap();

        let kite = store.create_named(Toy::new(0, "Kite", 1, 4, "outdoor")).await.unwrap();
        assert_eq!(kite.unwrap().id, 1);
        assert!(store.create_named(Toy::new(0, "Kite", 3, 1, "sport")).await.unwrap().is_none());
        assert!(store.create_named(Toy::new(0, "Kite 2", 1, 1, "sport")).await.unwrap().is_some());
        assert_eq!(store.list().await.len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_same_name_creates_store_one() {
        use std::sync::Arc;

        let dir = TempDir::new().unwrap();
        let store =
            Arc::new(JsonFileStore::<User>::open(seeded(&dir, "users.json", "[]")).unwrap());

        let mut handles = Vec::new();
        for _ in 0..10 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.create_named(User::new(0, "grace")).await.unwrap().is_some()
            }));
        }

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_modify_unchanged_skips_write() {
        let dir = TempDir::new().unwrap();
        let path = seeded(&dir, "toys.json", "[]");
        let store = JsonFileStore::<Toy>::open(&path).unwrap();

        // Drop the backing file: a write would recreate it.
        std::fs::remove_file(&path).unwrap();
        let seen = store
            .modify(|items| Mutation::Unchanged(items.len()))
            .await
            .unwrap();

        assert_eq!(seen, 0);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_failed_write_keeps_entity_in_memory() {
        let dir = TempDir::new().unwrap();
        let path = seeded(&dir, "toys.json", "[]");
        let store = JsonFileStore::<Toy>::open(&path).unwrap();

        // Replace the file with a directory so the rewrite fails.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let result = store.create(Toy::new(0, "Kite", 1, 4, "outdoor")).await;
        assert!(matches!(result, Err(StorageError::Write { .. })));
        assert_eq!(store.get(1).await.unwrap().name, "Kite");
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_unique_ids() {
        use std::sync::Arc;

        let dir = TempDir::new().unwrap();
        let store =
            Arc::new(JsonFileStore::<Toy>::open(seeded(&dir, "toys.json", "[]")).unwrap());

        let mut handles = Vec::new();
        for i in 0..10 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .create(Toy::new(0, format!("toy-{i}"), 1, 1, "bulk"))
                    .await
                    .unwrap()
                    .id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }
}
