//! Concurrent in-memory task store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use crate::task::Task;

/// In-memory store of tasks keyed by id, safe for concurrent access.
///
/// Ids are issued by an atomic sequence starting at 1 and are never reused,
/// even after deletion. Mutations of a single id are linearizable: the
/// mutator passed to [`TaskStore::update`] runs under the write lock, so no
/// reader ever observes a partially-applied change.
#[derive(Debug)]
pub struct TaskStore {
    tasks: RwLock<HashMap<u64, Task>>,
    id_seq: AtomicU64,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: RwLock::new(HashMap::new()),
            id_seq: AtomicU64::new(1),
        }
    }

    /// Issue the next id. Strictly increasing; no two callers ever receive
    /// the same value.
    pub fn allocate_id(&self) -> u64 {
        self.id_seq.fetch_add(1, Ordering::Relaxed)
    }

    /// Store a task under its own id, replacing any previous entry.
    pub async fn insert(&self, task: Task) {
        self.tasks.write().await.insert(task.id, task);
    }

    pub async fn get(&self, id: u64) -> Option<Task> {
        self.tasks.read().await.get(&id).cloned()
    }

    /// Apply `mutate` to the task with the given id, if present, and return
    /// the updated task. No-op returning `None` when the id is unknown.
    pub async fn update(&self, id: u64, mutate: impl FnOnce(&mut Task)) -> Option<Task> {
        let mut tasks = self.tasks.write().await;
        let task = tasks.get_mut(&id)?;
        mutate(task);
        Some(task.clone())
    }

    /// Remove and return the task with the given id.
    pub async fn remove(&self, id: u64) -> Option<Task> {
        self.tasks.write().await.remove(&id)
    }

    /// Point-in-time snapshot of all tasks. Iteration order is unspecified.
    pub async fn list_all(&self) -> Vec<Task> {
        self.tasks.read().await.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn insert_get_remove_roundtrip() {
        let store = TaskStore::new();
        let id = store.allocate_id();
        store.insert(Task::new(id, "write tests".to_string(), false)).await;

        let fetched = store.get(id).await.unwrap();
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.title, "write tests");
        assert!(!fetched.completed);

        let removed = store.remove(id).await.unwrap();
        assert_eq!(removed, fetched);
        assert!(store.get(id).await.is_none());
        assert!(store.remove(id).await.is_none());
    }

    #[tokio::test]
    async fn ids_start_at_one_and_increase() {
        let store = TaskStore::new();
        assert_eq!(store.allocate_id(), 1);
        assert_eq!(store.allocate_id(), 2);
        assert_eq!(store.allocate_id(), 3);
    }

    #[tokio::test]
    async fn update_applies_mutator_only_when_present() {
        let store = TaskStore::new();
        let id = store.allocate_id();
        store.insert(Task::new(id, "old".to_string(), false)).await;

        let updated = store
            .update(id, |t| {
                t.title = "new".to_string();
                t.completed = true;
            })
            .await
            .unwrap();
        assert_eq!(updated.title, "new");
        assert!(updated.completed);
        assert_eq!(store.get(id).await.unwrap(), updated);

        assert!(store.update(999, |t| t.completed = true).await.is_none());
    }

    #[tokio::test]
    async fn list_all_snapshots_every_task() {
        let store = TaskStore::new();
        for title in ["a", "b", "c"] {
            let id = store.allocate_id();
            store.insert(Task::new(id, title.to_string(), false)).await;
        }
        let mut titles: Vec<String> =
            store.list_all().await.into_iter().map(|t| t.title).collect();
        titles.sort();
        assert_eq!(titles, ["a", "b", "c"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_allocation_yields_contiguous_distinct_ids() {
        let store = Arc::new(TaskStore::new());
        let mut handles = Vec::new();
        for _ in 0..64 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let id = store.allocate_id();
                store.insert(Task::new(id, format!("task {id}"), false)).await;
                id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        let expected: Vec<u64> = (1..=64).collect();
        assert_eq!(ids, expected);
        assert_eq!(store.list_all().await.len(), 64);
    }
}
