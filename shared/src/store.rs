//! The persistent task store.
//!
//! Storage is the source of truth: every read reloads the slot, and every
//! mutation reloads, modifies and rewrites the whole collection in one call.
//! Two stores over the same slot (two browser tabs) do not coordinate; the
//! last write wins.

use tracing::{debug, warn};

use crate::codec;
use crate::filter::Filter;
use crate::storage::{KeyValueStore, StorageError};
use crate::task::{Task, TaskId};

/// Slot the collection lives under unless [`TaskStore::with_key`] says otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "task";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("failed to encode tasks: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskCounts {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
}

impl TaskCounts {
    pub fn tally(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.done).count();
        Self {
            total: tasks.len(),
            pending: tasks.len() - completed,
            completed,
        }
    }
}

#[derive(Clone)]
pub struct TaskStore<S> {
    storage: S,
    key: String,
    tasks: Vec<Task>,
}

impl<S: KeyValueStore> TaskStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            tasks: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    /// Prepends a new pending task and persists.
    ///
    /// The caller is responsible for trimming and rejecting empty text.
    pub fn add(&mut self, text: impl Into<String>) -> Result<Task, StoreError> {
        self.reload();
        let task = Task::new(text);
        self.tasks.insert(0, task.clone());
        self.persist()?;
        debug!(id = %task.id, "task added");
        Ok(task)
    }

    /// Removes the task with `id`. An unknown id leaves the collection and
    /// the slot untouched and returns `Ok(None)`.
    pub fn remove(&mut self, id: &TaskId) -> Result<Option<Task>, StoreError> {
        self.reload();
        let Some(index) = self.position(id) else {
            debug!(%id, "remove ignored, no such task");
            return Ok(None);
        };
        let removed = self.tasks.remove(index);
        self.persist()?;
        debug!(%id, "task removed");
        Ok(Some(removed))
    }

    /// Flips completion and returns the new state, or `None` for an unknown id.
    pub fn toggle_done(&mut self, id: &TaskId) -> Result<Option<bool>, StoreError> {
        self.reload();
        let Some(index) = self.position(id) else {
            debug!(%id, "toggle ignored, no such task");
            return Ok(None);
        };
        let done = !self.tasks[index].done;
        self.tasks[index].done = done;
        self.persist()?;
        debug!(%id, done, "task toggled");
        Ok(Some(done))
    }

    /// Replaces the text verbatim. Returns whether a task matched.
    pub fn update_text(
        &mut self,
        id: &TaskId,
        text: impl Into<String>,
    ) -> Result<bool, StoreError> {
        self.reload();
        let Some(index) = self.position(id) else {
            debug!(%id, "update ignored, no such task");
            return Ok(false);
        };
        self.tasks[index].text = text.into();
        self.persist()?;
        debug!(%id, "task text updated");
        Ok(true)
    }

    /// Drops every completed task and returns how many went.
    pub fn clear_completed(&mut self) -> Result<usize, StoreError> {
        self.reload();
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.done);
        let removed = before - self.tasks.len();
        if removed > 0 {
            self.persist()?;
            debug!(removed, "completed tasks cleared");
        }
        Ok(removed)
    }

    pub fn get_by_id(&mut self, id: &TaskId) -> Option<Task> {
        self.reload();
        self.position(id).map(|index| self.tasks[index].clone())
    }

    pub fn list(&mut self, filter: Filter) -> Vec<Task> {
        self.reload();
        self.tasks
            .iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect()
    }

    /// `list(filter)` together with counts over the whole collection, from
    /// a single reload.
    pub fn snapshot(&mut self, filter: Filter) -> (Vec<Task>, TaskCounts) {
        let visible = self.list(filter);
        (visible, TaskCounts::tally(&self.tasks))
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| &task.id == id)
    }

    // Absent, unreadable or malformed slot content all mean "no tasks".
    fn reload(&mut self) {
        let tasks = match self.storage.get(&self.key) {
            Ok(Some(raw)) => match codec::decode(&raw) {
                Ok(tasks) => tasks,
                Err(error) => {
                    warn!(%error, key = %self.key, "discarding malformed task data");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(error) => {
                warn!(%error, key = %self.key, "failed to read tasks");
                Vec::new()
            }
        };
        self.tasks = tasks;
    }

    fn persist(&self) -> Result<(), StoreError> {
        let raw = codec::encode(&self.tasks)?;
        self.storage.set(&self.key, &raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use pretty_assertions::assert_eq;

    fn texts(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|task| task.text.as_str()).collect()
    }

    fn store_with(items: &[&str]) -> TaskStore<MemoryStorage> {
        let mut store = TaskStore::new(MemoryStorage::new());
        for item in items.iter().rev() {
            store.add(*item).unwrap();
        }
        store
    }

    struct BrokenStorage;

    impl KeyValueStore for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Read("denied".to_owned()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write("quota exceeded".to_owned()))
        }
    }

    #[test]
    fn added_task_comes_first_and_pending() {
        let mut store = store_with(&["older"]);
        let added = store.add("Buy milk").unwrap();

        let all = store.list(Filter::All);
        assert_eq!(all[0], added);
        assert_eq!(texts(&all), vec!["Buy milk", "older"]);
        assert!(!all[0].done);
    }

    #[test]
    fn add_writes_the_slot() {
        let mut store = TaskStore::new(MemoryStorage::new());
        let task = store.add("Buy milk").unwrap();

        let raw = store.storage().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(codec::decode(&raw).unwrap(), vec![task]);
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut store = store_with(&["a"]);
        let id = store.list(Filter::All)[0].id.clone();

        assert_eq!(store.toggle_done(&id).unwrap(), Some(true));
        assert_eq!(store.toggle_done(&id).unwrap(), Some(false));
        assert!(!store.get_by_id(&id).unwrap().done);
    }

    #[test]
    fn filters_partition_the_collection() {
        let mut store = store_with(&["a", "b", "c", "d"]);
        let all = store.list(Filter::All);
        store.toggle_done(&all[1].id).unwrap();
        store.toggle_done(&all[3].id).unwrap();

        assert_eq!(texts(&store.list(Filter::All)), vec!["a", "b", "c", "d"]);
        assert_eq!(texts(&store.list(Filter::Pending)), vec!["a", "c"]);
        assert_eq!(texts(&store.list(Filter::Completed)), vec!["b", "d"]);
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut store = store_with(&["a", "b", "c"]);
        let b = store.list(Filter::All)[1].clone();

        assert_eq!(store.remove(&b.id).unwrap(), Some(b));
        assert_eq!(texts(&store.list(Filter::All)), vec!["a", "c"]);
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let mut store = store_with(&["a", "b", "c"]);
        let before = store.storage().get(DEFAULT_STORAGE_KEY).unwrap();
        let missing = TaskId::from("does-not-exist");

        assert_eq!(store.remove(&missing).unwrap(), None);
        assert_eq!(store.toggle_done(&missing).unwrap(), None);
        assert!(!store.update_text(&missing, "x").unwrap());
        assert_eq!(store.get_by_id(&missing), None);

        assert_eq!(store.storage().get(DEFAULT_STORAGE_KEY).unwrap(), before);
        assert_eq!(texts(&store.list(Filter::All)), vec!["a", "b", "c"]);
    }

    #[test]
    fn update_text_is_verbatim() {
        let mut store = store_with(&["a"]);
        let id = store.list(Filter::All)[0].id.clone();

        assert!(store.update_text(&id, "  padded  ").unwrap());
        assert_eq!(store.get_by_id(&id).unwrap().text, "  padded  ");
    }

    #[test]
    fn clear_completed_drops_only_done_tasks() {
        let mut store = store_with(&["a", "b", "c"]);
        let all = store.list(Filter::All);
        store.toggle_done(&all[0].id).unwrap();
        store.toggle_done(&all[2].id).unwrap();

        assert_eq!(store.clear_completed().unwrap(), 2);
        assert_eq!(texts(&store.list(Filter::All)), vec!["b"]);
        assert_eq!(store.clear_completed().unwrap(), 0);
    }

    #[test]
    fn counts_follow_completion() {
        let mut store = store_with(&["a", "b", "c"]);
        let first = store.list(Filter::All)[0].id.clone();
        store.toggle_done(&first).unwrap();

        let (visible, counts) = store.snapshot(Filter::Completed);
        assert_eq!(texts(&visible), vec!["a"]);
        assert_eq!(
            counts,
            TaskCounts {
                total: 3,
                pending: 2,
                completed: 1,
            }
        );
    }

    #[test]
    fn malformed_slot_reads_as_empty() {
        let storage = MemoryStorage::new();
        storage.set(DEFAULT_STORAGE_KEY, "{not json").unwrap();
        let mut store = TaskStore::new(storage);

        assert!(store.list(Filter::All).is_empty());

        store.add("fresh").unwrap();
        assert_eq!(texts(&store.list(Filter::All)), vec!["fresh"]);
    }

    #[test]
    fn custom_key_is_isolated() {
        let storage = MemoryStorage::new();
        let mut main_list = TaskStore::new(storage.clone());
        let mut other = TaskStore::with_key(storage, "task-archive");

        main_list.add("in main list").unwrap();
        assert!(other.list(Filter::All).is_empty());
    }

    #[test]
    fn unreadable_storage_reads_as_empty() {
        let mut store = TaskStore::new(BrokenStorage);
        assert!(store.list(Filter::All).is_empty());
        assert_eq!(store.snapshot(Filter::All), (Vec::new(), TaskCounts::default()));
    }

    #[test]
    fn snapshot_reads_the_slot_once() {
        #[derive(Default)]
        struct CountingReads {
            inner: MemoryStorage,
            reads: std::cell::Cell<usize>,
        }

        impl KeyValueStore for CountingReads {
            fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
                self.reads.set(self.reads.get() + 1);
                self.inner.get(key)
            }

            fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
                self.inner.set(key, value)
            }
        }

        let mut store = TaskStore::new(CountingReads::default());
        store.add("a").unwrap();
        let before = store.storage().reads.get();

        store.snapshot(Filter::Pending);
        assert_eq!(store.storage().reads.get() - before, 1);
    }

    #[test]
    fn failed_write_surfaces_as_error() {
        let mut store = TaskStore::new(BrokenStorage);
        let err = store.add("lost").unwrap_err();
        assert!(matches!(
            err,
            StoreError::Storage(StorageError::Write(_))
        ));
    }
}
