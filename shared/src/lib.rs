//! Task list domain: the task model, the filter, and a task store that
//! mirrors its collection into a single key-value persistence slot.

pub mod codec;
pub mod filter;
pub mod storage;
pub mod store;
pub mod task;

pub use filter::Filter;
pub use storage::{KeyValueStore, MemoryStorage, StorageError};
pub use store::{StoreError, TaskCounts, TaskStore, DEFAULT_STORAGE_KEY};
pub use task::{Task, TaskId};
