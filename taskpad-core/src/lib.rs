//! Core domain library for `taskpad`: the task model, the list state
//! machine, and the persistence adapter over a string key-value store.

pub mod kv;
pub mod list;
pub mod store;
pub mod task;

pub use kv::{FileKv, KeyValue, KvError, MemoryKv};
pub use list::TaskList;
pub use store::{StoreWarning, TASKS_KEY, TaskStore};
pub use task::{Task, TaskId};
