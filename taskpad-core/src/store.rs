//! Task store: load/save of the whole collection as one JSON blob.
//!
//! Every failure is absorbed at this boundary: read failures and
//! malformed stored data are logged and substituted with an empty
//! collection; write failures are logged and dropped (fire-and-forget,
//! no retry). Callers never see an error. A non-blocking
//! [`StoreWarning`] channel lets the UI surface what happened without
//! changing that contract.

use tokio::sync::mpsc;

use crate::kv::KeyValue;
use crate::task::Task;

/// Reserved key under which the serialized collection is stored.
pub const TASKS_KEY: &str = "tasks";

/// Warning emitted when a storage operation was absorbed.
///
/// The UI layer should watch for these and display a non-blocking
/// notification; nothing else reacts to them.
#[derive(Debug, Clone)]
pub enum StoreWarning {
    /// The persisted collection could not be read or parsed; an empty
    /// collection was substituted.
    LoadFailed {
        /// Description of the error.
        reason: String,
    },
    /// A save did not reach the persistence layer; in-memory state
    /// diverges from disk until the next successful save.
    SaveFailed {
        /// Description of the error.
        reason: String,
    },
}

/// Persistence adapter for the whole task collection.
///
/// Each save fully overwrites the prior value under [`TASKS_KEY`]; there
/// is no per-task granularity and no versioning.
pub struct TaskStore<K: KeyValue> {
    kv: K,
    warning_tx: Option<mpsc::Sender<StoreWarning>>,
}

impl<K: KeyValue> TaskStore<K> {
    /// Creates a store over the given key-value backend, without a
    /// warning channel.
    #[must_use]
    pub const fn new(kv: K) -> Self {
        Self {
            kv,
            warning_tx: None,
        }
    }

    /// Like [`new`](Self::new), but also returns a receiver for
    /// [`StoreWarning`] events the UI can consume.
    #[must_use]
    pub fn with_warnings(kv: K, buffer: usize) -> (Self, mpsc::Receiver<StoreWarning>) {
        let (tx, rx) = mpsc::channel(buffer);
        let store = Self {
            kv,
            warning_tx: Some(tx),
        };
        (store, rx)
    }

    /// Loads the persisted collection.
    ///
    /// An absent key is a normal first run and yields an empty
    /// collection. Read failures and malformed data also yield an empty
    /// collection, after logging and emitting a warning.
    pub async fn load(&self) -> Vec<Task> {
        let raw = match self.kv.get(TASKS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "task load failed, starting with an empty list");
                self.warn(StoreWarning::LoadFailed {
                    reason: err.to_string(),
                });
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(tasks) => tasks,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "stored task data is malformed, starting with an empty list"
                );
                self.warn(StoreWarning::LoadFailed {
                    reason: err.to_string(),
                });
                Vec::new()
            }
        }
    }

    /// Persists the collection, fully overwriting the prior value.
    ///
    /// Failures are logged and dropped; the caller gets no signal and no
    /// retry is attempted.
    pub async fn save(&self, tasks: &[Task]) {
        let blob = match serde_json::to_string(tasks) {
            Ok(blob) => blob,
            Err(err) => {
                tracing::warn!(error = %err, "task serialization failed, save dropped");
                self.warn(StoreWarning::SaveFailed {
                    reason: err.to_string(),
                });
                return;
            }
        };

        if let Err(err) = self.kv.set(TASKS_KEY, &blob).await {
            tracing::warn!(
                error = %err,
                "task save failed, change may not survive a restart"
            );
            self.warn(StoreWarning::SaveFailed {
                reason: err.to_string(),
            });
        }
    }

    /// Best-effort warning emission; if the channel is full, drop it.
    fn warn(&self, warning: StoreWarning) {
        if let Some(tx) = &self.warning_tx {
            let _ = tx.try_send(warning);
        }
    }
}
