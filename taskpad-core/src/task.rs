//! Task model and wire format.
//!
//! The persisted form is a bare JSON array of task records:
//! `[{ "id": 1700000000000, "text": "Buy milk", "completed": false }]`.

use serde::{Deserialize, Serialize};

/// Unique identifier for a task.
///
/// Assigned at creation from the current timestamp in milliseconds since
/// epoch, bumped where needed to stay unique within the collection, and
/// never reused after deletion. Serialized as a bare JSON number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Creates a `TaskId` from a milliseconds-since-epoch value.
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Returns the raw milliseconds-since-epoch value.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned at creation.
    pub id: TaskId,
    /// User-supplied description, trimmed and non-empty.
    pub text: String,
    /// Whether the task has been completed.
    pub completed: bool,
}

impl Task {
    /// Creates a new, uncompleted task.
    #[must_use]
    pub const fn new(id: TaskId, text: String) -> Self {
        Self {
            id,
            text,
            completed: false,
        }
    }
}
