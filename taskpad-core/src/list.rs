//! Task list state machine.
//!
//! [`TaskList`] owns the ordered task collection and the editing sub-state
//! (a draft copy of at most one task). Mutating operations return whether
//! the committed collection changed, so the caller can persist explicitly
//! at the call site instead of relying on an implicit reactive effect.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::task::{Task, TaskId};

/// The single task list backing the screen.
///
/// Starts empty and unhydrated; [`hydrate`](Self::hydrate) replaces the
/// collection wholesale with previously persisted state. Insertion order
/// is display order and there is no reordering operation.
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    /// Draft copy of the task currently open for editing, if any. The
    /// edit surface is visible exactly when this is `Some`.
    draft: Option<Task>,
    hydrated: bool,
    /// Highest id allocated or loaded so far. Deleting a task never
    /// lowers it, so deleted ids are not reassigned.
    max_allocated: u64,
}

impl TaskList {
    /// Creates an empty, unhydrated list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: Vec::new(),
            draft: None,
            hydrated: false,
            max_allocated: 0,
        }
    }

    /// Returns the current timestamp in milliseconds since epoch.
    fn now_ms() -> u64 {
        u64::try_from(
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis(),
        )
        .unwrap_or(u64::MAX)
    }

    /// Allocates the next task id: the creation timestamp, bumped past
    /// every id allocated or loaded so far. Two tasks created within the
    /// same millisecond still get distinct, increasing ids, and a deleted
    /// task's id is never handed out again.
    fn fresh_id(&mut self) -> TaskId {
        let ms = Self::now_ms().max(self.max_allocated.saturating_add(1));
        self.max_allocated = ms;
        TaskId::from_millis(ms)
    }

    /// Replaces the collection wholesale with loaded state.
    ///
    /// Hydration is not a user mutation and does not require a persist;
    /// the saved state is by definition what was just loaded.
    pub fn hydrate(&mut self, tasks: Vec<Task>) {
        if let Some(max) = tasks.iter().map(|t| t.id.as_millis()).max() {
            self.max_allocated = self.max_allocated.max(max);
        }
        self.tasks = tasks;
        self.hydrated = true;
    }

    /// Appends a new task with the trimmed text.
    ///
    /// A blank or whitespace-only `raw` is a no-op. Returns whether the
    /// collection changed.
    pub fn add(&mut self, raw: &str) -> bool {
        let text = raw.trim();
        if text.is_empty() {
            return false;
        }
        let task = Task::new(self.fresh_id(), text.to_string());
        self.tasks.push(task);
        true
    }

    /// Flips the `completed` flag of the matching task.
    ///
    /// Returns whether the collection changed (false if `id` is absent).
    pub fn toggle(&mut self, id: TaskId) -> bool {
        self.tasks.iter_mut().find(|t| t.id == id).is_some_and(|t| {
            t.completed = !t.completed;
            true
        })
    }

    /// Removes the matching task, preserving the relative order of the
    /// rest. Returns whether the collection changed.
    pub fn delete(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Opens the edit surface with a draft copy of the matching task.
    ///
    /// Returns whether a draft was opened (false if `id` is absent).
    pub fn open_edit(&mut self, id: TaskId) -> bool {
        match self.tasks.iter().find(|t| t.id == id) {
            Some(task) => {
                self.draft = Some(task.clone());
                true
            }
            None => false,
        }
    }

    /// Replaces the draft's text. The committed collection is untouched
    /// until [`commit_edit`](Self::commit_edit). No-op without a draft.
    pub fn update_draft_text(&mut self, text: &str) {
        if let Some(draft) = self.draft.as_mut() {
            draft.text = text.to_string();
        }
    }

    /// Commits the draft back into the collection and closes the edit
    /// surface.
    ///
    /// The draft text is trimmed before acceptance; a draft trimmed to
    /// empty behaves like a cancel. Returns whether the collection
    /// changed.
    pub fn commit_edit(&mut self) -> bool {
        let Some(mut draft) = self.draft.take() else {
            return false;
        };
        let text = draft.text.trim();
        if text.is_empty() {
            return false;
        }
        draft.text = text.to_string();
        match self.tasks.iter_mut().find(|t| t.id == draft.id) {
            Some(slot) => {
                *slot = draft;
                true
            }
            None => false,
        }
    }

    /// Discards the draft and closes the edit surface. Never a change to
    /// the committed collection.
    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    /// The committed collection, in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The draft currently open for editing, if any.
    #[must_use]
    pub const fn editing(&self) -> Option<&Task> {
        self.draft.as_ref()
    }

    /// Whether the startup load has been applied yet.
    #[must_use]
    pub const fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Number of committed tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the committed collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of completed tasks.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}
