//! Application state and event handling.
//!
//! [`App`] wraps the [`TaskList`] state machine with everything the
//! screen needs: the pending-input buffer, row selection, panel focus,
//! the edit-modal cursor, and the latest notice line. Key events come in
//! through [`handle_key_event`](App::handle_key_event); when a committed
//! mutation happened the call returns [`AppCommand::Persist`] so the
//! event loop can save at the call site.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskpad_core::{Task, TaskId, TaskList};

/// Which part of the screen is focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// New-task input bar is focused (default).
    Input,
    /// Task list is focused.
    List,
}

/// Side effect requested by a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// The committed collection changed and should be saved.
    Persist,
}

/// Main application state.
pub struct App {
    /// The task list state machine.
    pub list: TaskList,
    /// Pending new-task input buffer.
    pub input: String,
    /// Cursor position in the input buffer (byte index).
    pub cursor_position: usize,
    /// Selected row in the task list.
    pub selected: usize,
    /// Which panel is focused.
    pub focus: Focus,
    /// Cursor position in the edit modal (byte index into the draft).
    pub edit_cursor: usize,
    /// Latest notice for the status bar (storage warnings, validation).
    pub notice: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
    max_task_text_len: usize,
}

impl App {
    /// Creates a fresh, unhydrated application state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            list: TaskList::new(),
            input: String::new(),
            cursor_position: 0,
            selected: 0,
            focus: Focus::Input,
            edit_cursor: 0,
            notice: None,
            should_quit: false,
            max_task_text_len: 256,
        }
    }

    /// Sets the maximum accepted task text length in characters.
    #[must_use]
    pub const fn with_max_task_text_len(mut self, len: usize) -> Self {
        self.max_task_text_len = len;
        self
    }

    /// Applies the startup load, replacing the collection wholesale.
    pub fn apply_hydration(&mut self, tasks: Vec<Task>) {
        self.list.hydrate(tasks);
        self.clamp_selection();
    }

    /// Records a notice line for the status bar.
    pub fn set_notice(&mut self, notice: String) {
        self.notice = Some(notice);
    }

    /// Handles a key event, returning a command for the event loop when
    /// a committed mutation happened.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<AppCommand> {
        let cmd = self.dispatch_key(key);
        // A committed mutation makes any earlier notice stale.
        if cmd == Some(AppCommand::Persist) {
            self.notice = None;
        }
        cmd
    }

    fn dispatch_key(&mut self, key: KeyEvent) -> Option<AppCommand> {
        // The edit modal captures all input while open.
        if self.list.editing().is_some() {
            return self.handle_edit_key(key);
        }

        // Global shortcuts
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return None;
            }
            (KeyCode::Tab | KeyCode::BackTab, _) => {
                self.cycle_focus();
                return None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::List => self.handle_list_key(key),
        }
    }

    /// Key handling while the input bar is focused.
    fn handle_input_key(&mut self, key: KeyEvent) -> Option<AppCommand> {
        match key.code {
            KeyCode::Enter => self.submit_task(),
            KeyCode::Char(c) => {
                self.input.insert(self.cursor_position, c);
                self.cursor_position += c.len_utf8();
                None
            }
            KeyCode::Backspace => {
                self.backspace_input();
                None
            }
            KeyCode::Left => {
                self.cursor_position = prev_boundary(&self.input, self.cursor_position);
                None
            }
            KeyCode::Right => {
                self.cursor_position = next_boundary(&self.input, self.cursor_position);
                None
            }
            KeyCode::Home => {
                self.cursor_position = 0;
                None
            }
            KeyCode::End => {
                self.cursor_position = self.input.len();
                None
            }
            _ => None,
        }
    }

    /// Key handling while the task list is focused.
    fn handle_list_key(&mut self, key: KeyEvent) -> Option<AppCommand> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.list.len() {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Char(' ') => {
                let id = self.selected_id()?;
                self.list.toggle(id).then_some(AppCommand::Persist)
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                let id = self.selected_id()?;
                let changed = self.list.delete(id);
                self.clamp_selection();
                changed.then_some(AppCommand::Persist)
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                let id = self.selected_id()?;
                if self.list.open_edit(id) {
                    self.edit_cursor = self.list.editing().map_or(0, |d| d.text.len());
                }
                None
            }
            _ => None,
        }
    }

    /// Key handling while the edit modal is open.
    fn handle_edit_key(&mut self, key: KeyEvent) -> Option<AppCommand> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
                None
            }
            (KeyCode::Esc, _) => {
                self.list.cancel_edit();
                None
            }
            (KeyCode::Enter, _) => {
                let draft_len = self
                    .list
                    .editing()
                    .map_or(0, |d| d.text.trim().chars().count());
                if draft_len > self.max_task_text_len {
                    self.set_notice(format!(
                        "Task text too long (max {} characters)",
                        self.max_task_text_len
                    ));
                    return None;
                }
                self.list.commit_edit().then_some(AppCommand::Persist)
            }
            (KeyCode::Char(c), _) => {
                self.edit_draft(|text, cursor| {
                    text.insert(*cursor, c);
                    *cursor += c.len_utf8();
                });
                None
            }
            (KeyCode::Backspace, _) => {
                self.edit_draft(|text, cursor| {
                    if *cursor > 0 {
                        let prev = prev_boundary(text, *cursor);
                        text.remove(prev);
                        *cursor = prev;
                    }
                });
                None
            }
            (KeyCode::Left, _) => {
                let text = self.draft_text();
                self.edit_cursor = prev_boundary(&text, self.edit_cursor);
                None
            }
            (KeyCode::Right, _) => {
                let text = self.draft_text();
                self.edit_cursor = next_boundary(&text, self.edit_cursor);
                None
            }
            (KeyCode::Home, _) => {
                self.edit_cursor = 0;
                None
            }
            (KeyCode::End, _) => {
                self.edit_cursor = self.draft_text().len();
                None
            }
            _ => None,
        }
    }

    /// Submits the input buffer as a new task.
    ///
    /// A blank buffer is a no-op; a too-long one is rejected with a
    /// notice and kept so the user can shorten it.
    fn submit_task(&mut self) -> Option<AppCommand> {
        if self.input.trim().chars().count() > self.max_task_text_len {
            self.set_notice(format!(
                "Task text too long (max {} characters)",
                self.max_task_text_len
            ));
            return None;
        }
        if !self.list.add(&self.input) {
            return None;
        }
        self.input.clear();
        self.cursor_position = 0;
        Some(AppCommand::Persist)
    }

    /// Applies a closure to the draft text plus the modal cursor, then
    /// writes the result back through the state machine.
    fn edit_draft(&mut self, f: impl FnOnce(&mut String, &mut usize)) {
        let Some(draft) = self.list.editing() else {
            return;
        };
        let mut text = draft.text.clone();
        let mut cursor = self.edit_cursor.min(text.len());
        f(&mut text, &mut cursor);
        self.list.update_draft_text(&text);
        self.edit_cursor = cursor;
    }

    fn draft_text(&self) -> String {
        self.list.editing().map(|d| d.text.clone()).unwrap_or_default()
    }

    /// Id of the currently selected task, if the list is non-empty.
    #[must_use]
    pub fn selected_id(&self) -> Option<TaskId> {
        self.list.tasks().get(self.selected).map(|t| t.id)
    }

    const fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::List,
            Focus::List => Focus::Input,
        };
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.list.len().saturating_sub(1));
    }

    fn backspace_input(&mut self) {
        if self.cursor_position > 0 {
            let prev = prev_boundary(&self.input, self.cursor_position);
            self.input.remove(prev);
            self.cursor_position = prev;
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Previous char boundary in `s` strictly before `pos` (0 at the start).
fn prev_boundary(s: &str, pos: usize) -> usize {
    s[..pos.min(s.len())]
        .char_indices()
        .next_back()
        .map_or(0, |(i, _)| i)
}

/// Next char boundary in `s` strictly after `pos` (`s.len()` at the end).
fn next_boundary(s: &str, pos: usize) -> usize {
    if pos >= s.len() {
        return s.len();
    }
    s[pos..]
        .chars()
        .next()
        .map_or(s.len(), |c| pos + c.len_utf8())
}
