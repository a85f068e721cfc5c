//! Edit-surface tests driven through key events: the draft copy never
//! leaks into the committed collection until an explicit commit.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use taskpad::app::{App, AppCommand, Focus};
use taskpad_core::Task;

fn press(app: &mut App, code: KeyCode) -> Option<AppCommand> {
    app.handle_key_event(KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    })
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// App with the given tasks committed, list focused.
fn app_with(texts: &[&str]) -> App {
    let mut app = App::new();
    app.apply_hydration(Vec::new());
    for text in texts {
        type_text(&mut app, text);
        assert_eq!(press(&mut app, KeyCode::Enter), Some(AppCommand::Persist));
    }
    app.focus = Focus::List;
    app
}

#[test]
fn edit_surface_visible_iff_draft_open() {
    let mut app = app_with(&["a"]);
    assert!(app.list.editing().is_none());
    press(&mut app, KeyCode::Char('e'));
    assert!(app.list.editing().is_some());
    press(&mut app, KeyCode::Esc);
    assert!(app.list.editing().is_none());
}

#[test]
fn cancel_emits_no_persist_regardless_of_draft_updates() {
    let mut app = app_with(&["untouched"]);
    let before: Vec<Task> = app.list.tasks().to_vec();

    press(&mut app, KeyCode::Char('e'));
    type_text(&mut app, " heavily");
    type_text(&mut app, " edited");
    let cmd = press(&mut app, KeyCode::Esc);

    assert_eq!(cmd, None);
    assert_eq!(app.list.tasks(), before.as_slice());
}

#[test]
fn draft_updates_alone_never_request_persist() {
    let mut app = app_with(&["stable"]);
    press(&mut app, KeyCode::Char('e'));
    for c in "xyz".chars() {
        assert_eq!(press(&mut app, KeyCode::Char(c)), None);
    }
    assert_eq!(press(&mut app, KeyCode::Backspace), None);
}

#[test]
fn commit_persists_text_change_in_place() {
    let mut app = app_with(&["first", "second", "third"]);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char(' ')); // complete "second"
    press(&mut app, KeyCode::Char('e'));
    for _ in 0.."second".len() {
        press(&mut app, KeyCode::Backspace);
    }
    type_text(&mut app, "2nd");
    let cmd = press(&mut app, KeyCode::Enter);

    assert_eq!(cmd, Some(AppCommand::Persist));
    let texts: Vec<&str> = app.list.tasks().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "2nd", "third"]);
    assert!(app.list.tasks()[1].completed);
    assert!(!app.list.tasks()[0].completed);
}

#[test]
fn commit_of_blanked_draft_acts_as_cancel() {
    let mut app = app_with(&["keep"]);
    press(&mut app, KeyCode::Char('e'));
    for _ in 0.."keep".len() {
        press(&mut app, KeyCode::Backspace);
    }
    let cmd = press(&mut app, KeyCode::Enter);

    assert_eq!(cmd, None);
    assert!(app.list.editing().is_none());
    assert_eq!(app.list.tasks()[0].text, "keep");
}

#[test]
fn reopening_edit_starts_from_committed_text() {
    let mut app = app_with(&["base"]);
    press(&mut app, KeyCode::Char('e'));
    type_text(&mut app, " draft");
    press(&mut app, KeyCode::Esc);

    press(&mut app, KeyCode::Char('e'));
    assert_eq!(app.list.editing().map(|d| d.text.as_str()), Some("base"));
}
