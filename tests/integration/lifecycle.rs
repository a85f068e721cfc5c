//! End-to-end lifecycle tests: hydrate from the store, mutate through
//! key events, persist after every committed change, restart.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use taskpad::app::{App, AppCommand, Focus};
use taskpad_core::{MemoryKv, StoreWarning, TASKS_KEY, TaskStore};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

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

/// Mirrors the event loop's persist policy: save the full collection
/// whenever a key event reports a committed mutation.
async fn dispatch(
    app: &mut App,
    store: &TaskStore<MemoryKv>,
    code: KeyCode,
) -> Option<AppCommand> {
    let cmd = press(app, code);
    if cmd == Some(AppCommand::Persist) {
        store.save(app.list.tasks()).await;
    }
    cmd
}

// ---------------------------------------------------------------------------
// End-to-end scenario
// ---------------------------------------------------------------------------

#[tokio::test]
async fn full_lifecycle_against_empty_store() {
    let kv = MemoryKv::new();
    let store = TaskStore::new(kv.clone());
    let mut app = App::new();

    // initialize: hydrate from an empty store.
    app.apply_hydration(store.load().await);
    assert!(app.list.is_hydrated());
    assert!(app.list.is_empty());

    // addTask("Buy milk")
    type_text(&mut app, "Buy milk");
    assert_eq!(
        dispatch(&mut app, &store, KeyCode::Enter).await,
        Some(AppCommand::Persist)
    );
    assert_eq!(app.list.len(), 1);
    let id = app.list.tasks()[0].id;
    assert_eq!(app.list.tasks()[0].text, "Buy milk");
    assert!(!app.list.tasks()[0].completed);

    // toggleComplete
    app.focus = Focus::List;
    assert_eq!(
        dispatch(&mut app, &store, KeyCode::Char(' ')).await,
        Some(AppCommand::Persist)
    );
    assert!(app.list.tasks()[0].completed);
    assert_eq!(app.list.tasks()[0].id, id);

    // deleteTask
    assert_eq!(
        dispatch(&mut app, &store, KeyCode::Char('d')).await,
        Some(AppCommand::Persist)
    );
    assert!(app.list.is_empty());

    // The persisted blob is now the empty array.
    assert_eq!(kv.raw(TASKS_KEY).await.as_deref(), Some("[]"));
}

#[tokio::test]
async fn tasks_survive_a_restart() {
    let kv = MemoryKv::new();

    // First session: add two tasks, complete one.
    {
        let store = TaskStore::new(kv.clone());
        let mut app = App::new();
        app.apply_hydration(store.load().await);

        type_text(&mut app, "alpha");
        dispatch(&mut app, &store, KeyCode::Enter).await;
        type_text(&mut app, "beta");
        dispatch(&mut app, &store, KeyCode::Enter).await;
        app.focus = Focus::List;
        dispatch(&mut app, &store, KeyCode::Char(' ')).await;
    }

    // Second session: a fresh app hydrates the same state.
    let store = TaskStore::new(kv);
    let mut app = App::new();
    app.apply_hydration(store.load().await);

    assert_eq!(app.list.len(), 2);
    assert_eq!(app.list.tasks()[0].text, "alpha");
    assert!(app.list.tasks()[0].completed);
    assert_eq!(app.list.tasks()[1].text, "beta");
    assert!(!app.list.tasks()[1].completed);
}

#[tokio::test]
async fn corrupted_blob_hydrates_empty_and_app_keeps_working() {
    let kv = MemoryKv::new();
    kv.seed(TASKS_KEY, "this is not json").await;

    let (store, mut warnings) = TaskStore::with_warnings(kv.clone(), 4);
    let mut app = App::new();
    app.apply_hydration(store.load().await);

    assert!(app.list.is_empty());
    assert!(matches!(
        warnings.try_recv(),
        Ok(StoreWarning::LoadFailed { .. })
    ));

    // The next mutation overwrites the corrupted blob.
    type_text(&mut app, "fresh start");
    dispatch(&mut app, &store, KeyCode::Enter).await;
    let blob = kv.raw(TASKS_KEY).await.unwrap();
    assert!(blob.contains("fresh start"));
}

#[tokio::test]
async fn write_failure_keeps_in_memory_state() {
    let kv = MemoryKv::new();
    kv.set_fail_writes(true);

    let (store, mut warnings) = TaskStore::with_warnings(kv.clone(), 4);
    let mut app = App::new();
    app.apply_hydration(store.load().await);

    type_text(&mut app, "doomed write");
    dispatch(&mut app, &store, KeyCode::Enter).await;

    // The change appears to succeed in this session.
    assert_eq!(app.list.len(), 1);
    // But nothing reached the persistence layer, and a warning fired.
    assert_eq!(kv.raw(TASKS_KEY).await, None);
    assert!(matches!(
        warnings.try_recv(),
        Ok(StoreWarning::SaveFailed { .. })
    ));
}

#[tokio::test]
async fn hydration_does_not_trigger_a_save() {
    let kv = MemoryKv::new();
    kv.seed(TASKS_KEY, r#"[{"id":7,"text":"kept","completed":false}]"#)
        .await;

    let store = TaskStore::new(kv.clone());
    let mut app = App::new();
    app.apply_hydration(store.load().await);
    assert_eq!(app.list.len(), 1);

    // The blob is untouched: no redundant save-after-load.
    assert_eq!(
        kv.raw(TASKS_KEY).await.as_deref(),
        Some(r#"[{"id":7,"text":"kept","completed":false}]"#)
    );
}
