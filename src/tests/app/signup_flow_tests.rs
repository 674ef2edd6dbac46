use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    app::{
        focus::Focus,
        options::UiOptions,
        runtime::{App, recording_sink},
    },
    editor::EditorState,
    form::FormSession,
};

fn press(app: &mut App, code: KeyCode) {
    app.handle_key_for_test(KeyEvent::new(code, KeyModifiers::NONE));
}

fn chord(app: &mut App, ch: char) {
    app.handle_key_for_test(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL));
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        press(app, KeyCode::Char(ch));
    }
}

fn tab_to(app: &mut App, target: Focus) {
    for _ in 0..32 {
        if app.focus_for_test() == target {
            return;
        }
        press(app, KeyCode::Tab);
    }
    panic!("focus never reached {target:?}");
}

#[test]
fn build_fill_and_submit_a_signup_form() {
    let (sink, store) = recording_sink();
    let options = UiOptions::default().with_submit_delay(Duration::ZERO);
    let session = FormSession::new(EditorState::empty()).with_submit_delay(Duration::ZERO);
    let mut app = App::new(session, sink, options, Some("Signup".into()));

    // Palette: Text, then Password.
    tab_to(&mut app, Focus::Palette);
    press(&mut app, KeyCode::Enter);
    tab_to(&mut app, Focus::Palette);
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.session_for_test().fields().len(), 2);
    assert_eq!(app.focus_for_test(), Focus::Field(1));

    tab_to(&mut app, Focus::Field(0));
    type_text(&mut app, "Ada");
    tab_to(&mut app, Focus::Field(1));
    type_text(&mut app, "abc");

    chord(&mut app, 's');
    assert_eq!(app.status_for_test(), "1 issue(s) remaining");
    let tree = app.render_tree_for_test();
    assert_eq!(tree.fields[1].error.as_deref(), Some("Too short"));
    assert_eq!(tree.fields[1].display_value(), "•••");

    type_text(&mut app, "defgh");
    assert!(app.render_tree_for_test().fields[1].error.is_none());
    chord(&mut app, 's');
    app.tick(Instant::now());

    let delivered = store.borrow();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0]["text"], "Ada");
    assert_eq!(delivered[0]["password"], "abcdefgh");
    assert!(!app.session_for_test().is_dirty());

    chord(&mut app, 'q');
    assert!(app.should_quit_for_test(), "clean form quits without confirmation");
}

#[test]
fn dropped_files_join_the_focus_ring() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("avatar.png");
    std::fs::write(&path, b"\x89PNG").expect("write");

    let (sink, _) = recording_sink();
    let mut app = App::new(FormSession::default(), sink, UiOptions::default(), None);
    tab_to(&mut app, Focus::DropZone);
    app.handle_paste_for_test(&format!("file://{}", path.display()));

    let tree = app.render_tree_for_test();
    assert_eq!(tree.files.entries.len(), 1);
    assert_eq!(tree.files.entries[0].name, "avatar.png");

    tab_to(&mut app, Focus::Files);
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus_for_test(), Focus::Field(0));
}
