use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyAction {
    Submit,
    Quit,
    Dismiss,
    FocusStep(i32),
    SelectStep(i32),
    Activate,
    RemoveEntry,
    MoveField(i32),
    Grab,
    DragStep(i32),
    Drop,
    CancelDrag,
}

/// Applies a printable key, Backspace or Delete to `buffer`. Returns whether it changed.
pub(crate) fn handle_text_edit(buffer: &mut String, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(ch) => {
            if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                return false;
            }
            buffer.push(ch);
            true
        }
        KeyCode::Backspace => buffer.pop().is_some(),
        KeyCode::Delete => {
            let changed = !buffer.is_empty();
            buffer.clear();
            changed
        }
        _ => false,
    }
}
