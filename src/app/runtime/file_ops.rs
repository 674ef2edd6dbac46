use std::path::PathBuf;

use tracing::warn;

use super::App;
use crate::{
    app::focus::Focus,
    editor::{RawFile, parse_dropped_paths},
    form::{CommandEffect, FormCommand},
};

impl App {
    pub(super) fn attach_drop_buffer(&mut self) {
        let paths = parse_dropped_paths(&self.drop_buffer);
        if paths.is_empty() {
            self.status.set_raw("Type or drop a file path first");
            return;
        }
        if self.attach_paths(paths) > 0 {
            self.drop_buffer.clear();
        }
    }

    /// Bracketed paste. Text inputs always take the pasted text. Elsewhere, dragged files
    /// arrive as a list of paths: the drop zone and file list accept any existing files,
    /// other regions only absolute paths or `file://` URIs.
    pub(super) fn handle_paste(&mut self, text: &str) {
        if !matches!(self.focus, Focus::Welcome | Focus::Field(_)) {
            let paths = parse_dropped_paths(text);
            let relative_ok = matches!(self.focus, Focus::DropZone | Focus::Files);
            let is_drop = !paths.is_empty()
                && paths
                    .iter()
                    .all(|path| path.is_file() && (relative_ok || path.is_absolute()));
            if is_drop {
                self.attach_paths(paths);
                return;
            }
        }
        let text = text.replace(['\r', '\n'], " ");
        match self.focus {
            Focus::Welcome => {
                let mut welcome = self.session.state().welcome_text().to_string();
                welcome.push_str(&text);
                self.dispatch(FormCommand::SetWelcomeText(welcome));
            }
            Focus::Field(index) => {
                let Some(field) = self.session.fields().get(index) else {
                    return;
                };
                let id = field.id;
                let value = format!("{}{text}", self.session.value(id));
                self.dispatch(FormCommand::SetValue { id, value });
            }
            Focus::DropZone => self.drop_buffer.push_str(&text),
            _ => self.status.set_raw("Pasted text is not a file path"),
        }
    }

    /// Reads every path and attaches what could be read. Returns how many were attached.
    fn attach_paths(&mut self, paths: Vec<PathBuf>) -> usize {
        let mut files = Vec::with_capacity(paths.len());
        let mut failures = Vec::new();
        for path in paths {
            match RawFile::from_path(&path) {
                Ok(file) => files.push(file),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "could not read dropped file");
                    failures.push(err.to_string());
                }
            }
        }
        let attached = match self.dispatch(FormCommand::AttachFiles(files)) {
            Some(CommandEffect::FilesAttached(count)) => count,
            _ => 0,
        };
        if let Some(first) = failures.first() {
            let message = if attached > 0 {
                format!("Attached {attached} file(s); {first}")
            } else {
                first.clone()
            };
            self.status.set_raw(message);
        }
        attached
    }

    pub(super) fn remove_selected_file(&mut self) {
        let Some(entry) = self.session.state().files().entries().get(self.file_index) else {
            return;
        };
        let id = entry.id;
        self.dispatch(FormCommand::RemoveFile(id));
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tempfile::tempdir;

    use super::super::recording_sink;
    use super::*;
    use crate::{app::options::UiOptions, editor::EditorState, form::FormSession};

    fn app() -> App {
        let (sink, _) = recording_sink();
        App::new(
            FormSession::new(EditorState::new()),
            sink,
            UiOptions::default(),
            None,
        )
    }

    #[test]
    fn pasted_paths_attach_files_with_previews() {
        let dir = tempdir().expect("tempdir");
        let image = dir.path().join("photo one.png");
        let notes = dir.path().join("notes.txt");
        fs::write(&image, b"\x89PNG").expect("write image");
        fs::write(&notes, b"hello").expect("write notes");

        let mut app = app();
        app.focus = Focus::DropZone;
        let pasted = format!("'{}' {}", image.display(), notes.display());
        app.handle_paste(&pasted);

        let files = app.session.state().files();
        assert_eq!(files.len(), 2);
        assert!(files.entries()[0].preview_url().is_some());
        assert!(files.entries()[1].preview_url().is_none());
        assert_eq!(app.status.message(), "Attached 2 file(s)");
    }

    #[test]
    fn drop_zone_reports_unreadable_paths() {
        let dir = tempdir().expect("tempdir");
        let mut app = app();
        app.focus = Focus::DropZone;
        app.drop_buffer = dir.path().join("missing.bin").display().to_string();
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert!(app.session.state().files().is_empty());
        assert!(app.status.message().starts_with("failed to read"));
        assert!(!app.drop_buffer.is_empty());
    }

    #[test]
    fn removing_a_file_releases_its_preview() {
        let dir = tempdir().expect("tempdir");
        let image = dir.path().join("cat.gif");
        fs::write(&image, b"GIF89a").expect("write image");

        let mut app = app();
        app.focus = Focus::Palette;
        app.handle_paste(&image.display().to_string());
        assert_eq!(app.session.state().files().previews().live_count(), 1);

        app.focus = Focus::Files;
        app.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
        let files = app.session.state().files();
        assert!(files.is_empty());
        assert_eq!(files.previews().live_count(), 0);
        assert_eq!(files.previews().released_count(), 1);
        assert_eq!(app.focus, Focus::DropZone);
    }

    #[test]
    fn plain_paste_types_into_focused_field() {
        let mut app = app();
        app.focus = Focus::Field(0);
        app.handle_paste("user@example.com");
        let id = app.session.fields()[0].id;
        assert_eq!(app.session.value(id), "user@example.com");
    }

    #[test]
    fn existing_file_names_paste_as_text_into_inputs() {
        // Tests run from the package root, where this file exists.
        assert!(PathBuf::from("Cargo.toml").is_file());
        let mut app = app();
        app.focus = Focus::Field(0);
        app.handle_paste("Cargo.toml");
        let id = app.session.fields()[0].id;
        assert_eq!(app.session.value(id), "Cargo.toml");
        assert!(app.session.state().files().is_empty());

        app.focus = Focus::Welcome;
        app.handle_paste(" README.md");
        assert!(app.session.state().welcome_text().ends_with(" README.md"));
        assert!(app.session.state().files().is_empty());
    }

    #[test]
    fn absolute_paths_paste_as_text_into_fields() {
        let dir = tempdir().expect("tempdir");
        let notes = dir.path().join("notes.txt");
        fs::write(&notes, b"hello").expect("write notes");

        let mut app = app();
        app.focus = Focus::Field(0);
        app.handle_paste(&notes.display().to_string());
        let id = app.session.fields()[0].id;
        assert_eq!(app.session.value(id), notes.display().to_string());
        assert!(app.session.state().files().is_empty());
    }

    #[test]
    fn relative_paths_attach_only_in_the_drop_zone() {
        let mut app = app();
        app.focus = Focus::Palette;
        app.handle_paste("Cargo.toml");
        assert!(app.session.state().files().is_empty());
        assert_eq!(app.status.message(), "Pasted text is not a file path");

        app.focus = Focus::DropZone;
        app.handle_paste("Cargo.toml");
        assert_eq!(app.session.state().files().len(), 1);
        assert_eq!(app.session.state().files().entries()[0].raw.name, "Cargo.toml");
    }
}
