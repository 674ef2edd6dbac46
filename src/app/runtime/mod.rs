use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use std::{sync::Arc, time::Instant};
use tracing::debug;

use crate::{
    domain::{FieldTemplate, Theme, available_fields},
    editor::{DragState, EditorError},
    form::{CommandEffect, FormCommand, FormEngine, FormSession},
    presentation::{self, UiContext},
    submit::{SubmissionSink, SubmitOutcome},
};

use super::{
    focus::Focus,
    input::{KeyAction, handle_text_edit},
    keymap::{KeymapContext, KeymapStore},
    options::UiOptions,
    popup::PopupState,
    status::StatusLine,
    terminal::TerminalGuard,
};

mod field_ops;
mod file_ops;
mod render;

pub(crate) struct App {
    session: FormSession,
    sink: Box<dyn SubmissionSink>,
    options: UiOptions,
    keymap_store: Arc<KeymapStore>,
    status: StatusLine,
    title: Option<String>,
    templates: Vec<FieldTemplate>,
    focus: Focus,
    palette_index: usize,
    file_index: usize,
    drop_buffer: String,
    drag: Option<DragState>,
    popup: Option<PopupState>,
    exit_armed: bool,
    should_quit: bool,
}

impl App {
    pub fn new(
        session: FormSession,
        sink: Box<dyn SubmissionSink>,
        options: UiOptions,
        title: Option<String>,
    ) -> Self {
        let keymap_store = options.keymap_store.clone();
        Self {
            session,
            sink,
            options,
            keymap_store,
            status: StatusLine::new(),
            title,
            templates: available_fields(),
            focus: Focus::Welcome,
            palette_index: 0,
            file_index: 0,
            drop_buffer: String::new(),
            drag: None,
            popup: None,
            exit_armed: false,
            should_quit: false,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = TerminalGuard::new(self.title.as_deref())?;
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(self.options.tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Paste(text) => self.handle_paste(&text),
                    Event::Resize(width, height) => {
                        terminal.resize(Rect::new(0, 0, width, height))?;
                    }
                    Event::Mouse(_) | Event::FocusGained | Event::FocusLost => {}
                }
            }
            self.tick(Instant::now());
        }
        Ok(())
    }

    pub fn into_session(self) -> FormSession {
        self.session
    }

    /// Advances a pending submission.
    pub(crate) fn tick(&mut self, now: Instant) {
        let Some(outcome) = self.session.poll_submission(now, self.sink.as_mut()) else {
            return;
        };
        match outcome {
            SubmitOutcome::Delivered(_) => {
                self.exit_armed = false;
                self.status.submitted();
            }
            SubmitOutcome::Failed(message) => {
                self.status.set_raw(format!("Submission failed: {message}"));
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let help = self.current_help_text();
        let tree = self.render_tree();
        let error_count = tree
            .fields
            .iter()
            .filter(|field| field.error.is_some())
            .count();
        presentation::draw(
            frame,
            UiContext {
                tree: &tree,
                status_message: self.status.message(),
                dirty: self.session.is_dirty(),
                error_count,
                help: help.as_deref(),
                popup: self.popup.as_ref().map(PopupState::as_render),
            },
        );
    }

    fn active_contexts(&self) -> Vec<KeymapContext> {
        if self.drag.is_some() {
            vec![KeymapContext::Drag, KeymapContext::Global]
        } else {
            self.focus.contexts()
        }
    }

    fn current_help_text(&self) -> Option<String> {
        if !self.options.show_help {
            return None;
        }
        self.keymap_store.help_text(&self.active_contexts())
    }

    fn field_count(&self) -> usize {
        self.session.fields().len()
    }

    fn has_files(&self) -> bool {
        !self.session.state().files().is_empty()
    }

    fn normalize_focus(&mut self) {
        self.focus = self.focus.normalize(self.field_count(), self.has_files());
        let file_count = self.session.state().files().len();
        self.file_index = self.file_index.min(file_count.saturating_sub(1));
    }

    /// Runs a command through the form engine and reports the effect in the status line.
    fn dispatch(&mut self, command: FormCommand) -> Option<CommandEffect> {
        let mut engine = FormEngine::new(&mut self.session, Instant::now());
        let effect = match engine.dispatch(command) {
            Ok(effect) => effect,
            Err(EditorError::SubmissionInFlight) => {
                self.status.busy();
                return None;
            }
            Err(err) => {
                self.status.set_raw(err.to_string());
                return None;
            }
        };
        match &effect {
            CommandEffect::FieldAdded { label } => self.status.field_added(label),
            CommandEffect::FieldRemoved { label } => self.status.field_removed(label),
            CommandEffect::Reordered { label, position } => {
                self.status.field_moved(label, *position)
            }
            CommandEffect::FilesAttached(count) => self.status.files_attached(*count),
            CommandEffect::FileRemoved => self.status.set_raw("Removed file"),
            CommandEffect::SubmitStarted => self.status.submitting(),
            CommandEffect::SubmitBlocked(report) => {
                self.status.issues_remaining(report.error_count())
            }
            CommandEffect::ErrorDismissed => self.status.ready(),
            CommandEffect::Updated | CommandEffect::Unchanged => {}
        }
        self.normalize_focus();
        Some(effect)
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.handle_popup_key(&key) {
            return;
        }
        match self.keymap_store.classify(&key, &self.active_contexts()) {
            Some(action) => self.handle_action(action),
            None => self.handle_unbound_key(&key),
        }
    }

    fn handle_popup_key(&mut self, key: &KeyEvent) -> bool {
        let Some(popup) = &mut self.popup else {
            return false;
        };
        match key.code {
            KeyCode::Esc => {
                self.popup = None;
                self.status.ready();
            }
            KeyCode::Up => popup.select_previous(),
            KeyCode::Down => popup.select_next(),
            KeyCode::Enter => {
                let theme = popup.selected_theme();
                self.popup = None;
                self.apply_theme(theme);
            }
            _ => {}
        }
        true
    }

    fn handle_action(&mut self, action: KeyAction) {
        if !matches!(action, KeyAction::Quit) {
            self.exit_armed = false;
        }
        match action {
            KeyAction::Submit => self.on_submit(),
            KeyAction::Quit => self.on_exit(),
            KeyAction::Dismiss => {
                if self.dispatch(FormCommand::DismissError).is_some() {
                    self.status.ready();
                }
            }
            KeyAction::FocusStep(delta) => self.step_focus(delta),
            KeyAction::SelectStep(delta) => self.step_selection(delta),
            KeyAction::Activate => self.activate(),
            KeyAction::RemoveEntry => match self.focus {
                Focus::Field(index) => self.remove_field_at(index),
                Focus::Files => self.remove_selected_file(),
                _ => {}
            },
            KeyAction::MoveField(delta) => self.move_focused_field(delta),
            KeyAction::Grab => self.grab_focused_field(),
            KeyAction::DragStep(delta) => self.step_drag(delta),
            KeyAction::Drop => self.drop_dragged_field(),
            KeyAction::CancelDrag => self.cancel_drag(),
        }
    }

    fn handle_unbound_key(&mut self, key: &KeyEvent) {
        if self.drag.is_some() {
            return;
        }
        match self.focus {
            Focus::Welcome => {
                let mut text = self.session.state().welcome_text().to_string();
                if handle_text_edit(&mut text, key) {
                    self.dispatch(FormCommand::SetWelcomeText(text));
                    self.status.editing("welcome text");
                }
            }
            Focus::Field(index) => {
                let Some(field) = self.session.fields().get(index) else {
                    return;
                };
                let (id, label) = (field.id, field.label.clone());
                let mut value = self.session.value(id).to_string();
                if handle_text_edit(&mut value, key) {
                    self.dispatch(FormCommand::SetValue { id, value });
                    self.status.editing(&label);
                }
            }
            Focus::DropZone => {
                handle_text_edit(&mut self.drop_buffer, key);
            }
            Focus::Theme if key.code == KeyCode::Char(' ') => {
                self.apply_theme(self.session.state().theme().toggled());
            }
            _ => {}
        }
    }

    fn step_focus(&mut self, delta: i32) {
        // Leaving a field counts as a blur.
        if let Focus::Field(index) = self.focus
            && let Some(field) = self.session.fields().get(index)
        {
            let id = field.id;
            self.session.touch(id);
        }
        self.focus = self
            .focus
            .step(delta, self.field_count(), self.has_files());
    }

    fn step_selection(&mut self, delta: i32) {
        match self.focus {
            Focus::Theme => self.apply_theme(self.session.state().theme().toggled()),
            Focus::Palette => {
                let len = self.templates.len().max(1) as i64;
                self.palette_index =
                    (self.palette_index as i64 + delta as i64).rem_euclid(len) as usize;
            }
            Focus::Files => {
                let len = self.session.state().files().len().max(1) as i64;
                self.file_index = (self.file_index as i64 + delta as i64).rem_euclid(len) as usize;
            }
            _ => {}
        }
    }

    fn activate(&mut self) {
        match self.focus {
            Focus::Theme => {
                self.popup = Some(PopupState::theme_picker(self.session.state().theme()));
                self.status.set_raw("Use ↑/↓ and Enter to choose");
            }
            Focus::Palette => self.add_selected_template(),
            Focus::DropZone => self.attach_drop_buffer(),
            Focus::Submit => self.on_submit(),
            _ => {}
        }
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.dispatch(FormCommand::SetTheme(theme));
        self.status.set_raw(format!("Theme: {}", theme.label()));
    }

    fn on_submit(&mut self) {
        let Some(effect) = self.dispatch(FormCommand::Submit) else {
            return;
        };
        if let CommandEffect::SubmitBlocked(report) = effect {
            debug!(errors = report.error_count(), "submit blocked");
            let first_invalid = self
                .session
                .fields()
                .iter()
                .position(|field| report.error(&field.name).is_some());
            if let Some(index) = first_invalid {
                self.focus = Focus::Field(index);
            }
        }
    }

    fn on_exit(&mut self) {
        if self.options.confirm_exit && self.session.is_dirty() && !self.exit_armed {
            self.exit_armed = true;
            self.status.pending_exit();
            return;
        }
        self.should_quit = true;
    }
}

#[cfg(test)]
impl App {
    pub(crate) fn handle_key_for_test(&mut self, key: KeyEvent) {
        self.handle_key(key)
    }

    pub(crate) fn handle_paste_for_test(&mut self, text: &str) {
        self.handle_paste(text)
    }

    pub(crate) fn session_for_test(&self) -> &FormSession {
        &self.session
    }

    pub(crate) fn status_for_test(&self) -> &str {
        self.status.message()
    }

    pub(crate) fn focus_for_test(&self) -> Focus {
        self.focus
    }

    pub(crate) fn should_quit_for_test(&self) -> bool {
        self.should_quit
    }

    pub(crate) fn render_tree_for_test(&mut self) -> presentation::RenderTree {
        self.render_tree()
    }
}

/// Collects every delivered payload; shared so tests can inspect a boxed sink.
#[cfg(test)]
pub(crate) fn recording_sink() -> (
    Box<dyn SubmissionSink>,
    std::rc::Rc<std::cell::RefCell<Vec<crate::submit::SubmissionPayload>>>,
) {
    let store = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let shared = store.clone();
    let sink = move |payload: &crate::submit::SubmissionPayload| -> Result<()> {
        shared.borrow_mut().push(payload.clone());
        Ok(())
    };
    (Box::new(sink), store)
}
