use std::time::Instant;

use crate::{
    domain::template_for,
    editor::EditorError,
    validation::ValidationReport,
};

use super::{
    actions::FormCommand,
    session::{FormSession, SubmitAttempt},
};

/// What a dispatched command changed, for status reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandEffect {
    Unchanged,
    Updated,
    FieldAdded { label: String },
    FieldRemoved { label: String },
    Reordered { label: String, position: usize },
    FilesAttached(usize),
    FileRemoved,
    SubmitStarted,
    SubmitBlocked(ValidationReport),
    ErrorDismissed,
}

pub struct FormEngine<'a> {
    session: &'a mut FormSession,
    now: Instant,
}

impl<'a> FormEngine<'a> {
    pub fn new(session: &'a mut FormSession, now: Instant) -> Self {
        Self { session, now }
    }

    pub fn dispatch(&mut self, command: FormCommand) -> Result<CommandEffect, EditorError> {
        let effect = match command {
            FormCommand::SetWelcomeText(text) => {
                self.session.set_welcome_text(text);
                CommandEffect::Updated
            }
            FormCommand::SetTheme(theme) => {
                self.session.set_theme(theme);
                CommandEffect::Updated
            }
            FormCommand::AddField(kind) => {
                let id = self.session.add_field(&template_for(kind))?;
                let label = self
                    .session
                    .state()
                    .field(id)
                    .map(|field| field.label.clone())
                    .unwrap_or_default();
                CommandEffect::FieldAdded { label }
            }
            FormCommand::RemoveField(id) => {
                let label = self.session.state().field(id).map(|field| field.label.clone());
                match (self.session.remove_field(id)?, label) {
                    (true, Some(label)) => CommandEffect::FieldRemoved { label },
                    _ => CommandEffect::Unchanged,
                }
            }
            FormCommand::Reorder {
                source,
                destination,
            } => {
                if self.session.reorder(source, destination)? {
                    let position = destination.unwrap_or(source);
                    let label = self
                        .session
                        .fields()
                        .get(position)
                        .map(|field| field.label.clone())
                        .unwrap_or_default();
                    CommandEffect::Reordered { label, position }
                } else {
                    CommandEffect::Unchanged
                }
            }
            FormCommand::SetValue { id, value } => {
                if self.session.set_value(id, value) {
                    CommandEffect::Updated
                } else {
                    CommandEffect::Unchanged
                }
            }
            FormCommand::AttachFiles(files) => {
                let added = self.session.add_files(files);
                if added.is_empty() {
                    CommandEffect::Unchanged
                } else {
                    CommandEffect::FilesAttached(added.len())
                }
            }
            FormCommand::RemoveFile(id) => {
                if self.session.remove_file(id) {
                    CommandEffect::FileRemoved
                } else {
                    CommandEffect::Unchanged
                }
            }
            FormCommand::Submit => match self.session.submit(self.now)? {
                SubmitAttempt::Started => CommandEffect::SubmitStarted,
                SubmitAttempt::Blocked(report) => CommandEffect::SubmitBlocked(report),
            },
            FormCommand::DismissError => {
                if self.session.dismiss_error() {
                    CommandEffect::ErrorDismissed
                } else {
                    CommandEffect::Unchanged
                }
            }
        };
        Ok(effect)
    }
}
