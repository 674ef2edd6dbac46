use std::collections::HashSet;

use tracing::debug;

use crate::domain::{FieldDefinition, FieldId, FieldTemplate, Theme, seed_template};

use super::{error::EditorError, intake::FileIntake, reorder::move_item};

pub const DEFAULT_WELCOME_TEXT: &str = "Welcome to My Form!";

/// Everything the user arranges: banner, theme, ordered fields, attached files.
#[derive(Debug)]
pub struct EditorState {
    welcome_text: String,
    theme: Theme,
    fields: Vec<FieldDefinition>,
    files: FileIntake,
}

impl Default for EditorState {
    fn default() -> Self {
        let mut state = Self::empty();
        state.add_field(&seed_template());
        state
    }
}

impl EditorState {
    /// Default banner, light theme and the seeded email field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default banner and theme with no fields.
    pub fn empty() -> Self {
        Self {
            welcome_text: DEFAULT_WELCOME_TEXT.to_string(),
            theme: Theme::default(),
            fields: Vec::new(),
            files: FileIntake::new(),
        }
    }

    pub fn welcome_text(&self) -> &str {
        &self.welcome_text
    }

    pub fn set_welcome_text(&mut self, text: impl Into<String>) {
        self.welcome_text = text.into();
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        debug!(%theme, "theme changed");
        self.theme = theme;
    }

    pub fn set_theme_str(&mut self, raw: &str) -> Result<(), EditorError> {
        let theme = raw.parse::<Theme>()?;
        self.set_theme(theme);
        Ok(())
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn field(&self, id: FieldId) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn position_of(&self, id: FieldId) -> Option<usize> {
        self.fields.iter().position(|field| field.id == id)
    }

    /// Clones `template` into a new field with a fresh id.
    ///
    /// A name already in use gets an ordinal suffix (`text_2`, label `Text 2`) so that
    /// names stay unique.
    pub fn add_field(&mut self, template: &FieldTemplate) -> FieldId {
        let taken = self
            .fields
            .iter()
            .map(|field| field.name.as_str())
            .collect::<HashSet<_>>();
        let (name, label) = if taken.contains(template.name) {
            let ordinal = (2..)
                .find(|n| !taken.contains(format!("{}_{n}", template.name).as_str()))
                .unwrap_or(2);
            (
                format!("{}_{ordinal}", template.name),
                format!("{} {ordinal}", template.label),
            )
        } else {
            (template.name.to_string(), template.label.to_string())
        };
        let field = template.instantiate(label, name);
        let id = field.id;
        debug!(%id, name = %field.name, kind = %field.kind, "added field");
        self.fields.push(field);
        id
    }

    /// Appends a caller-built field, rejecting a clash on id or name.
    pub fn insert_field(&mut self, field: FieldDefinition) -> Result<FieldId, EditorError> {
        if self.field(field.id).is_some() {
            return Err(EditorError::DuplicateFieldId(field.id));
        }
        if self.fields.iter().any(|existing| existing.name == field.name) {
            return Err(EditorError::DuplicateFieldName(field.name));
        }
        let id = field.id;
        debug!(%id, name = %field.name, "inserted field");
        self.fields.push(field);
        Ok(id)
    }

    /// Removes the field with `id`; `false` when no such field exists.
    pub fn remove_field(&mut self, id: FieldId) -> bool {
        let before = self.fields.len();
        self.fields.retain(|field| field.id != id);
        let removed = self.fields.len() != before;
        if removed {
            debug!(%id, "removed field");
        }
        removed
    }

    /// Moves the field at `source` to `destination`. A `None` destination is a cancelled
    /// drag and changes nothing.
    pub fn reorder(&mut self, source: usize, destination: Option<usize>) -> bool {
        let Some(destination) = destination else {
            return false;
        };
        let moved = move_item(&mut self.fields, source, destination);
        if moved {
            debug!(source, destination, "reordered fields");
        } else {
            debug!(source, destination, len = self.fields.len(), "ignored reorder outside list");
        }
        moved
    }

    pub fn files(&self) -> &FileIntake {
        &self.files
    }

    pub fn files_mut(&mut self) -> &mut FileIntake {
        &mut self.files
    }
}
