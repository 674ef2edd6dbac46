use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::rule::FieldRule;

/// Stable identity of a field for the lifetime of an editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldId(Uuid);

impl FieldId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for FieldId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Number,
    Password,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Number => "number",
            FieldKind::Password => "password",
        }
    }

    /// Whether the input should be masked when rendered.
    pub fn is_secret(&self) -> bool {
        matches!(self, FieldKind::Password)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single input on the form being built.
///
/// `id` is the identity used for lookup and removal. `name` is the submission key and is
/// unique among the fields of one editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub id: FieldId,
    pub kind: FieldKind,
    pub label: String,
    pub name: String,
    pub rule: FieldRule,
}

impl FieldDefinition {
    pub fn new(
        kind: FieldKind,
        label: impl Into<String>,
        name: impl Into<String>,
        rule: FieldRule,
    ) -> Self {
        Self {
            id: FieldId::new(),
            kind,
            label: label.into(),
            name: name.into(),
            rule,
        }
    }
}
