mod catalog;
mod field;
mod rule;
mod theme;

pub use catalog::{FieldTemplate, available_fields, seed_template, template_for};
pub use field::{FieldDefinition, FieldId, FieldKind};
pub use rule::{FieldRule, RuleCheck};
pub use theme::{Theme, UnknownTheme};
