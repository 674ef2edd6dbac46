use super::{
    field::{FieldDefinition, FieldKind},
    rule::{FieldRule, RuleCheck},
};

/// A palette entry that `EditorState::add_field` clones into a new field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldTemplate {
    pub kind: FieldKind,
    pub label: &'static str,
    pub name: &'static str,
    pub rule: FieldRule,
}

impl FieldTemplate {
    /// Button caption shown in the palette.
    pub fn button_label(&self) -> String {
        format!("Add {} Field", self.label)
    }

    pub(crate) fn instantiate(&self, label: String, name: String) -> FieldDefinition {
        FieldDefinition::new(self.kind, label, name, self.rule.clone())
    }
}

/// Templates the palette offers, in display order.
pub fn available_fields() -> Vec<FieldTemplate> {
    vec![
        template_for(FieldKind::Text),
        template_for(FieldKind::Number),
        template_for(FieldKind::Password),
    ]
}

/// The email field every new editor starts with.
pub fn seed_template() -> FieldTemplate {
    template_for(FieldKind::Email)
}

pub fn template_for(kind: FieldKind) -> FieldTemplate {
    match kind {
        FieldKind::Email => FieldTemplate {
            kind,
            label: "Email",
            name: "email",
            rule: FieldRule::new()
                .with(RuleCheck::required("Email is required"))
                .with(RuleCheck::email_shape("Invalid email")),
        },
        FieldKind::Text => FieldTemplate {
            kind,
            label: "Text",
            name: "text",
            rule: FieldRule::new().with(RuleCheck::required("Text is required")),
        },
        FieldKind::Number => FieldTemplate {
            kind,
            label: "Number",
            name: "number",
            rule: FieldRule::new()
                .with(RuleCheck::required("Number is required"))
                .with(RuleCheck::numeric("Number is required")),
        },
        FieldKind::Password => FieldTemplate {
            kind,
            label: "Password",
            name: "password",
            rule: FieldRule::new()
                .with(RuleCheck::required("Password is required"))
                .with(RuleCheck::min_length(6, "Too short")),
        },
    }
}
