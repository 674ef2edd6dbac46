use serde::{Deserialize, Serialize};

/// One declarative check. Evaluation lives in `validation::evaluate`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "camelCase")]
pub enum RuleCheck {
    Required { message: String },
    MinLength { min: usize, message: String },
    Numeric { message: String },
    EmailShape { message: String },
}

impl RuleCheck {
    pub fn required(message: impl Into<String>) -> Self {
        RuleCheck::Required {
            message: message.into(),
        }
    }

    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        RuleCheck::MinLength {
            min,
            message: message.into(),
        }
    }

    pub fn numeric(message: impl Into<String>) -> Self {
        RuleCheck::Numeric {
            message: message.into(),
        }
    }

    pub fn email_shape(message: impl Into<String>) -> Self {
        RuleCheck::EmailShape {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            RuleCheck::Required { message }
            | RuleCheck::MinLength { message, .. }
            | RuleCheck::Numeric { message }
            | RuleCheck::EmailShape { message } => message,
        }
    }
}

/// Ordered list of checks attached to a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldRule {
    checks: Vec<RuleCheck>,
}

impl FieldRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, check: RuleCheck) -> Self {
        self.checks.push(check);
        self
    }

    pub fn checks(&self) -> &[RuleCheck] {
        &self.checks
    }

    pub fn required_message(&self) -> Option<&str> {
        self.checks.iter().find_map(|check| match check {
            RuleCheck::Required { message } => Some(message.as_str()),
            _ => None,
        })
    }

    pub fn is_required(&self) -> bool {
        self.required_message().is_some()
    }
}
