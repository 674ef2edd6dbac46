use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{FieldRule, RuleCheck};

// WHATWG "valid email address" production.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

pub fn is_email_shaped(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Checks `value` against `rule`, returning the message of the first failing check.
///
/// An empty value fails only when the rule has a `Required` check, and then always with
/// that check's message.
pub fn evaluate(rule: &FieldRule, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return match rule.required_message() {
            Some(message) => Err(message.to_string()),
            None => Ok(()),
        };
    }
    for check in rule.checks() {
        let passed = match check {
            RuleCheck::Required { .. } => true,
            // Length in UTF-16 code units, as browser string length counts it.
            RuleCheck::MinLength { min, .. } => value.encode_utf16().count() >= *min,
            RuleCheck::Numeric { .. } => value
                .trim()
                .parse::<f64>()
                .map(f64::is_finite)
                .unwrap_or(false),
            RuleCheck::EmailShape { .. } => is_email_shaped(value),
        };
        if !passed {
            return Err(check.message().to_string());
        }
    }
    Ok(())
}
