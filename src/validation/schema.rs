use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    sync::Arc,
};

use indexmap::IndexMap;

use crate::domain::{FieldDefinition, FieldRule};

use super::evaluator::evaluate;

/// `name -> rule` for every active field, in field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationSchema {
    rules: IndexMap<String, FieldRule>,
}

impl ValidationSchema {
    pub fn build(fields: &[FieldDefinition]) -> Self {
        let rules = fields
            .iter()
            .map(|field| (field.name.clone(), field.rule.clone()))
            .collect();
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.rules.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Validates one value; used for inline feedback while typing.
    pub fn validate_field(&self, name: &str, value: &str) -> Result<(), String> {
        match self.rules.get(name) {
            Some(rule) => evaluate(rule, value),
            None => Ok(()),
        }
    }

    /// Validates every field. Missing values count as empty input.
    pub fn validate(&self, values: &IndexMap<String, String>) -> ValidationReport {
        let errors = self
            .rules
            .iter()
            .filter_map(|(name, rule)| {
                let value = values.get(name).map(String::as_str).unwrap_or_default();
                evaluate(rule, value)
                    .err()
                    .map(|message| (name.clone(), message))
            })
            .collect();
        ValidationReport { errors }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: IndexMap<String, String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(name, message)| (name.as_str(), message.as_str()))
    }
}

/// Memoizes the schema on a fingerprint of the field sequence.
#[derive(Debug, Default)]
pub struct SchemaCache {
    fingerprint: Option<u64>,
    schema: Arc<ValidationSchema>,
    builds: usize,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema_for(&mut self, fields: &[FieldDefinition]) -> Arc<ValidationSchema> {
        let fingerprint = fingerprint(fields);
        if self.fingerprint != Some(fingerprint) {
            self.schema = Arc::new(ValidationSchema::build(fields));
            self.fingerprint = Some(fingerprint);
            self.builds += 1;
        }
        Arc::clone(&self.schema)
    }

    /// Number of times the schema was actually rebuilt.
    pub fn builds(&self) -> usize {
        self.builds
    }
}

fn fingerprint(fields: &[FieldDefinition]) -> u64 {
    let mut hasher = DefaultHasher::new();
    fields.len().hash(&mut hasher);
    for field in fields {
        field.id.hash(&mut hasher);
        field.name.hash(&mut hasher);
        field.rule.hash(&mut hasher);
    }
    hasher.finish()
}
