mod evaluator;
mod schema;

pub use evaluator::{evaluate, is_email_shaped};
pub use schema::{SchemaCache, ValidationReport, ValidationSchema};
