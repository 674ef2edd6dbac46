#![deny(rust_2018_idioms)]

//! Terminal form builder: arrange fields, attach files, validate and submit.
//!
//! The editing core (`editor`, `form`, `validation`, `submit`) runs without a terminal;
//! [`FormDeck`] wraps it in a ratatui front end.

mod app;
pub mod domain;
pub mod editor;
pub mod form;
pub mod io;
pub mod presentation;
pub mod submit;
pub mod validation;

#[cfg(test)]
mod tests;

pub use app::{FormDeck, KeymapStore, SessionSummary, UiOptions};
pub use domain::{FieldDefinition, FieldId, FieldKind, FieldRule, Theme};
pub use editor::{EditorError, EditorState};
pub use form::{FormSession, SubmitAttempt};
pub use submit::{SubmissionPayload, SubmissionSink};

pub mod prelude {
    pub use super::{
        EditorState, FieldKind, FormDeck, FormSession, SessionSummary, SubmissionSink, Theme,
        UiOptions,
    };
}
