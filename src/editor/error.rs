use std::{io, path::PathBuf};

use thiserror::Error;

use crate::domain::{FieldId, UnknownTheme};

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("a field named '{0}' already exists")]
    DuplicateFieldName(String),
    #[error("a field with id {0} already exists")]
    DuplicateFieldId(FieldId),
    #[error("a submission is in flight")]
    SubmissionInFlight,
    #[error(transparent)]
    UnknownTheme(#[from] UnknownTheme),
}

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not a regular file", .0.display())]
    NotAFile(PathBuf),
}
