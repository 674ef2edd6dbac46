use crate::{
    domain::{FieldId, FieldKind, Theme},
    editor::{FileId, RawFile},
};

#[derive(Debug, Clone)]
pub enum FormCommand {
    SetWelcomeText(String),
    SetTheme(Theme),
    AddField(FieldKind),
    RemoveField(FieldId),
    Reorder {
        source: usize,
        destination: Option<usize>,
    },
    SetValue {
        id: FieldId,
        value: String,
    },
    AttachFiles(Vec<RawFile>),
    RemoveFile(FileId),
    Submit,
    DismissError,
}
