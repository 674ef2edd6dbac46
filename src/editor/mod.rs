mod error;
mod intake;
mod preview;
mod reorder;
mod state;

pub use error::{EditorError, IntakeError};
pub use intake::{
    AttachedFile, DEFAULT_PREVIEW_LIMIT, FileId, FileIntake, FileSource, RawFile, mime_for_path,
    parse_dropped_paths,
};
pub use preview::{PreviewHandle, PreviewStore};
pub use reorder::{DragState, move_item};
pub use state::{DEFAULT_WELCOME_TEXT, EditorState};
