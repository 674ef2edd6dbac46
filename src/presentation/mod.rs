mod components;
mod style;
mod tree;
mod view;

pub use style::ThemeStyle;
pub use tree::{
    ChoiceView, DragMark, FilePreview, FilePreviewView, FieldView, FilesView, InputView,
    PaletteView, RenderTree, SubmitView,
};
pub use view::{PopupRender, UiContext, draw};
