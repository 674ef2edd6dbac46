use crate::domain::{FieldKind, Theme};

/// Everything drawn in one frame, derived from editor state on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTree {
    pub title: Option<String>,
    pub theme: Theme,
    pub banner: String,
    pub welcome_input: InputView,
    pub theme_control: ChoiceView,
    pub palette: PaletteView,
    pub drop_zone: InputView,
    pub files: FilesView,
    pub fields: Vec<FieldView>,
    pub submit: SubmitView,
    pub error_banner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputView {
    pub value: String,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceView {
    pub label: String,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteView {
    pub buttons: Vec<String>,
    pub selected: usize,
    pub focused: bool,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilesView {
    pub entries: Vec<FilePreviewView>,
    pub selected: usize,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePreviewView {
    pub name: String,
    pub preview: FilePreview,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePreview {
    /// Renderable thumbnail source.
    Image { url: String, size: u64 },
    /// No visual preview; the name is shown instead.
    NameOnly { size: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMark {
    None,
    Grabbed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub label: String,
    pub name: String,
    pub kind: FieldKind,
    pub value: String,
    pub error: Option<String>,
    pub focused: bool,
    pub drag: DragMark,
}

impl FieldView {
    /// Value as shown on screen; secrets are masked.
    pub fn display_value(&self) -> String {
        if self.kind.is_secret() {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitView {
    pub label: String,
    pub enabled: bool,
    pub focused: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_values_are_masked() {
        let view = FieldView {
            label: "Password".into(),
            name: "password".into(),
            kind: FieldKind::Password,
            value: "hunter2".into(),
            error: None,
            focused: false,
            drag: DragMark::None,
        };
        assert_eq!(view.display_value(), "•••••••");
        let text = FieldView {
            kind: FieldKind::Text,
            ..view
        };
        assert_eq!(text.display_value(), "hunter2");
    }
}
