use super::App;
use crate::{
    app::focus::Focus,
    presentation::{
        ChoiceView, DragMark, FieldView, FilePreview, FilePreviewView, FilesView, InputView,
        PaletteView, RenderTree, SubmitView,
    },
    submit::SubmitPhase,
};

impl App {
    /// Derives the frame from current state. Recomputed on every draw.
    pub(super) fn render_tree(&mut self) -> RenderTree {
        let submitting = self.session.is_submitting();
        let definitions = self.session.fields().to_vec();
        let order = match &self.drag {
            Some(drag) => drag.preview_order(),
            None => (0..definitions.len()).collect(),
        };

        let mut fields = Vec::with_capacity(definitions.len());
        for (slot, index) in order.into_iter().enumerate() {
            let Some(field) = definitions.get(index) else {
                continue;
            };
            let grabbed = self.drag.is_some_and(|drag| drag.source() == index);
            let focused = match self.drag {
                Some(drag) => drag.hover() == slot,
                None => self.focus == Focus::Field(index),
            };
            fields.push(FieldView {
                label: field.label.clone(),
                name: field.name.clone(),
                kind: field.kind,
                value: self.session.value(field.id).to_string(),
                error: self.session.visible_error(field.id),
                focused,
                drag: if grabbed {
                    DragMark::Grabbed
                } else {
                    DragMark::None
                },
            });
        }

        let state = self.session.state();
        let entries = state
            .files()
            .entries()
            .iter()
            .map(|entry| FilePreviewView {
                name: entry.raw.name.clone(),
                preview: match entry.preview_url() {
                    Some(url) => FilePreview::Image {
                        url: url.to_string(),
                        size: entry.raw.size(),
                    },
                    None => FilePreview::NameOnly {
                        size: entry.raw.size(),
                    },
                },
            })
            .collect();

        let error_banner = match self.session.phase() {
            SubmitPhase::Failed { message } => Some(message.clone()),
            _ => None,
        };

        RenderTree {
            title: self.title.clone(),
            theme: state.theme(),
            banner: state.welcome_text().to_string(),
            welcome_input: InputView {
                value: state.welcome_text().to_string(),
                focused: self.focus == Focus::Welcome,
            },
            theme_control: ChoiceView {
                label: state.theme().label().to_string(),
                focused: self.focus == Focus::Theme,
            },
            palette: PaletteView {
                buttons: self
                    .templates
                    .iter()
                    .map(|template| template.button_label())
                    .collect(),
                selected: self.palette_index,
                focused: self.focus == Focus::Palette,
                enabled: !submitting,
            },
            drop_zone: InputView {
                value: self.drop_buffer.clone(),
                focused: self.focus == Focus::DropZone,
            },
            files: FilesView {
                entries,
                selected: self.file_index,
                focused: self.focus == Focus::Files,
            },
            fields,
            submit: SubmitView {
                label: if submitting {
                    "Submitting…".to_string()
                } else {
                    "Submit".to_string()
                },
                enabled: !submitting,
                focused: self.focus == Focus::Submit,
            },
            error_banner,
        }
    }
}
