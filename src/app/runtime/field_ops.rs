use super::App;
use crate::{app::focus::Focus, editor::DragState, form::FormCommand};

impl App {
    pub(super) fn add_selected_template(&mut self) {
        let Some(template) = self.templates.get(self.palette_index) else {
            return;
        };
        let kind = template.kind;
        if self.dispatch(FormCommand::AddField(kind)).is_some() {
            self.focus = Focus::Field(self.field_count().saturating_sub(1));
        }
    }

    pub(super) fn remove_field_at(&mut self, index: usize) {
        let Some(field) = self.session.fields().get(index) else {
            return;
        };
        let id = field.id;
        self.dispatch(FormCommand::RemoveField(id));
    }

    pub(super) fn move_focused_field(&mut self, delta: i32) {
        let Focus::Field(index) = self.focus else {
            return;
        };
        let target = index as i64 + delta as i64;
        if target < 0 || target >= self.field_count() as i64 {
            self.status.set_raw("Field is already at the edge");
            return;
        }
        self.reorder(index, Some(target as usize));
    }

    pub(super) fn grab_focused_field(&mut self) {
        let Focus::Field(index) = self.focus else {
            return;
        };
        if self.session.is_submitting() {
            self.status.busy();
            return;
        }
        if let Some(drag) = DragState::grab(index, self.field_count()) {
            self.drag = Some(drag);
            self.status
                .set_raw("Dragging: ↑/↓ to move, Enter to drop, Esc to cancel");
        }
    }

    pub(super) fn step_drag(&mut self, delta: i32) {
        if let Some(drag) = &mut self.drag {
            drag.step(delta);
        }
    }

    pub(super) fn drop_dragged_field(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        self.reorder(drag.source(), Some(drag.hover()));
    }

    pub(super) fn cancel_drag(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        self.reorder(drag.source(), None);
        self.focus = Focus::Field(drag.source());
        self.status.set_raw("Drag cancelled");
    }

    fn reorder(&mut self, source: usize, destination: Option<usize>) {
        let effect = self.dispatch(FormCommand::Reorder {
            source,
            destination,
        });
        if effect.is_some()
            && let Some(destination) = destination
        {
            self.focus = Focus::Field(destination);
        }
    }
}
