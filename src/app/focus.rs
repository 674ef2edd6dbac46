use super::keymap::KeymapContext;

/// Focusable regions of the editor, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Welcome,
    Theme,
    Palette,
    DropZone,
    Files,
    Field(usize),
    Submit,
}

impl Focus {
    /// Tab order for the current shape of the form. `Files` is skipped while no file is
    /// attached.
    pub(crate) fn ring(field_count: usize, has_files: bool) -> Vec<Focus> {
        let mut ring = vec![Focus::Welcome, Focus::Theme, Focus::Palette, Focus::DropZone];
        if has_files {
            ring.push(Focus::Files);
        }
        ring.extend((0..field_count).map(Focus::Field));
        ring.push(Focus::Submit);
        ring
    }

    pub(crate) fn step(self, delta: i32, field_count: usize, has_files: bool) -> Focus {
        let ring = Self::ring(field_count, has_files);
        let current = self.normalize(field_count, has_files);
        let index = ring.iter().position(|focus| *focus == current).unwrap_or(0) as i64;
        let len = ring.len() as i64;
        let next = (index + delta as i64).rem_euclid(len) as usize;
        ring[next]
    }

    /// Keeps focus valid after fields or files disappear.
    pub(crate) fn normalize(self, field_count: usize, has_files: bool) -> Focus {
        match self {
            Focus::Files if !has_files => Focus::DropZone,
            Focus::Field(_) if field_count == 0 => Focus::Submit,
            Focus::Field(index) if index >= field_count => Focus::Field(field_count - 1),
            other => other,
        }
    }

    pub(crate) fn contexts(self) -> Vec<KeymapContext> {
        let specific = match self {
            Focus::Theme | Focus::Palette => Some(KeymapContext::Choice),
            Focus::DropZone => Some(KeymapContext::DropZone),
            Focus::Files => Some(KeymapContext::Files),
            Focus::Field(_) => Some(KeymapContext::Field),
            Focus::Submit => Some(KeymapContext::Button),
            Focus::Welcome => None,
        };
        specific
            .into_iter()
            .chain([KeymapContext::Navigation, KeymapContext::Global])
            .collect()
    }

    pub(crate) fn accepts_text(self) -> bool {
        matches!(self, Focus::Welcome | Focus::DropZone | Focus::Field(_))
    }
}
