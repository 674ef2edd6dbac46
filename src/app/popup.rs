use crate::{domain::Theme, presentation::PopupRender};

/// Theme picker opened from the theme control.
pub(crate) struct PopupState {
    title: String,
    options: Vec<String>,
    selected: usize,
}

impl PopupState {
    pub(crate) fn theme_picker(current: Theme) -> Self {
        Self {
            title: "Select Theme".to_string(),
            options: Theme::ALL.iter().map(|theme| theme.label().to_string()).collect(),
            selected: current.index(),
        }
    }

    pub(crate) fn select_previous(&mut self) {
        if self.options.is_empty() {
            return;
        }
        if self.selected == 0 {
            self.selected = self.options.len().saturating_sub(1);
        } else {
            self.selected -= 1;
        }
    }

    pub(crate) fn select_next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.options.len();
    }

    pub(crate) fn selected_theme(&self) -> Theme {
        Theme::ALL
            .get(self.selected)
            .copied()
            .unwrap_or_default()
    }

    pub(crate) fn as_render(&self) -> PopupRender<'_> {
        PopupRender {
            title: &self.title,
            options: &self.options,
            selected: self.selected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picker_starts_on_current_theme_and_wraps() {
        let mut popup = PopupState::theme_picker(Theme::Dark);
        assert_eq!(popup.selected_theme(), Theme::Dark);
        popup.select_next();
        assert_eq!(popup.selected_theme(), Theme::Light);
        popup.select_previous();
        assert_eq!(popup.selected_theme(), Theme::Dark);
    }
}
