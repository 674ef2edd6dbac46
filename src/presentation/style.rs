use ratatui::style::{Color, Modifier, Style};

use crate::domain::Theme;

const ACCENT: Color = Color::Rgb(0, 123, 255);

/// Colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeStyle {
    pub background: Color,
    pub text: Color,
    pub accent: Color,
    pub muted: Color,
    pub danger: Color,
    pub success: Color,
    pub focus: Color,
}

impl ThemeStyle {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::Reset,
                text: Color::Reset,
                accent: ACCENT,
                muted: Color::DarkGray,
                danger: Color::Red,
                success: Color::Green,
                focus: Color::Yellow,
            },
            Theme::Dark => Self {
                background: Color::Black,
                text: Color::White,
                accent: ACCENT,
                muted: Color::Gray,
                danger: Color::LightRed,
                success: Color::LightGreen,
                focus: Color::LightYellow,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn heading(&self) -> Style {
        self.base().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.base().fg(self.focus)
        } else {
            self.base().fg(self.muted)
        }
    }

    pub fn error(&self) -> Style {
        self.base().fg(self.danger)
    }
}
