use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::super::{style::ThemeStyle, tree::RenderTree};

pub fn render_banner(frame: &mut Frame<'_>, area: Rect, tree: &RenderTree, style: &ThemeStyle) {
    let mut block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(style.border(false));
    if let Some(title) = &tree.title {
        block = block.title(Span::styled(title.clone(), style.base().fg(style.muted)));
    }
    let text = if tree.banner.is_empty() {
        Span::styled(" ", style.heading())
    } else {
        Span::styled(tree.banner.clone(), style.heading())
    };
    let banner = Paragraph::new(Line::from(text))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(banner, area);
}

pub fn render_error_banner(frame: &mut Frame<'_>, area: Rect, message: &str, style: &ThemeStyle) {
    let banner = Paragraph::new(Line::from(vec![
        Span::styled("Submission failed: ", style.error()),
        Span::styled(message.to_string(), style.base()),
    ]))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(style.error())
            .title("Error (Esc to dismiss)"),
    );
    frame.render_widget(banner, area);
}
