use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{
    super::{
        style::ThemeStyle,
        tree::{InputView, PaletteView, RenderTree},
    },
    input_cursor,
};

const DROP_HINT: &str = "Drag 'n' drop some files here, or type a path and press Enter";

pub fn render_controls(
    frame: &mut Frame<'_>,
    area: Rect,
    tree: &RenderTree,
    style: &ThemeStyle,
) -> Option<(u16, u16)> {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(rows[0]);

    let welcome_cursor = render_input(
        frame,
        top[0],
        "Customize Welcome Text",
        &tree.welcome_input,
        None,
        style,
    );

    let theme = Paragraph::new(Line::from(vec![
        Span::styled("◀ ", style.base().fg(style.muted)),
        Span::styled(tree.theme_control.label.clone(), style.heading()),
        Span::styled(" ▶", style.base().fg(style.muted)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled("Select Theme", style.heading()))
            .border_style(style.border(tree.theme_control.focused)),
    );
    frame.render_widget(theme, top[1]);

    render_palette(frame, rows[1], &tree.palette, style);

    let drop_cursor = render_input(
        frame,
        rows[2],
        "Drop Zone",
        &tree.drop_zone,
        Some(DROP_HINT),
        style,
    );
    welcome_cursor.or(drop_cursor)
}

fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    input: &InputView,
    placeholder: Option<&str>,
    style: &ThemeStyle,
) -> Option<(u16, u16)> {
    let line = match placeholder {
        Some(hint) if input.value.is_empty() && !input.focused => {
            Line::from(Span::styled(hint, style.base().fg(style.muted)))
        }
        _ => Line::from(Span::styled(input.value.clone(), style.base())),
    };
    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(title.to_string(), style.heading()))
            .border_style(style.border(input.focused)),
    );
    frame.render_widget(widget, area);
    input
        .focused
        .then(|| input_cursor(area, 0, &input.value))
}

fn render_palette(frame: &mut Frame<'_>, area: Rect, palette: &PaletteView, style: &ThemeStyle) {
    let mut spans = Vec::with_capacity(palette.buttons.len() * 2);
    for (index, label) in palette.buttons.iter().enumerate() {
        let mut button = style.base().fg(style.success);
        if !palette.enabled {
            button = style.base().fg(style.muted);
        } else if palette.focused && index == palette.selected {
            button = button.add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }
        spans.push(Span::styled(format!("[ {label} ]"), button));
        spans.push(Span::raw("  "));
    }
    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled("Add New Field", style.heading()))
            .border_style(style.border(palette.focused)),
    );
    frame.render_widget(widget, area);
}
