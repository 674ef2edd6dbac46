use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    widgets::Block,
};

use super::{
    components::{
        render_banner, render_controls, render_error_banner, render_fields, render_files,
        render_footer, render_popup, render_submit,
    },
    style::ThemeStyle,
    tree::RenderTree,
};

pub struct UiContext<'a> {
    pub tree: &'a RenderTree,
    pub status_message: &'a str,
    pub dirty: bool,
    pub error_count: usize,
    pub help: Option<&'a str>,
    pub popup: Option<PopupRender<'a>>,
}

pub struct PopupRender<'a> {
    pub title: &'a str,
    pub options: &'a [String],
    pub selected: usize,
}

pub fn draw(frame: &mut Frame<'_>, ctx: UiContext<'_>) {
    let tree = ctx.tree;
    let style = ThemeStyle::for_theme(tree.theme);
    frame.render_widget(Block::default().style(style.base()), frame.area());

    let mut constraints = Vec::new();
    if tree.error_banner.is_some() {
        constraints.push(Constraint::Length(3));
    }
    constraints.extend([
        Constraint::Length(3),
        Constraint::Length(9),
    ]);
    if !tree.files.entries.is_empty() {
        constraints.push(Constraint::Length(3));
    }
    constraints.extend([
        Constraint::Min(4),
        Constraint::Length(3),
        Constraint::Length(4),
    ]);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    let mut index = 0;
    if let Some(message) = &tree.error_banner {
        render_error_banner(frame, chunks[index], message, &style);
        index += 1;
    }
    render_banner(frame, chunks[index], tree, &style);
    index += 1;
    let mut cursor = render_controls(frame, chunks[index], tree, &style);
    index += 1;
    if !tree.files.entries.is_empty() {
        render_files(frame, chunks[index], &tree.files, &style);
        index += 1;
    }
    cursor = cursor.or(render_fields(frame, chunks[index], &tree.fields, &style));
    index += 1;
    render_submit(frame, chunks[index], &tree.submit, &style);
    index += 1;
    render_footer(frame, chunks[index], &ctx, &style);

    if let Some(popup) = ctx.popup {
        render_popup(frame, popup, &style);
    } else if let Some(position) = cursor {
        frame.set_cursor_position(position);
    }
}
