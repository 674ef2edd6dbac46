use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::Modifier,
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};

use super::super::{style::ThemeStyle, view::PopupRender};

pub fn render_popup(frame: &mut Frame<'_>, popup: PopupRender<'_>, style: &ThemeStyle) {
    if popup.options.is_empty() {
        return;
    }
    let widest = popup
        .options
        .iter()
        .map(|option| option.chars().count())
        .chain([popup.title.chars().count()])
        .max()
        .unwrap_or(10) as u16;
    let width = widest
        .saturating_add(6)
        .min(frame.area().width.saturating_sub(2).max(1));
    let height = (popup.options.len() as u16)
        .saturating_add(2)
        .min(frame.area().height);
    let area = centered(frame.area(), width, height.max(3));
    frame.render_widget(Clear, area);

    let items = popup
        .options
        .iter()
        .map(|option| ListItem::new(option.clone()))
        .collect::<Vec<_>>();
    let mut state = ListState::default();
    state.select(Some(popup.selected.min(popup.options.len() - 1)));

    let list = List::new(items)
        .style(style.base())
        .block(
            Block::default()
                .title(popup.title.to_string())
                .borders(Borders::ALL)
                .border_style(style.base().fg(style.accent)),
        )
        .highlight_style(style.base().fg(style.focus).add_modifier(Modifier::BOLD))
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut state);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
