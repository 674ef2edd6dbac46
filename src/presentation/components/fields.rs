use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use super::super::{
    style::ThemeStyle,
    tree::{DragMark, FieldView, SubmitView},
};

const HIGHLIGHT: &str = "» ";
const VALUE_INDENT: &str = "  ";

pub fn render_fields(
    frame: &mut Frame<'_>,
    area: Rect,
    fields: &[FieldView],
    style: &ThemeStyle,
) -> Option<(u16, u16)> {
    let focused_any = fields.iter().any(|field| field.focused);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled("Form", style.heading()))
        .border_style(style.border(focused_any));

    if fields.is_empty() {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            "No fields yet. Add one from the palette above.",
            style.base().fg(style.muted),
        )))
        .block(block);
        frame.render_widget(placeholder, area);
        return None;
    }

    let content_width = area
        .width
        .saturating_sub(2 + HIGHLIGHT.len() as u16 + VALUE_INDENT.len() as u16)
        .max(4);
    let rendered = fields
        .iter()
        .map(|field| field_lines(field, content_width, style))
        .collect::<Vec<_>>();
    let heights = rendered.iter().map(Vec::len).collect::<Vec<_>>();
    let items = rendered.into_iter().map(ListItem::new).collect::<Vec<_>>();

    let selected = fields.iter().position(|field| field.focused);
    let mut list_state = ListState::default();
    list_state.select(selected);

    let list = List::new(items)
        .block(block)
        .style(style.base())
        .highlight_symbol(HIGHLIGHT);
    frame.render_stateful_widget(list, area, &mut list_state);

    let selected = selected?;
    let focused = &fields[selected];
    let offset = list_state.offset();
    if selected < offset {
        return None;
    }
    let line = heights[offset..selected].iter().sum::<usize>() + 1;
    let inner_height = area.height.saturating_sub(2) as usize;
    if line >= inner_height {
        return None;
    }
    let value_width = UnicodeWidthStr::width(focused.display_value().as_str()) as u16;
    let x = area.x
        + 1
        + HIGHLIGHT.chars().count() as u16
        + VALUE_INDENT.len() as u16
        + value_width.min(content_width);
    Some((x.min(area.right().saturating_sub(2)), area.y + 1 + line as u16))
}

pub(crate) fn field_lines(
    field: &FieldView,
    max_width: u16,
    style: &ThemeStyle,
) -> Vec<Line<'static>> {
    let marker = match field.drag {
        DragMark::Grabbed => "⇅ ",
        DragMark::None => "≡ ",
    };
    let mut label_style = style.base().fg(style.accent).add_modifier(Modifier::BOLD);
    if field.focused {
        label_style = label_style.fg(style.focus);
    }
    if field.drag == DragMark::Grabbed {
        label_style = label_style.add_modifier(Modifier::REVERSED);
    }
    let mut lines = vec![Line::from(vec![
        Span::styled(marker, style.base().fg(style.muted)),
        Span::styled(format!("{}:", field.label), label_style),
        Span::styled(format!(" ({})", field.kind), style.base().fg(style.muted)),
    ])];

    lines.push(Line::from(Span::styled(
        format!("{VALUE_INDENT}{}", field.display_value()),
        style.base(),
    )));

    if let Some(error) = &field.error {
        for segment in wrap(error, max_width.max(4) as usize) {
            lines.push(Line::from(Span::styled(
                format!("{VALUE_INDENT}{segment}"),
                style.error(),
            )));
        }
    }
    lines
}

pub fn render_submit(frame: &mut Frame<'_>, area: Rect, submit: &SubmitView, style: &ThemeStyle) {
    let mut button = style.base().fg(style.accent).add_modifier(Modifier::BOLD);
    if !submit.enabled {
        button = style.base().fg(style.muted);
    } else if submit.focused {
        button = button.add_modifier(Modifier::REVERSED);
    }
    let widget = Paragraph::new(Line::from(Span::styled(
        format!("[ {} ]", submit.label),
        button,
    )))
    .alignment(Alignment::Right)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(style.border(submit.focused)),
    );
    frame.render_widget(widget, area);
}
