use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::super::{
    style::ThemeStyle,
    tree::{FilePreview, FilesView},
};

const CHIP_GAP: &str = "   ";
const REMOVE_MARK: &str = " ✕";

pub fn render_files(frame: &mut Frame<'_>, area: Rect, files: &FilesView, style: &ThemeStyle) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;
    let (lines, selected_line) = chip_lines(files, inner_width, style);
    let scroll = selected_line.saturating_sub(inner_height.saturating_sub(1));
    let widget = Paragraph::new(lines)
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    format!("Files ({})", files.entries.len()),
                    style.heading(),
                ))
                .border_style(style.border(files.focused)),
        );
    frame.render_widget(widget, area);
}

/// Lays chips out left to right, starting a new line when the next chip would not fit.
/// Returns the lines and the index of the line holding the selected chip.
pub(crate) fn chip_lines(
    files: &FilesView,
    max_width: usize,
    style: &ThemeStyle,
) -> (Vec<Line<'static>>, usize) {
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut used = 0;
    let mut selected_line = 0;
    for (index, entry) in files.entries.iter().enumerate() {
        let mut chip = style.base();
        if files.focused && index == files.selected {
            chip = chip.fg(style.focus).add_modifier(Modifier::BOLD);
        }
        let label = match &entry.preview {
            FilePreview::Image { size, .. } => format!("🖼 {} ({})", entry.name, human_size(*size)),
            FilePreview::NameOnly { .. } => entry.name.clone(),
        };
        let width = UnicodeWidthStr::width(label.as_str()) + UnicodeWidthStr::width(REMOVE_MARK);
        let gap = if spans.is_empty() { 0 } else { CHIP_GAP.len() };
        if !spans.is_empty() && used + gap + width > max_width {
            lines.push(Line::from(std::mem::take(&mut spans)));
            used = 0;
        } else if gap > 0 {
            spans.push(Span::raw(CHIP_GAP));
            used += gap;
        }
        if index == files.selected {
            selected_line = lines.len();
        }
        spans.push(Span::styled(label, chip));
        spans.push(Span::styled(REMOVE_MARK, style.error()));
        used += width;
    }
    if !spans.is_empty() {
        lines.push(Line::from(spans));
    }
    (lines, selected_line)
}

pub(crate) fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
