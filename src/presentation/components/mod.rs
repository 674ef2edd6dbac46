mod banner;
mod controls;
mod fields;
mod files;
mod footer;
mod popup;

pub use banner::{render_banner, render_error_banner};
pub use controls::render_controls;
pub use fields::{render_fields, render_submit};
pub use files::render_files;
pub use footer::render_footer;
pub use popup::render_popup;

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

/// Cursor at the end of `text` inside a bordered one-line input.
pub(super) fn input_cursor(area: Rect, prefix_width: u16, text: &str) -> (u16, u16) {
    let inner_width = area.width.saturating_sub(2);
    let text_width = UnicodeWidthStr::width(text) as u16;
    let column = prefix_width
        .saturating_add(text_width)
        .min(inner_width.saturating_sub(1));
    (area.x + 1 + column, area.y + 1)
}
