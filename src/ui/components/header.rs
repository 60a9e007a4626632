//! Header component renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title bar at `row` and returns the next row.
///
/// The title sits on the left, the like count and load status on the right,
/// and the line is padded to the full width.
///
/// ```text
///  Catalog (3 of 30)                              ♥ 2  loaded 1m ago
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let right = if header.status.is_empty() {
        format!("♥ {} ", header.liked_count)
    } else {
        format!("♥ {}  {} ", header.liked_count, header.status)
    };

    let title_len = header.title.chars().count();
    let right_len = right.chars().count();
    let gap = cols.saturating_sub(title_len + right_len);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", header.title);
    print!("{}", " ".repeat(gap));
    if title_len + right_len <= cols {
        print!("{right}");
    }

    print!("{}", Theme::reset());
    row + 1
}
