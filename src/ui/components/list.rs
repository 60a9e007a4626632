//! Result list renderer.
//!
//! Items are shown as a table with a like marker, TITLE, OWNER and
//! DESCRIPTION columns. The selected row is drawn with the selection colors
//! across the full width; match highlights apply to the title only.

use crate::ui::helpers::{self, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const MARKER_WIDTH: usize = 2;
const TITLE_WIDTH: usize = 32;
const OWNER_WIDTH: usize = 20;

/// Renders the column headers at `row` and returns the next row.
pub fn render_list_headers(row: usize, theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(
        "{:<MARKER_WIDTH$}{:<TITLE_WIDTH$} {:<OWNER_WIDTH$} {}",
        "", "TITLE", "OWNER", "DESCRIPTION"
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders every item from `row` down and returns the row after the last one.
pub fn render_list_rows(
    row: usize,
    items: &[DisplayItem],
    theme: &Theme,
    cols: usize,
) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_list_row(current_row, item, theme, cols);
    }
    current_row
}

fn render_list_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let base_fg = if item.is_selected {
        &theme.colors.selection_fg
    } else {
        &theme.colors.text_normal
    };
    if item.is_selected {
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    }

    if item.is_liked {
        print!("{}♥ ", Theme::fg(&theme.colors.liked_fg));
    } else {
        print!("  ");
    }
    print!("{}", Theme::fg(base_fg));

    let title = truncate(&item.title, TITLE_WIDTH);
    let title_len = title.chars().count();
    helpers::render_highlighted_text(&title, &item.highlight_ranges, theme, item.is_selected);
    print!("{}", " ".repeat(TITLE_WIDTH.saturating_sub(title_len) + 1));

    let owner = truncate(item.owner.as_deref().unwrap_or("-"), OWNER_WIDTH);
    print!("{owner:<OWNER_WIDTH$} ");

    let used = MARKER_WIDTH + TITLE_WIDTH + OWNER_WIDTH + 2;
    let description = truncate(&item.description, cols.saturating_sub(used));
    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{description}");
    print!("{}", " ".repeat(cols.saturating_sub(used + description.chars().count())));

    print!("{}", Theme::reset());
    row + 1
}
