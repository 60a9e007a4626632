//! Empty state component renderer.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders a centered two-line message starting at `row`.
///
/// Used in place of the result list while loading, when the catalog is not
/// available, and when a query matches nothing. An empty subtitle still
/// clears its line.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print_centered(&empty.message, cols);

    position_cursor(row + 1, 1);
    print!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    print_centered(&empty.subtitle, cols);
}

fn print_centered(text: &str, cols: usize) {
    let text = truncate(text, cols);
    let len = text.chars().count();
    let left = cols.saturating_sub(len) / 2;

    print!("{:left$}{text}{:right$}", "", "", right = cols.saturating_sub(left + len));
    print!("{}", Theme::reset());
}
