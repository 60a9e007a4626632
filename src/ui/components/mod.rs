//! Composable UI component renderers.
//!
//! # Components
//!
//! - `header`: Title bar with like count and load status
//! - `search`: Search input box
//! - `list`: Result table (TITLE, OWNER, DESCRIPTION)
//! - `empty`: Message shown in place of the list
//! - `countdown`: Countdown panel
//! - `footer`: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines, search mode only]
//! [List Headers]
//! [List Rows or Empty State]
//! [Border]
//! [Countdown]
//! [Border]
//! [Footer]
//! ```

mod countdown;
mod empty;
mod footer;
mod header;
mod list;
mod search;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use countdown::render_countdown;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use list::{render_list_headers, render_list_rows};
use search::render_search_bar;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the whole pane.
///
/// The bottom block (border, countdown, border, footer) is anchored to the
/// last rows so the countdown stays put while the list grows and shrinks.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }
    current_row = render_list_headers(current_row, theme);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row + 1, empty, theme, cols);
    } else {
        render_list_rows(current_row, &vm.display_items, theme, cols);
    }

    let footer_row = rows.saturating_sub(1);
    let lower_border_row = footer_row.saturating_sub(1);
    let countdown_row = lower_border_row.saturating_sub(1);
    let upper_border_row = countdown_row.saturating_sub(1);

    render_border(upper_border_row, &theme.colors.border, cols);
    render_countdown(countdown_row, &vm.countdown, theme, cols);
    render_border(lower_border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
