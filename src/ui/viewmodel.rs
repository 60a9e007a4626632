//! View model types representing renderable UI state.
//!
//! View models are created by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data.

use crate::countdown::CountdownState;

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Rows of the visible window of filtered results.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    pub header: HeaderInfo,

    pub footer: FooterInfo,

    /// Shown in place of the result list when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    /// Present while in search mode.
    pub search_bar: Option<SearchBarInfo>,

    pub countdown: CountdownInfo,
}

/// One row of the result list.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    pub title: String,

    /// Owner's full name; `None` when the item has no positional owner.
    pub owner: Option<String>,

    pub description: String,

    pub is_selected: bool,

    pub is_liked: bool,

    /// Title ranges to highlight, as `(start, end)` char indices with an exclusive end.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Title bar contents.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,

    /// Right-hand status, e.g. "loaded 2m ago".
    pub status: String,

    pub liked_count: usize,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message (e.g., "No data found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search box contents.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,

    /// Whether keystrokes go to the query (as opposed to the results).
    pub is_focused: bool,

    /// Whether a filter computation is outstanding.
    pub is_computing: bool,
}

/// Countdown panel contents.
#[derive(Debug, Clone)]
pub struct CountdownInfo {
    pub remaining: u32,
    pub start: u32,
    pub state: CountdownState,
    pub button_label: &'static str,
}
