//! Input mode state types.
//!
//! The application operates in one of two input modes:
//! - **Normal**: navigation, likes, and the countdown button
//! - **Search**: the query box has focus, either for typing or for walking the
//!   filtered results
//!
//! Leaving search keeps the query; the list stays filtered until the query is
//! emptied.

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Characters extend the query, backspace shortens it.
    Typing,

    /// Moving through filtered results; `Enter` likes the selected item.
    Navigating,
}

/// Current input handling mode.
///
/// Determines how keys are mapped to events and which footer hints are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default mode: j/k (navigate), / (search), enter or l (like),
    /// space (countdown), q (quit).
    Normal,

    /// Search mode with a [`SearchFocus`].
    Search(SearchFocus),
}

impl InputMode {
    #[must_use]
    pub const fn is_typing(self) -> bool {
        matches!(self, Self::Search(SearchFocus::Typing))
    }
}
