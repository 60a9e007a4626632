//! Application state and view model computation.
//!
//! [`AppState`] ties the catalog store, the filter engine, the like registry and
//! the countdown together with the transient UI state (selection and input
//! mode). It is the single source of truth the renderer reads from.
//!
//! # View Model Computation
//!
//! `compute_viewmodel` turns a state snapshot into a [`UIViewModel`]: it windows
//! the filtered results around the selection, resolves owners and like flags,
//! computes match highlights, and chooses the empty-state message.

use super::modes::{InputMode, SearchFocus};
use crate::catalog::DataStore;
use crate::countdown::{CountdownMachine, TickSource};
use crate::domain::Item;
use crate::likes::LikeRegistry;
use crate::search::{highlight_range, FilterEngine};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CountdownInfo, DisplayItem, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, UIViewModel,
};
use crate::Config;

/// Rows taken by everything except the result list in normal mode.
const NORMAL_CHROME_ROWS: usize = 9;

/// Extra rows taken by the search box.
const SEARCH_BAR_ROWS: usize = 3;

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Fetched catalog with its loading and ready flags.
    pub store: DataStore,

    /// Query and committed filter result.
    pub engine: FilterEngine,

    /// Like flags and the toggle guard.
    pub likes: LikeRegistry,

    /// The countdown and the tick source it drives.
    pub countdown: CountdownMachine<Box<dyn TickSource>>,

    /// Zero-based index into the committed filter result.
    pub selected_index: usize,

    pub input_mode: InputMode,

    pub theme: Theme,

    endpoint: String,
    request_limit: u32,
}

impl AppState {
    /// Creates a state that is waiting for its catalog.
    #[must_use]
    pub fn new(config: &Config, theme: Theme, ticker: Box<dyn TickSource>) -> Self {
        Self {
            store: DataStore::new(),
            engine: FilterEngine::new(),
            likes: LikeRegistry::new(),
            countdown: CountdownMachine::new(config.countdown_start, ticker),
            selected_index: 0,
            input_mode: InputMode::Normal,
            theme,
            endpoint: config.endpoint.clone(),
            request_limit: config.request_limit,
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub const fn request_limit(&self) -> u32 {
        self.request_limit
    }

    /// Whether the query box accepts input.
    ///
    /// Search is disabled while loading and when no usable catalog arrived.
    #[must_use]
    pub const fn search_enabled(&self) -> bool {
        !self.store.is_loading() && self.store.is_ready()
    }

    /// Moves the selection down by one, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.engine.results().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves the selection up by one, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.engine.results().len();
        if len == 0 {
            return;
        }
        self.selected_index = self.selected_index.checked_sub(1).unwrap_or(len - 1);
    }

    /// Keeps the selection inside the committed result set.
    pub fn clamp_selection(&mut self) {
        let len = self.engine.results().len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<&Item> {
        self.engine.results().get(self.selected_index)
    }

    /// Computes a renderable view model for a `rows` x `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, _cols: usize) -> UIViewModel {
        let results = self.engine.results();
        let available_rows = self.calculate_available_rows(rows).max(1);

        let mut visible_start = self
            .selected_index
            .saturating_sub(available_rows / 2)
            .min(results.len());
        let visible_end = (visible_start + available_rows).min(results.len());
        if visible_end - visible_start < available_rows && results.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let display_items = results[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, item)| self.compute_display_item(item, visible_start + offset))
            .collect();

        UIViewModel {
            display_items,
            selected_index: self.selected_index.saturating_sub(visible_start),
            header: self.compute_header(),
            footer: self.compute_footer(),
            empty_state: self.compute_empty_state(),
            search_bar: self.compute_search_bar(),
            countdown: self.compute_countdown(),
        }
    }

    fn compute_display_item(&self, item: &Item, absolute_idx: usize) -> DisplayItem {
        let highlight_ranges = if self.engine.query().is_empty() {
            vec![]
        } else {
            highlight_range(&item.title, self.engine.query()).into_iter().collect()
        };

        DisplayItem {
            title: item.title.clone(),
            owner: self.store.catalog().owner_for(item).map(crate::domain::Owner::full_name),
            description: item.description.clone(),
            is_selected: absolute_idx == self.selected_index,
            is_liked: self.likes.is_liked(&item.id),
            highlight_ranges,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let count = self.engine.results().len();
        let total = self.store.catalog().items.len();

        let title = if self.engine.query().is_empty() {
            format!(" Catalog ({total}) ")
        } else {
            format!(" Catalog ({count} of {total}) ")
        };

        let status = if self.store.is_loading() {
            "loading".to_string()
        } else {
            self.store.loaded_at().map_or_else(String::new, |loaded_at| {
                format!("loaded {}", format_age(loaded_at, chrono::Utc::now().timestamp()))
            })
        };

        HeaderInfo {
            title,
            status,
            liked_count: self.likes.liked_count(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Search(SearchFocus::Typing) => {
                "ESC: leave search  Enter: results  Ctrl+n/p: navigate  Type to filter"
            }
            InputMode::Search(SearchFocus::Navigating) => {
                "ESC: leave search  /: edit query  j/k: navigate  Enter: like"
            }
            InputMode::Normal => {
                "j/k: navigate  /: search  Enter/l: like  Space: countdown  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    /// Picks the empty-state message.
    ///
    /// A failed fetch and a fetch that returned nothing look the same.
    fn compute_empty_state(&self) -> Option<EmptyState> {
        if self.store.is_loading() {
            return Some(EmptyState {
                message: "Loading...".to_string(),
                subtitle: "Fetching the catalog".to_string(),
            });
        }
        if !self.store.is_ready() {
            return Some(EmptyState {
                message: "No data found".to_string(),
                subtitle: "The catalog could not be loaded".to_string(),
            });
        }
        if self.engine.results().is_empty() {
            let subtitle = if self.engine.is_computing() {
                "Filtering...".to_string()
            } else {
                format!("Nothing matches \"{}\"", self.engine.query())
            };
            return Some(EmptyState {
                message: "No filtered data found".to_string(),
                subtitle,
            });
        }
        None
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        match self.input_mode {
            InputMode::Search(focus) => Some(SearchBarInfo {
                query: self.engine.query().to_string(),
                is_focused: focus == SearchFocus::Typing,
                is_computing: self.engine.is_computing(),
            }),
            InputMode::Normal => None,
        }
    }

    fn compute_countdown(&self) -> CountdownInfo {
        CountdownInfo {
            remaining: self.countdown.remaining(),
            start: self.countdown.start_value(),
            state: self.countdown.state(),
            button_label: self.countdown.label(),
        }
    }

    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Normal => total_rows.saturating_sub(NORMAL_CHROME_ROWS),
            InputMode::Search(_) => total_rows.saturating_sub(NORMAL_CHROME_ROWS + SEARCH_BAR_ROWS),
        }
    }
}

/// Formats the distance between two unix timestamps as "just now", "5m ago", ...
#[must_use]
pub fn format_age(then: i64, now: i64) -> String {
    let seconds = now.saturating_sub(then).max(0);
    match seconds {
        0..=59 => "just now".to_string(),
        60..=3599 => format!("{}m ago", seconds / 60),
        3600..=86_399 => format!("{}h ago", seconds / 3600),
        _ => format!("{}d ago", seconds / 86_400),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::countdown::ManualTicker;
    use crate::domain::Owner;

    fn loaded_state() -> AppState {
        let mut state = AppState::new(&Config::default(), Theme::default(), Box::new(ManualTicker::new()));
        let catalog = Catalog::new(
            vec![
                Item::new("1", "Red Shoes", "Running shoes"),
                Item::new("2", "Desk Lamp", "Bright LED"),
                Item::new("3", "Green Mug", "Ceramic"),
            ],
            vec![Owner::new(1, "Ann", "Lee"), Owner::new(2, "Ravi", "Kumar")],
        );
        state.store.load(catalog);
        state.engine.reset(state.store.catalog());
        state
    }

    #[test]
    fn loading_state_shows_loading_message() {
        let state = AppState::new(&Config::default(), Theme::default(), Box::new(ManualTicker::new()));
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.map(|e| e.message), Some("Loading...".to_string()));
        assert!(!state.search_enabled());
    }

    #[test]
    fn failed_fetch_shows_no_data() {
        let mut state = AppState::new(&Config::default(), Theme::default(), Box::new(ManualTicker::new()));
        state.store.fail();
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.map(|e| e.message), Some("No data found".to_string()));
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut state = loaded_state();
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn display_items_resolve_owners_and_likes() {
        let mut state = loaded_state();
        state.likes.toggle("2");
        let vm = state.compute_viewmodel(24, 80);

        assert_eq!(vm.display_items.len(), 3);
        assert_eq!(vm.display_items[0].owner.as_deref(), Some("Ann Lee"));
        assert!(vm.display_items[1].is_liked);
        assert!(vm.display_items[2].owner.is_none());
        assert!(vm.display_items[0].is_selected);
        assert_eq!(vm.header.liked_count, 1);
        assert!(vm.empty_state.is_none());
    }

    #[test]
    fn window_follows_the_selection() {
        let mut state = loaded_state();
        state.selected_index = 2;
        // Leaves room for exactly one row.
        let vm = state.compute_viewmodel(NORMAL_CHROME_ROWS + 1, 80);
        assert_eq!(vm.display_items.len(), 1);
        assert_eq!(vm.display_items[0].title, "Green Mug");
        assert_eq!(vm.selected_index, 0);
    }

    #[test]
    fn ages_are_coarse() {
        assert_eq!(format_age(100, 130), "just now");
        assert_eq!(format_age(0, 125), "2m ago");
        assert_eq!(format_age(0, 7200), "2h ago");
        assert_eq!(format_age(0, 200_000), "2d ago");
        assert_eq!(format_age(50, 10), "just now");
    }
}
