//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place application state changes. Events come
//! from the plugin shim (keys, timer, permission results, web responses) and
//! from the worker (filter results). Each call returns whether the UI should
//! re-render, plus the [`Action`]s the shim must execute.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`
//! - **Search**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`,
//!   `Char`, `Backspace`
//! - **Likes and countdown**: `ToggleLike`, `CountdownPressed`, `Timer`
//! - **Catalog**: `PermissionsGranted`, `PermissionsDenied`, `CollectionFetched`
//! - **Worker**: `WorkerResponse`
//!
//! # Example
//!
//! ```rust
//! use zcatalog::app::{handle_event, Action, AppState, Event};
//! use zcatalog::countdown::ManualTicker;
//! use zcatalog::{Config, Theme};
//!
//! let mut state = AppState::new(&Config::default(), Theme::default(), Box::new(ManualTicker::new()));
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
//! assert_eq!(actions.len(), 2);
//! assert!(matches!(actions[0], Action::FetchCollection(_)));
//! # Ok::<(), zcatalog::ZcatalogError>(())
//! ```

use super::modes::{InputMode, SearchFocus};
use crate::app::{Action, AppState};
use crate::catalog::{Collection, FetchProgress};
use crate::domain::error::{Result, ZcatalogError};
use crate::search::QueryOutcome;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input, host callbacks, or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the selection down by one (wraps to top).
    KeyDown,
    /// Moves the selection up by one (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,

    /// Enters search mode with typing focus.
    SearchMode,
    /// Returns focus to the query box from the results.
    FocusSearchBar,
    /// Moves focus from the query box to the results.
    FocusResults,
    /// Leaves search mode. The query is kept.
    ExitSearch,
    /// Appends a character to the query.
    Char(char),
    /// Removes the last character of the query.
    Backspace,

    /// Toggles the like flag of the selected item.
    ToggleLike,
    /// The countdown's single button was pressed.
    CountdownPressed,
    /// One host timer period elapsed.
    Timer,

    /// Web access was granted; the catalog fetch can start.
    PermissionsGranted,
    /// Web access was refused; the catalog can never load.
    PermissionsDenied,

    /// A collection request finished.
    CollectionFetched {
        collection: Collection,
        /// HTTP status reported by the host.
        status: u16,
        body: Vec<u8>,
    },

    /// A response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Errors
///
/// Returns [`ZcatalogError::Worker`] when the worker reports a failure. Fetch
/// failures are not errors here: they are logged and settle the store as not
/// ready.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::SearchMode => {
            if !state.search_enabled() {
                tracing::debug!(
                    loading = state.store.is_loading(),
                    ready = state.store.is_ready(),
                    "search disabled"
                );
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            if !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if !state.input_mode.is_typing() {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.engine.query(), "leaving search mode");
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if !state.input_mode.is_typing() || !state.search_enabled() {
                return Ok((false, vec![]));
            }
            let mut query = state.engine.query().to_string();
            query.push(*c);
            Ok((true, apply_query(state, &query)))
        }
        Event::Backspace => {
            if !state.input_mode.is_typing() || state.engine.query().is_empty() {
                return Ok((false, vec![]));
            }
            let mut query = state.engine.query().to_string();
            query.pop();
            Ok((true, apply_query(state, &query)))
        }
        Event::ToggleLike => {
            let Some(item_id) = state.selected_item().map(|item| item.id.clone()) else {
                tracing::debug!("no item selected");
                return Ok((false, vec![]));
            };
            Ok((state.likes.toggle(&item_id).is_some(), vec![]))
        }
        Event::CountdownPressed => {
            state.countdown.press();
            Ok((true, vec![]))
        }
        Event::Timer => Ok((state.countdown.advance(1) > 0, vec![])),
        Event::PermissionsGranted => {
            let endpoint = state.endpoint().to_string();
            let requests = state.store.begin_fetch(&endpoint, state.request_limit());
            let actions = requests.into_iter().map(Action::FetchCollection).collect();
            Ok((true, actions))
        }
        Event::PermissionsDenied => {
            let error = ZcatalogError::Fetch("web access permission denied".to_string());
            tracing::error!(error = %error, "catalog fetch failed");
            state.store.fail();
            Ok((true, vec![]))
        }
        Event::CollectionFetched {
            collection,
            status,
            body,
        } => match state.store.accept(*collection, *status, body) {
            Ok(FetchProgress::Pending | FetchProgress::Ignored) => Ok((false, vec![])),
            Ok(FetchProgress::Loaded) => {
                state.engine.reset(state.store.catalog());
                state.selected_index = 0;

                if !state.store.is_ready() {
                    tracing::warn!("catalog fetched but one of the collections is empty");
                    return Ok((true, vec![]));
                }

                let catalog = state.store.catalog().clone();
                Ok((true, vec![Action::PostToWorker(WorkerMessage::load_catalog(catalog))]))
            }
            Err(e) => {
                tracing::error!(error = %e, ?collection, status, "catalog fetch failed");
                Ok((true, vec![]))
            }
        },
        Event::WorkerResponse(response) => match response {
            WorkerResponse::CatalogLoaded { count } => {
                tracing::debug!(count, "worker has the catalog");
                Ok((false, vec![]))
            }
            WorkerResponse::Filtered {
                generation,
                query,
                item_ids,
            } => {
                tracing::debug!(generation, query = %query, matched = item_ids.len(), "filter result received");
                if state.engine.commit(*generation, item_ids, state.store.catalog()) {
                    state.clamp_selection();
                    Ok((true, vec![]))
                } else {
                    Ok((false, vec![]))
                }
            }
            WorkerResponse::Error { message } => Err(ZcatalogError::Worker(message.clone())),
        },
    }
}

/// Feeds a new query to the engine and requests a computation if one is needed.
fn apply_query(state: &mut AppState, query: &str) -> Vec<Action> {
    let outcome = state.engine.set_query(query, state.store.catalog());
    state.clamp_selection();

    match outcome {
        QueryOutcome::Dispatched(request) => vec![Action::PostToWorker(WorkerMessage::filter(
            request.generation,
            request.query,
        ))],
        QueryOutcome::Cleared | QueryOutcome::ShortCircuited => vec![],
    }
}

/// Span-friendly event name; response bodies stay out of the logs.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::KeyDown => "KeyDown",
        Event::KeyUp => "KeyUp",
        Event::CloseFocus => "CloseFocus",
        Event::SearchMode => "SearchMode",
        Event::FocusSearchBar => "FocusSearchBar",
        Event::FocusResults => "FocusResults",
        Event::ExitSearch => "ExitSearch",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::ToggleLike => "ToggleLike",
        Event::CountdownPressed => "CountdownPressed",
        Event::Timer => "Timer",
        Event::PermissionsGranted => "PermissionsGranted",
        Event::PermissionsDenied => "PermissionsDenied",
        Event::CollectionFetched { .. } => "CollectionFetched",
        Event::WorkerResponse(_) => "WorkerResponse",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::{CountdownState, ManualTicker};
    use crate::{Config, Theme};

    const PRODUCTS: &[u8] = br#"{"products":[
        {"id":1,"title":"Red Shoes","description":"Running shoes"},
        {"id":2,"title":"Desk Lamp","description":"Bright LED"}
    ]}"#;
    const USERS: &[u8] = br#"{"users":[
        {"id":1,"firstName":"Ann","lastName":"Lee"},
        {"id":2,"firstName":"Ravi","lastName":"Kumar"}
    ]}"#;

    fn state() -> AppState {
        AppState::new(&Config::default(), Theme::default(), Box::new(ManualTicker::new()))
    }

    fn fetched(collection: Collection, body: &[u8]) -> Event {
        Event::CollectionFetched {
            collection,
            status: 200,
            body: body.to_vec(),
        }
    }

    fn loaded_state() -> AppState {
        let mut state = state();
        handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        handle_event(&mut state, &fetched(Collection::Owners, USERS)).unwrap();
        handle_event(&mut state, &fetched(Collection::Items, PRODUCTS)).unwrap();
        state
    }

    #[test]
    fn second_collection_loads_catalog_and_primes_worker() {
        let mut state = state();
        handle_event(&mut state, &Event::PermissionsGranted).unwrap();

        let (render, actions) = handle_event(&mut state, &fetched(Collection::Items, PRODUCTS)).unwrap();
        assert!(!render);
        assert!(actions.is_empty());

        let (render, actions) = handle_event(&mut state, &fetched(Collection::Owners, USERS)).unwrap();
        assert!(render);
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::LoadCatalog { .. })]
        ));
        assert!(state.search_enabled());
        assert_eq!(state.engine.results().len(), 2);
    }

    #[test]
    fn fetch_failure_is_logged_not_returned() {
        let mut state = state();
        handle_event(&mut state, &Event::PermissionsGranted).unwrap();

        let failed = Event::CollectionFetched {
            collection: Collection::Items,
            status: 500,
            body: vec![],
        };
        let (render, actions) = handle_event(&mut state, &failed).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert!(!state.store.is_loading());
        assert!(!state.store.is_ready());
    }

    #[test]
    fn permission_denial_settles_the_store() {
        let mut state = state();
        handle_event(&mut state, &Event::PermissionsDenied).unwrap();
        assert!(!state.store.is_loading());
        assert!(!state.search_enabled());
    }

    #[test]
    fn search_is_disabled_until_ready() {
        let mut state = state();
        let (render, _) = handle_event(&mut state, &Event::SearchMode).unwrap();
        assert!(!render);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn typing_dispatches_and_commit_filters() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::SearchMode).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::Char('l')).unwrap();
        let [Action::PostToWorker(WorkerMessage::Filter { generation, .. })] = actions.as_slice() else {
            panic!("expected a filter request, got {actions:?}");
        };
        assert!(state.engine.is_computing());

        let response = WorkerResponse::Filtered {
            generation: *generation,
            query: "l".to_string(),
            item_ids: vec!["2".to_string()],
        };
        let (render, _) = handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
        assert!(render);
        assert_eq!(state.engine.results().len(), 1);
        assert!(!state.engine.is_computing());
    }

    #[test]
    fn leaving_search_keeps_the_query() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::Char('x')).unwrap();
        handle_event(&mut state, &Event::ExitSearch).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.engine.query(), "x");
    }

    #[test]
    fn backspace_to_empty_clears_without_a_request() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::Char('z')).unwrap();

        let (render, actions) = handle_event(&mut state, &Event::Backspace).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.engine.results().len(), 2);
    }

    #[test]
    fn like_toggles_selected_item() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::KeyDown).unwrap();
        handle_event(&mut state, &Event::ToggleLike).unwrap();
        assert!(state.likes.is_liked("2"));
        assert!(!state.likes.is_liked("1"));
    }

    #[test]
    fn like_toggle_is_released_within_the_event() {
        let mut state = loaded_state();
        let (render, _) = handle_event(&mut state, &Event::ToggleLike).unwrap();
        assert!(render);
        assert!(state.likes.can_toggle());

        let (render, _) = handle_event(&mut state, &Event::ToggleLike).unwrap();
        assert!(render);
        assert!(!state.likes.is_liked("1"));
    }

    #[test]
    fn countdown_ticks_only_while_running() {
        let mut state = state();
        let (render, _) = handle_event(&mut state, &Event::Timer).unwrap();
        assert!(!render);

        handle_event(&mut state, &Event::CountdownPressed).unwrap();
        assert_eq!(state.countdown.state(), CountdownState::Running);
        let (render, _) = handle_event(&mut state, &Event::Timer).unwrap();
        assert!(render);
        assert_eq!(state.countdown.remaining(), 9);
    }

    #[test]
    fn worker_errors_surface_as_errors() {
        let mut state = state();
        let response = WorkerResponse::Error {
            message: "boom".to_string(),
        };
        assert!(matches!(
            handle_event(&mut state, &Event::WorkerResponse(response)),
            Err(ZcatalogError::Worker(_))
        ));
    }
}
