//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the zcatalog library and
//! the Zellij plugin system. It maps host events to library events, executes
//! the actions the library returns, and supplies the host-backed tick source.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │   Zellij Main Thread     │
//! │  ┌───────────────────┐   │
//! │  │  State (plugin)   │   │  ← UI state, event handling, web requests
//! │  └───────────────────┘   │
//! │          │               │
//! │          │ IPC           │
//! │          ▼               │
//! │  ┌───────────────────┐   │
//! │  │  CatalogWorker    │   │  ← Filter computation
//! │  │  (worker thread)  │   │
//! │  └───────────────────┘   │
//! └──────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess`; the fetch starts once granted
//! 3. **Fetch**: Two `web_request`s, one per collection
//! 4. **Ready**: The catalog is posted to the worker once, filters follow
//! 5. **Render**: Call library render function
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n`: Move down
//! - `Ctrl+p`: Move up
//!
//! In normal mode and when navigating search results:
//! - `j`/`Down`, `k`/`Up`: Move
//! - `Enter`/`l`: Toggle like on the selected item
//! - `Space`: Countdown button
//! - `/`: Search (focus the query)
//! - `q`: Close plugin (normal mode only)
//!
//! While typing a query:
//! - Any character: Extend the query
//! - `Backspace`: Shorten the query
//! - `Enter`: Focus the results
//! - `Esc`: Leave search (also from the results)

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use zcatalog::catalog::{Collection, COLLECTION_CONTEXT_KEY};
use zcatalog::countdown::TickSource;
use zcatalog::worker::{CatalogWorker, WorkerMessage, WorkerResponse};
use zcatalog::{handle_event, Action, Config, Event, InputMode, SearchFocus};

register_plugin!(State);
register_worker!(CatalogWorker, catalog_worker, CATALOG_WORKER);

/// Seconds between countdown ticks.
const TICK_INTERVAL_SECS: f64 = 1.0;

/// Tick source backed by Zellij's one-shot `set_timeout`.
///
/// Each elapsed timeout re-arms the next one while running. At most one
/// timeout is ever outstanding: a resume while an old timeout is still pending
/// reuses it instead of arming a second one, so a quick pause and resume
/// cannot double the tick rate.
#[derive(Debug, Default)]
struct ZellijTicker {
    running: bool,
    pending: u32,
}

impl ZellijTicker {
    fn arm(&mut self) {
        set_timeout(TICK_INTERVAL_SECS);
        self.pending += 1;
    }
}

impl TickSource for ZellijTicker {
    fn start(&mut self) {
        self.running = true;
        if self.pending == 0 {
            self.arm();
        }
    }

    fn stop(&mut self) {
        // Outstanding timeouts cannot be cancelled; they are ignored on arrival.
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn acknowledge(&mut self) -> bool {
        self.pending = self.pending.saturating_sub(1);
        if !self.running {
            return false;
        }
        self.arm();
        true
    }
}

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: zcatalog::AppState,

    /// Worker thread identifier for IPC messaging.
    worker_name: String,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: zcatalog::initialize(&Config::default(), Box::<ZellijTicker>::default()),
            worker_name: "catalog".to_string(),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// Requests `WebAccess` and subscribes to keys, worker messages, web
    /// responses, timers and the permission result. Nothing is fetched until
    /// the permission result arrives.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zcatalog::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            endpoint = %config.endpoint,
            request_limit = config.request_limit,
            countdown_start = config.countdown_start,
            "parsed configuration"
        );
        self.app = zcatalog::initialize(&config, Box::<ZellijTicker>::default());

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_request_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::Timer,
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => match permissions {
                PermissionStatus::Granted => Event::PermissionsGranted,
                PermissionStatus::Denied => Event::PermissionsDenied,
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        zcatalog::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        if self.app.input_mode == InputMode::Search(SearchFocus::Typing) {
            return Some(match key.bare_key {
                BareKey::Enter => Event::FocusResults,
                BareKey::Esc => Event::ExitSearch,
                BareKey::Backspace => Event::Backspace,
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            });
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter | BareKey::Char('l') => Event::ToggleLike,
            BareKey::Char(' ') => Event::CountdownPressed,
            BareKey::Char('/') => match self.app.input_mode {
                InputMode::Normal => Event::SearchMode,
                InputMode::Search(_) => Event::FocusSearchBar,
            },
            BareKey::Esc if self.app.input_mode != InputMode::Normal => Event::ExitSearch,
            BareKey::Char('q') if self.app.input_mode == InputMode::Normal => Event::CloseFocus,
            _ => return None,
        })
    }

    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        if message != self.worker_name {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    /// Routes a web response back to its collection through the request context.
    fn map_web_request_result(
        status: u16,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(collection) = context
            .get(COLLECTION_CONTEXT_KEY)
            .and_then(|path| Collection::from_path(path))
        else {
            tracing::debug!(status, "ignoring web response without a collection context");
            return None;
        };

        tracing::debug!(?collection, status, body_len = body.len(), "collection response");
        Some(Event::CollectionFetched {
            collection,
            status,
            body,
        })
    }

    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(&message) {
            Ok(payload) => {
                tracing::debug!(kind = message.kind(), payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize worker message");
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::PostToWorker(ref message) => self.post_worker_message(message),
            Action::FetchCollection(ref request) => {
                tracing::debug!(url = %request.url, "requesting collection");
                web_request(
                    &request.url,
                    HttpVerb::Get,
                    BTreeMap::new(),
                    vec![],
                    request.context(),
                );
            }
        }
    }
}
