//! zcatalog: a Zellij plugin for browsing a remote product catalog.
//!
//! The plugin fetches two related collections (items and their owners) once at
//! startup and provides:
//! - Search-as-you-type filtering computed on a Zellij worker thread, where a
//!   stale computation never overwrites a newer one
//! - Per-item likes guarded so only one toggle is applied at a time
//! - A countdown timer with idle, running, paused and finished states
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Event handling
//! │  - Event → state mutation + actions                 │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Core          │   │ Worker Layer  │
//! │ (ui/)         │   │ catalog/      │   │ (worker/)     │
//! │ - Rendering   │   │ search/       │   │ - Filtering   │
//! │ - Theming     │   │ likes/        │   │ - IPC bridge  │
//! │ - Components  │   │ countdown/    │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Item / Owner, error types (domain/)              │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry spans exported as OTLP JSON        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zcatalog.wasm" {
//!         endpoint "https://dummyjson.com"
//!         request_limit "200"
//!         countdown_start "10"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use zcatalog::countdown::ManualTicker;
//! use zcatalog::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default(), Box::new(ManualTicker::new()));
//!
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
//! assert_eq!(actions.len(), 2); // one request per collection
//! # Ok::<(), zcatalog::ZcatalogError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod catalog;
pub mod countdown;
pub mod domain;
pub mod infrastructure;
pub mod likes;
pub mod observability;
pub mod search;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus};
pub use domain::{Item, Owner, Result, ZcatalogError};
pub use ui::Theme;

use countdown::TickSource;
use std::collections::BTreeMap;

/// Base URL used when `endpoint` is not configured.
pub const DEFAULT_ENDPOINT: &str = "https://dummyjson.com";

/// Collection size cap used when `request_limit` is not configured.
pub const DEFAULT_REQUEST_LIMIT: u32 = 200;

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the catalog service, without a trailing slash.
    pub endpoint: String,

    /// Maximum number of entries requested per collection.
    pub request_limit: u32,

    /// Value the countdown starts from and resets to. Always at least 1.
    pub countdown_start: u32,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a TOML theme file; `~` resolves to the host home directory.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for spans, e.g. `debug`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_limit: DEFAULT_REQUEST_LIMIT,
            countdown_start: countdown::DEFAULT_START,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Every key is optional. Values that fail to parse are logged and
    /// replaced by their default rather than failing the plugin load.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zcatalog::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("endpoint".to_string(), "http://localhost:8080/".to_string());
    /// map.insert("countdown_start".to_string(), "30".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.endpoint, "http://localhost:8080");
    /// assert_eq!(config.countdown_start, 30);
    /// assert_eq!(config.request_limit, 200);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let endpoint = config
            .get("endpoint")
            .map(|s| s.trim().trim_end_matches('/'))
            .filter(|s| !s.is_empty())
            .map_or_else(|| DEFAULT_ENDPOINT.to_string(), String::from);

        Self {
            endpoint,
            request_limit: positive_or_default(config, "request_limit", DEFAULT_REQUEST_LIMIT),
            countdown_start: positive_or_default(config, "countdown_start", countdown::DEFAULT_START),
            theme_name: non_empty(config, "theme"),
            theme_file: non_empty(config, "theme_file"),
            trace_level: non_empty(config, "trace_level"),
        }
    }
}

fn non_empty(config: &BTreeMap<String, String>, key: &str) -> Option<String> {
    config
        .get(key)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn positive_or_default(config: &BTreeMap<String, String>, key: &str, default: u32) -> u32 {
    config.get(key).map_or(default, |raw| {
        parse_positive(key, raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, default, "invalid configuration value, using default");
            default
        })
    })
}

fn parse_positive(key: &str, raw: &str) -> Result<u32> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(ZcatalogError::Config(format!("{key} must be positive"))),
        Ok(value) => Ok(value),
        Err(e) => Err(ZcatalogError::Config(format!("{key} = {raw:?}: {e}"))),
    }
}

/// Resolves the theme: `theme_file` first, then `theme_name`, then the default.
fn load_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        return Theme::from_file(infrastructure::host_path(theme_file)).unwrap_or_else(|e| {
            tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
            Theme::default()
        });
    }

    config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
        Theme::from_name(theme_name).unwrap_or_else(|| {
            tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
            Theme::default()
        })
    })
}

/// Creates the application state for a freshly loaded plugin.
///
/// The catalog starts out loading; nothing is fetched until the host grants
/// web access and [`Event::PermissionsGranted`] is handled.
pub fn initialize(config: &Config, ticker: Box<dyn TickSource>) -> AppState {
    tracing::debug!(endpoint = %config.endpoint, "initializing zcatalog plugin");

    AppState::new(config, load_theme(config), ticker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::ManualTicker;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("request_limit", "lots"),
            ("countdown_start", "0"),
        ]));

        assert_eq!(config.request_limit, DEFAULT_REQUEST_LIMIT);
        assert_eq!(config.countdown_start, countdown::DEFAULT_START);
    }

    #[test]
    fn test_parse_positive_reports_config_errors() {
        assert_eq!(parse_positive("request_limit", " 50 ").unwrap(), 50);
        assert!(matches!(parse_positive("request_limit", "0"), Err(ZcatalogError::Config(_))));
        assert!(matches!(parse_positive("request_limit", "-3"), Err(ZcatalogError::Config(_))));
    }

    #[test]
    fn test_blank_strings_are_unset() {
        let config = Config::from_zellij(&map(&[("endpoint", "  "), ("theme", ""), ("trace_level", "debug")]));

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.theme_name, None);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_theme_file_takes_precedence() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r##"
name = "custom"

[colors]
header_fg = "#112233"
selection_fg = "#000000"
selection_bg = "#ffffff"
text_normal = "#cccccc"
text_dim = "#888888"
border = "#444444"
search_bar_border = "#555555"
match_highlight_fg = "#ff0000"
match_highlight_bg = "#00ff00"
empty_state_fg = "#777777"
liked_fg = "#ff00ff"
countdown_fg = "#00ffff"
"##
        )
        .unwrap();

        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            theme_file: Some(file.path().display().to_string()),
            ..Config::default()
        };

        assert_eq!(load_theme(&config).name, "custom");
    }

    #[test]
    fn test_unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("solarized".to_string()),
            ..Config::default()
        };

        assert_eq!(load_theme(&config).name, Theme::default().name);
    }

    #[test]
    fn test_initialize_starts_loading() {
        let state = initialize(&Config::default(), Box::new(ManualTicker::new()));

        assert!(state.store.is_loading());
        assert!(!state.search_enabled());
        assert_eq!(state.countdown.remaining(), countdown::DEFAULT_START);
    }
}
