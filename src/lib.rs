//! zbookfinder: a Zellij plugin for searching the Open Library catalogue.
//!
//! Type a title or an author, press Enter, and browse the matching books as a
//! grid of cards showing title, authors, first publication year and cover.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← keys, web requests
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling                                   │
//! │  - Search state machine, request tokens             │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                   │
//! ┌───────────────────────┐   ┌───────────────────────────┐
//! │ UI Layer (ui/)        │   │ Domain Layer (domain/)    │
//! │ - Card grid, spinner  │   │ - Query URL building      │
//! │ - Banners, theming    │   │ - Payload parsing/filter  │
//! │                       │   │ - Cover URLs, errors      │
//! └───────────────────────┘   └───────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Observability                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - OpenTelemetry file export (observability/)       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zbookfinder.wasm" {
//!         api_base_url "https://openlibrary.org"
//!         probe_covers "true"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use zbookfinder::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::from_zellij(&BTreeMap::new()));
//!
//! for c in "Dune".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(matches!(
//!     &actions[0],
//!     Action::FetchSearch { url, .. } if url.ends_with("search.json?title=Dune&limit=21")
//! ));
//! # Ok::<(), zbookfinder::BookFinderError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchController};
pub use domain::{BookFinderError, Result};
pub use ui::Theme;

use domain::query::{QueryBuilder, DEFAULT_API_BASE_URL};
use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Open Library base URL; `/search.json` is appended.
    pub api_base_url: String,

    /// Whether to probe cover images after each successful search.
    pub probe_covers: bool,

    /// Built-in theme name: `catppuccin-mocha` or `catppuccin-latte`.
    ///
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file, with `~` already mapped to `/host`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            probe_covers: true,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unknown keys are ignored and malformed values fall back to defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use zbookfinder::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("probe_covers".to_string(), "false".to_string());
    /// map.insert("theme_file".to_string(), "~/themes/book.toml".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert!(!config.probe_covers);
    /// assert_eq!(config.theme_file.as_deref(), Some("/host/themes/book.toml"));
    /// assert_eq!(config.api_base_url, "https://openlibrary.org");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let non_empty = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let api_base_url = non_empty("api_base_url").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let probe_covers = non_empty("probe_covers")
            .and_then(|v| v.to_ascii_lowercase().parse::<bool>().ok())
            .unwrap_or(true);

        Self {
            api_base_url,
            probe_covers,
            theme_name: non_empty("theme"),
            theme_file: non_empty("theme_file").map(|p| infrastructure::expand_tilde(&p)),
            trace_level: non_empty("trace_level"),
        }
    }
}

/// Builds the initial application state from configuration.
///
/// Theme precedence is `theme_file`, then `theme`, then the default. An
/// unloadable theme or an invalid `api_base_url` is logged and replaced by the
/// default.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing zbookfinder plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    let builder = QueryBuilder::new(&config.api_base_url).unwrap_or_else(|e| {
        tracing::warn!(api_base_url = %config.api_base_url, error = %e, "invalid api_base_url, using default");
        QueryBuilder::default()
    });

    let mut state = AppState::new(SearchController::new(builder), theme);
    state.probe_covers = config.probe_covers;
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn config_values_are_parsed() {
        let config = Config::from_zellij(&map(&[
            ("api_base_url", " http://localhost:8080/ol "),
            ("probe_covers", "FALSE"),
            ("theme", "catppuccin-latte"),
            ("trace_level", "zbookfinder=debug"),
        ]));

        assert_eq!(config.api_base_url, "http://localhost:8080/ol");
        assert!(!config.probe_covers);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.trace_level.as_deref(), Some("zbookfinder=debug"));
    }

    #[test]
    fn malformed_values_fall_back() {
        let config = Config::from_zellij(&map(&[("probe_covers", "sometimes"), ("api_base_url", "  ")]));
        assert!(config.probe_covers);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn initialize_applies_config() {
        let state = initialize(&Config {
            api_base_url: "http://localhost:8080/ol".to_string(),
            probe_covers: false,
            theme_name: Some("catppuccin-latte".to_string()),
            ..Config::default()
        });

        assert!(!state.probe_covers);
        assert_eq!(state.theme.name, "catppuccin-latte");
        assert_eq!(
            state.controller.builder().endpoint(),
            "http://localhost:8080/ol/search.json"
        );
    }

    #[test]
    fn initialize_falls_back_on_bad_inputs() {
        let state = initialize(&Config {
            api_base_url: "not a url".to_string(),
            theme_name: Some("solarized".to_string()),
            ..Config::default()
        });

        assert_eq!(state.theme, Theme::default());
        assert_eq!(
            state.controller.builder().endpoint(),
            "https://openlibrary.org/search.json"
        );
    }

    #[test]
    fn theme_file_takes_precedence() {
        let mut custom = Theme::from_name("catppuccin-latte").unwrap();
        custom.name = "from-file".to_string();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(toml::to_string(&custom).unwrap().as_bytes()).unwrap();

        let state = initialize(&Config {
            theme_name: Some("catppuccin-mocha".to_string()),
            theme_file: Some(file.path().to_string_lossy().into_owned()),
            ..Config::default()
        });

        assert_eq!(state.theme.name, "from-file");
    }
}
