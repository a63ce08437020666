//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point for everything that happens to
//! the plugin: key presses already mapped to intents by the runtime, permission
//! results and web request completions. It mutates [`AppState`] and returns
//! whether a re-render is needed together with the actions to execute.
//!
//! # Event Types
//!
//! - **Input**: `Char`, `Backspace`, `Escape`, `ToggleMode`, `SelectMode`
//! - **Navigation**: `FocusResults`, `FocusInput`, `MoveLeft`/`Right`/`Up`/`Down`
//! - **Search**: `Submit`, `SearchSettled`, `Tick`
//! - **Covers**: `CoverSettled`
//! - **System**: `PermissionsResult`, `CloseFocus`
//!
//! # Example
//!
//! ```
//! use zbookfinder::app::{handle_event, Action, AppState, Event, SearchController};
//! use zbookfinder::domain::QueryBuilder;
//! use zbookfinder::ui::Theme;
//!
//! let mut state = AppState::new(SearchController::new(QueryBuilder::default()), Theme::default());
//! handle_event(&mut state, &Event::Char('D'))?;
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(matches!(actions[0], Action::FetchSearch { .. }));
//! # Ok::<(), zbookfinder::BookFinderError>(())
//! ```

use super::controller::HttpResponse;
use super::modes::InputMode;
use super::outcome::RequestToken;
use crate::app::{Action, AppState};
use crate::domain::error::{BookFinderError, Result};
use crate::domain::SearchMode;

/// Transport failure text used when web access was denied.
pub const WEB_ACCESS_DENIED: &str = "web access permission denied";

/// Events triggered by user input, permission changes or web replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Appends a character to the query.
    Char(char),
    /// Removes the last character from the query.
    Backspace,
    /// Clears a non-empty query, or closes the pane when it is already empty.
    Escape,
    /// Switches between Title and Author.
    ToggleMode,
    /// Selects a search field directly.
    SelectMode(SearchMode),
    /// Submits the current query.
    Submit,
    /// Moves keyboard focus from the search field to the result grid.
    FocusResults,
    /// Moves keyboard focus back to the search field.
    FocusInput,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Hides the plugin pane.
    CloseFocus,

    /// Reports the user's answer to the web access permission request.
    PermissionsResult {
        /// Whether `WebAccess` was granted.
        web_access: bool,
    },

    /// Loader animation timer fired.
    Tick,

    /// A search request completed.
    SearchSettled {
        /// Generation the request was issued with.
        token: RequestToken,
        /// HTTP reply, or the transport failure description.
        response: std::result::Result<HttpResponse, String>,
    },

    /// A cover probe completed.
    CoverSettled {
        /// Generation of the search the card belongs to.
        token: RequestToken,
        /// Card position within the results.
        index: usize,
        /// Whether the image was fetched successfully.
        loaded: bool,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. Actions are executed in order by the plugin
/// runtime. Stale completions return `(false, vec![])`.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for fallible transitions.
///
/// # Tracing
///
/// Each call runs inside a debug-level `handle_event` span.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Char(c) => {
            if state.input_mode != InputMode::Editing {
                return Ok((false, vec![]));
            }
            state.query_input.push(*c);
            tracing::trace!(query = %state.query_input, char = %c, "query updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Editing || state.query_input.pop().is_none() {
                return Ok((false, vec![]));
            }
            Ok((true, vec![]))
        }
        Event::Escape => {
            if state.query_input.is_empty() {
                return Ok((false, vec![Action::CloseFocus]));
            }
            state.query_input.clear();
            state.input_mode = InputMode::Editing;
            Ok((true, vec![]))
        }
        Event::ToggleMode => {
            state.search_mode = state.search_mode.toggled();
            tracing::debug!(mode = state.search_mode.label(), "search mode toggled");
            Ok((true, vec![]))
        }
        Event::SelectMode(mode) => {
            if state.search_mode == *mode {
                return Ok((false, vec![]));
            }
            state.search_mode = *mode;
            Ok((true, vec![]))
        }
        Event::Submit => {
            let request = state.submit_search();
            tracing::info!(
                token = %request.token,
                mode = state.search_mode.label(),
                url = %request.url,
                "search submitted"
            );

            if state.web_access_denied {
                tracing::debug!(token = %request.token, "web access denied, settling search as failed");
                state.apply_search_result(
                    request.token,
                    Err(BookFinderError::Network(WEB_ACCESS_DENIED.to_string())),
                );
                return Ok((true, vec![]));
            }

            let mut actions = vec![Action::FetchSearch {
                token: request.token,
                url: request.url,
            }];
            if !state.tick_scheduled {
                state.tick_scheduled = true;
                actions.push(Action::ScheduleTick);
            }
            Ok((true, actions))
        }
        Event::Tick => {
            state.tick_scheduled = false;
            if !state.controller.outcome().is_loading() {
                return Ok((false, vec![]));
            }
            state.spinner_frame = state.spinner_frame.wrapping_add(1);
            state.tick_scheduled = true;
            Ok((true, vec![Action::ScheduleTick]))
        }
        Event::FocusResults => {
            if state.results().is_empty() || state.input_mode == InputMode::Browsing {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Browsing;
            Ok((true, vec![]))
        }
        Event::FocusInput => {
            if state.input_mode == InputMode::Editing {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Editing;
            Ok((true, vec![]))
        }
        Event::MoveLeft | Event::MoveRight | Event::MoveUp | Event::MoveDown => {
            if state.input_mode != InputMode::Browsing {
                return Ok((false, vec![]));
            }

            #[allow(clippy::cast_possible_wrap)]
            let columns = state.grid_columns.max(1) as isize;
            let delta = match event {
                Event::MoveLeft => -1,
                Event::MoveRight => 1,
                Event::MoveUp => -columns,
                _ => columns,
            };

            if state.move_selection_by(delta) {
                return Ok((true, vec![]));
            }
            if matches!(event, Event::MoveUp) {
                state.input_mode = InputMode::Editing;
                return Ok((true, vec![]));
            }
            Ok((false, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::PermissionsResult { web_access } => {
            tracing::debug!(web_access = web_access, "permission result received");
            state.web_access_denied = !web_access;
            Ok((false, vec![]))
        }
        Event::SearchSettled { token, response } => {
            let response = response
                .clone()
                .map_err(BookFinderError::Network);

            if !state.apply_search_result(*token, response) {
                return Ok((false, vec![]));
            }

            tracing::info!(
                token = %token,
                outcome = state.controller.outcome().label(),
                results = state.results().len(),
                "search settled"
            );
            Ok((true, state.cover_probe_actions()))
        }
        Event::CoverSettled { token, index, loaded } => {
            let (changed, follow_up) = state.apply_cover_result(*token, *index, *loaded);
            tracing::trace!(token = %token, index = index, loaded = loaded, "cover probe settled");
            Ok((changed, follow_up.into_iter().collect()))
        }
    }
}
