//! Zellij plugin wrapper and entry point.
//!
//! This is the thin integration layer between the zbookfinder library and the
//! Zellij plugin system. It maps Zellij events onto library events, runs
//! [`handle_event`], and executes the returned actions with host API calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, build `AppState`
//! 2. **Permissions**: Request `WebAccess`
//! 3. **Subscribe**: `Key`, `WebRequestResult`, `Timer`, `PermissionRequestResult`
//! 4. **Update**: Translate events, delegate to the library, run actions
//! 5. **Render**: Record the pane size and draw a frame
//!
//! # Web Requests
//!
//! Requests are fire-and-forget. Each carries a context map produced by
//! `RequestContext::to_context_map`; the matching `WebRequestResult` hands it
//! back and is routed to `SearchSettled` or `CoverSettled`. Transport failures
//! arrive from the host as a non-2xx status.
//!
//! # Keybindings
//!
//! While editing the query:
//! - Characters: type
//! - `Backspace`: delete
//! - `Tab`: toggle Title/Author
//! - `Ctrl+t` / `Ctrl+a`: select Title / Author
//! - `Enter`: search
//! - `Down`: move to results
//! - `Esc`: clear query, or close when empty
//!
//! While browsing results:
//! - `h`/`j`/`k`/`l` or arrows: move between cards
//! - `/` or `i` or `Esc`: back to the query
//! - `Tab`: toggle Title/Author
//! - `Enter`: search again
//! - `q`: close

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
mod plugin {
    use std::collections::{BTreeMap, VecDeque};
    use zellij_tile::prelude::*;

    use zbookfinder::app::actions::SPINNER_INTERVAL_SECS;
    use zbookfinder::app::{HttpResponse, RequestContext, TraceContext};
    use zbookfinder::domain::SearchMode;
    use zbookfinder::{handle_event, Action, Config, Event, InputMode};

    /// Plugin state wrapper.
    pub struct State {
        app: zbookfinder::AppState,
    }

    impl Default for State {
        fn default() -> Self {
            Self {
                app: zbookfinder::initialize(&Config::default()),
            }
        }
    }

    impl ZellijPlugin for State {
        fn load(&mut self, configuration: BTreeMap<String, String>) {
            let config = Config::from_zellij(&configuration);
            zbookfinder::observability::init_tracing(config.trace_level.as_deref());

            let _guard = tracing::debug_span!("plugin_load").entered();

            tracing::debug!(
                api_base_url = %config.api_base_url,
                probe_covers = config.probe_covers,
                "parsed configuration"
            );
            self.app = zbookfinder::initialize(&config);

            request_permission(&[PermissionType::WebAccess]);
            subscribe(&[
                EventType::Key,
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
                zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                    match Self::map_web_result_event(status, body, &context) {
                        Some(event) => event,
                        None => return false,
                    }
                }
                zellij_tile::prelude::Event::Timer(_) => Event::Tick,
                zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                    let web_access = matches!(status, PermissionStatus::Granted);
                    if !web_access {
                        tracing::warn!("web access denied - searches will fail");
                    }
                    Event::PermissionsResult { web_access }
                }
                _ => return false,
            };

            self.dispatch(our_event)
        }

        fn render(&mut self, rows: usize, cols: usize) {
            self.app.set_viewport(rows, cols);
            zbookfinder::ui::render(&self.app, rows, cols);
        }
    }

    impl State {
        /// Runs an event through the library and executes the resulting actions.
        fn dispatch(&mut self, event: Event) -> bool {
            let mut queue = VecDeque::from([event]);
            let mut should_render = false;

            while let Some(event) = queue.pop_front() {
                match handle_event(&mut self.app, &event) {
                    Ok((render, actions)) => {
                        tracing::debug!(action_count = actions.len(), should_render = render, "event handled");
                        should_render |= render;
                        for action in &actions {
                            if let Some(follow_up) = Self::execute_action(action) {
                                queue.push_back(follow_up);
                            }
                        }
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "error handling event");
                    }
                }
            }

            should_render
        }

        fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
            match event {
                zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
                zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                    format!("WebRequestResult({status})")
                }
                zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
                zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                    "PermissionRequestResult".to_string()
                }
                _ => "Other".to_string(),
            }
        }

        /// Maps keyboard events to application events for the current input mode.
        fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
            tracing::trace!(bare_key = ?key.bare_key, "key event");

            if key.has_modifiers(&[KeyModifier::Ctrl]) {
                return match key.bare_key {
                    BareKey::Char('t') => Some(Event::SelectMode(SearchMode::Title)),
                    BareKey::Char('a') => Some(Event::SelectMode(SearchMode::Author)),
                    _ => None,
                };
            }
            let plain = key.key_modifiers.iter().all(|m| *m == KeyModifier::Shift);
            if !plain {
                return None;
            }

            Some(match (self.app.input_mode, key.bare_key) {
                (_, BareKey::Tab) => Event::ToggleMode,
                (_, BareKey::Enter) => Event::Submit,

                (InputMode::Editing, BareKey::Esc) => Event::Escape,
                (InputMode::Editing, BareKey::Down) => Event::FocusResults,
                (InputMode::Editing, BareKey::Backspace) => Event::Backspace,
                (InputMode::Editing, BareKey::Char(c)) => Event::Char(c),

                (InputMode::Browsing, BareKey::Left | BareKey::Char('h')) => Event::MoveLeft,
                (InputMode::Browsing, BareKey::Right | BareKey::Char('l')) => Event::MoveRight,
                (InputMode::Browsing, BareKey::Up | BareKey::Char('k')) => Event::MoveUp,
                (InputMode::Browsing, BareKey::Down | BareKey::Char('j')) => Event::MoveDown,
                (InputMode::Browsing, BareKey::Esc | BareKey::Char('/' | 'i')) => Event::FocusInput,
                (InputMode::Browsing, BareKey::Char('q')) => Event::CloseFocus,

                _ => return None,
            })
        }

        /// Maps a web request result back to the request that issued it.
        fn map_web_result_event(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
            let trace = TraceContext::from_context_map(context);
            let _guard = tracing::debug_span!(
                "web_request_result",
                status = status,
                body_len = body.len(),
                origin_trace_id = trace.as_ref().map(|t| t.trace_id.as_str()),
                origin_span_id = trace.as_ref().map(|t| t.parent_span_id.as_str()),
            )
            .entered();

            match RequestContext::from_context_map(context) {
                Some(RequestContext::Search { token }) => Some(Event::SearchSettled {
                    token,
                    response: Ok(HttpResponse::new(status, body)),
                }),
                Some(RequestContext::Cover { token, index }) => Some(Event::CoverSettled {
                    token,
                    index,
                    loaded: (200..300).contains(&status),
                }),
                None => {
                    tracing::debug!("ignoring web result without a known context");
                    None
                }
            }
        }

        /// Executes an action with host API calls.
        ///
        /// Returns an event to feed back into the handler, if the action
        /// completes synchronously.
        #[tracing::instrument(level = "debug")]
        fn execute_action(action: &Action) -> Option<Event> {
            match action {
                Action::CloseFocus => {
                    hide_self();
                }
                Action::ScheduleTick => {
                    set_timeout(SPINNER_INTERVAL_SECS);
                }
                Action::FetchSearch { url, .. } | Action::ProbeCover { url, .. } => {
                    let context = action.request_context().map(|c| c.to_context_map()).unwrap_or_default();
                    tracing::debug!(url = %url, "issuing web request");
                    web_request(url, HttpVerb::Get, BTreeMap::new(), vec![], context);
                }
            }
            None
        }
    }
}

#[cfg(target_family = "wasm")]
use plugin::State;
#[cfg(target_family = "wasm")]
use zellij_tile::prelude::*;

#[cfg(target_family = "wasm")]
register_plugin!(State);

#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!("zbookfinder is a Zellij plugin; build it for wasm32-wasip1 and load it from Zellij.");
}
