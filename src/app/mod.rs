//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (main.rs) and the domain layer.
//! It owns the search state machine and turns key intents and web replies into
//! state changes and side-effect commands.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Web Requests
//!                           ↑                                           ↓
//!                           └──────────── Web Request Results ──────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`controller`]: Search state machine and supersession by request token
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode type
//! - [`outcome`]: Search outcome and request token types
//! - [`request`]: Context attached to web requests and read back from replies
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod controller;
pub mod handler;
pub mod modes;
pub mod outcome;
pub mod request;
pub mod state;

pub use actions::Action;
pub use controller::{HttpResponse, SearchController, SearchRequest};
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use outcome::{RequestToken, SearchOutcome};
pub use request::{RequestContext, TraceContext};
pub use state::AppState;
