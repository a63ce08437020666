//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never performs I/O itself. It returns a `Vec<Action>` and
//! the plugin runtime executes each one in order, translating it to Zellij API
//! calls. Web requests carry a [`RequestContext`] that comes back with the
//! reply.
//!
//! # Example
//!
//! ```
//! use zbookfinder::app::{Action, RequestToken};
//!
//! let action = Action::FetchSearch {
//!     token: RequestToken(1),
//!     url: "https://openlibrary.org/search.json?title=Dune&limit=21".to_string(),
//! };
//! assert!(action.request_context().is_some());
//! ```

use super::outcome::RequestToken;
use super::request::RequestContext;

/// Delay between loader animation frames.
pub const SPINNER_INTERVAL_SECS: f64 = 0.1;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues the search GET request.
    ///
    /// Completion is reported back as `Event::SearchSettled` with the same token.
    FetchSearch {
        /// Generation of the search this request belongs to.
        token: RequestToken,
        /// Fully built search URL.
        url: String,
    },

    /// Schedules an `Event::Tick` after [`SPINNER_INTERVAL_SECS`].
    ScheduleTick,

    /// Issues a GET for a card's cover image to find out whether it loads.
    ///
    /// Completion is reported back as `Event::CoverSettled`.
    ProbeCover {
        /// Generation of the search whose results own the card.
        token: RequestToken,
        /// Card position within the results.
        index: usize,
        /// Image source to load.
        url: String,
    },
}

impl Action {
    /// Context to attach to the web request, if this action issues one.
    #[must_use]
    pub const fn request_context(&self) -> Option<RequestContext> {
        match self {
            Self::CloseFocus | Self::ScheduleTick => None,
            Self::FetchSearch { token, .. } => Some(RequestContext::Search { token: *token }),
            Self::ProbeCover { token, index, .. } => Some(RequestContext::Cover {
                token: *token,
                index: *index,
            }),
        }
    }
}
