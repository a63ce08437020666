//! Search outcome state and request generation tokens.
//!
//! [`SearchOutcome`] is the single value the view renders from. It is replaced
//! as a whole on every transition, never patched field by field.

use crate::domain::{BookRecord, ErrorKind};
use std::fmt;

/// Result state of the most recent search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchOutcome {
    /// No search issued yet.
    #[default]
    Idle,
    /// A search is in flight.
    Loading,
    /// The search returned at least one usable record.
    Success(Vec<BookRecord>),
    /// The search returned no usable records.
    Empty,
    /// The search failed.
    Failure(ErrorKind),
}

impl SearchOutcome {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether a request has completed (Success, Empty or Failure).
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Empty | Self::Failure(_))
    }

    /// Records of a successful search, empty otherwise.
    #[must_use]
    pub fn records(&self) -> &[BookRecord] {
        match self {
            Self::Success(records) => records,
            _ => &[],
        }
    }

    /// Variant name for logging.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success(_) => "success",
            Self::Empty => "empty",
            Self::Failure(_) => "failure",
        }
    }
}

/// Generation number identifying one issued search.
///
/// Tokens increase strictly with each trigger; only the latest one may update
/// the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestToken(pub u64);

impl RequestToken {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
