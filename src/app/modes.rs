//! Input mode state for the application.
//!
//! The plugin either edits the query or browses the result grid. The mode
//! decides how keys are interpreted and which footer hints are shown. The
//! search field selector (Title/Author) is independent of the input mode and
//! lives in [`SearchMode`](crate::domain::SearchMode).

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Typing into the search field.
    ///
    /// Characters edit the query, Enter submits, Tab toggles Title/Author,
    /// Down moves focus to the results.
    #[default]
    Editing,

    /// Navigating the result cards.
    ///
    /// Arrow keys or hjkl move the selection, `/` or `i` return to the search
    /// field, `q` closes the plugin.
    Browsing,
}
