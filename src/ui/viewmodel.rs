//! View model types representing renderable UI state.
//!
//! [`derive_view`] is the pure mapping from the search outcome to what the
//! results area must show. [`UIViewModel`] is the complete, display-ready
//! snapshot computed by `AppState::compute_viewmodel()` and consumed by the
//! renderer; it contains no business logic.

use crate::app::SearchOutcome;
use crate::domain::{BookRecord, SearchMode};

/// Informational message shown when a search produced no usable records.
pub const NO_RESULTS_MESSAGE: &str = "No books found for your query. Please try again.";

/// What the results area shows for a given outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState<'a> {
    /// Request in flight.
    ShowLoader,
    /// Failure banner with a fixed user-facing message.
    ShowError(&'static str),
    /// Informational banner, not styled as an error.
    ShowNotice(&'static str),
    /// Card grid of the given records.
    ShowGrid(&'a [BookRecord]),
    /// Nothing searched yet.
    ShowNothing,
}

/// Derives the results view from the search outcome.
///
/// One case per outcome variant; never inspects raw error text.
///
/// # Example
///
/// ```
/// use zbookfinder::app::SearchOutcome;
/// use zbookfinder::ui::{derive_view, ViewState};
///
/// assert_eq!(derive_view(&SearchOutcome::Loading), ViewState::ShowLoader);
/// assert_eq!(derive_view(&SearchOutcome::Idle), ViewState::ShowNothing);
/// ```
#[must_use]
pub fn derive_view(outcome: &SearchOutcome) -> ViewState<'_> {
    match outcome {
        SearchOutcome::Idle => ViewState::ShowNothing,
        SearchOutcome::Loading => ViewState::ShowLoader,
        SearchOutcome::Success(records) => ViewState::ShowGrid(records),
        SearchOutcome::Empty => ViewState::ShowNotice(NO_RESULTS_MESSAGE),
        SearchOutcome::Failure(kind) => ViewState::ShowError(kind.user_message()),
    }
}

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    pub results: ResultsPanel,
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text for the active input mode.
    pub keybindings: String,
}

/// Search field and mode selector state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current query text as typed.
    pub query: String,

    /// Example query shown while `query` is empty.
    pub placeholder: &'static str,

    /// Selected search field.
    pub mode: SearchMode,

    /// Whether keystrokes currently go to the search field.
    pub is_focused: bool,
}

/// Contents of the results area. Exactly one is shown at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsPanel {
    Nothing,
    Loader(LoaderInfo),
    Banner(BannerInfo),
    Grid(GridInfo),
}

/// Spinner display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderInfo {
    pub message: String,
    /// Animation frame counter; the renderer picks the glyph.
    pub frame: usize,
}

/// Styling class of a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerSeverity {
    Error,
    Notice,
}

/// Centered message shown instead of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerInfo {
    pub message: String,
    pub severity: BannerSeverity,
}

/// Visible window of the result card grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridInfo {
    /// Cards in the visible window, row-major.
    pub cards: Vec<CardItem>,

    /// Number of cards per grid row.
    pub columns: usize,

    /// Outer width of each card in columns, borders included.
    pub card_width: usize,

    /// Total number of results, visible or not.
    pub total: usize,

    /// Zero-based result index of the first visible card.
    pub first_index: usize,
}

/// Display information for one book card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    /// Title, truncated to the card width.
    pub title: String,

    /// Character ranges of `title` matching the submitted query.
    ///
    /// Each tuple is `(start, end)` in character indices, end exclusive.
    pub title_highlights: Vec<(usize, usize)>,

    /// "Author: ..." line content.
    pub authors: String,

    /// "First Published: ..." line content.
    pub published: String,

    /// Cover status line content.
    pub cover_label: String,

    /// Whether this card has the browsing cursor.
    pub is_selected: bool,
}
