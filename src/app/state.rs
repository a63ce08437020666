//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the container for all transient UI state:
//! the query being typed, the selected search field, the search controller that
//! owns the outcome, per-card cover state and the browsing cursor.
//!
//! # View Model Computation
//!
//! [`AppState::compute_viewmodel`] transforms state into a renderable snapshot.
//! It routes the outcome through [`derive_view`], lays the results out as a
//! responsive card grid, windows the grid around the selected card, and
//! highlights query matches in titles.

use super::actions::Action;
use super::controller::{HttpResponse, SearchController, SearchRequest};
use super::modes::InputMode;
use crate::domain::{BookRecord, CoverImage, CoverStatus, Result, SearchMode, SearchQuery};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    derive_view, BannerInfo, BannerSeverity, CardItem, FooterInfo, GridInfo, HeaderInfo,
    LoaderInfo, ResultsPanel, SearchBarInfo, UIViewModel, ViewState,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Title shown in the header bar.
const APP_TITLE: &str = " Book Finder ";

/// Narrowest card, borders included.
const MIN_CARD_WIDTH: usize = 28;

/// Horizontal space between adjacent cards.
pub const CARD_GAP: usize = 2;

/// Card height in rows: top border, title, author, year, cover, bottom border.
pub const CARD_HEIGHT: usize = 6;

/// Widest grid, in cards per row.
const MAX_COLUMNS: usize = 4;

/// Rows taken by chrome above and below the results area.
///
/// Blank line, header, border, mode selector, 3-line search box, spacer,
/// footer border and footer.
pub const CHROME_ROWS: usize = 10;

/// Left and right margin of the results area.
pub const GRID_MARGIN: usize = 1;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Query text as currently typed.
    pub query_input: String,

    /// Field the next search targets.
    pub search_mode: SearchMode,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Owner of the search outcome.
    pub controller: SearchController,

    /// Query of the most recent submitted search.
    ///
    /// Used for title match highlighting; independent of later edits to the
    /// input.
    pub last_query: Option<SearchQuery>,

    /// Image state per result card, parallel to the outcome's records.
    pub covers: Vec<CoverImage>,

    /// Zero-based index of the browsing cursor within the results.
    pub selected_index: usize,

    /// Cards per grid row at the last known terminal width.
    pub grid_columns: usize,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Whether cover images are probed after each successful search.
    pub probe_covers: bool,

    /// Set when the user denied the web access permission.
    pub web_access_denied: bool,

    /// Loader animation frame counter.
    pub spinner_frame: usize,

    /// Whether a loader timer is pending with the host.
    pub tick_scheduled: bool,
}

impl AppState {
    /// Creates an idle state with an empty query in Title mode.
    #[must_use]
    pub fn new(controller: SearchController, theme: Theme) -> Self {
        Self {
            query_input: String::new(),
            search_mode: SearchMode::Title,
            input_mode: InputMode::Editing,
            controller,
            last_query: None,
            covers: vec![],
            selected_index: 0,
            grid_columns: 1,
            theme,
            probe_covers: true,
            web_access_denied: false,
            spinner_frame: 0,
            tick_scheduled: false,
        }
    }

    /// Records of the current outcome; empty unless the last search succeeded.
    #[must_use]
    pub fn results(&self) -> &[BookRecord] {
        self.controller.outcome().records()
    }

    /// Query that the next submission would issue.
    #[must_use]
    pub fn current_query(&self) -> SearchQuery {
        SearchQuery::new(self.query_input.clone(), self.search_mode)
    }

    /// Starts a search for the current input.
    ///
    /// Drops previous results, cover state and the browsing cursor.
    pub fn submit_search(&mut self) -> SearchRequest {
        let query = self.current_query();
        let request = self.controller.trigger_search(&query);

        self.last_query = Some(query);
        self.covers.clear();
        self.selected_index = 0;
        self.input_mode = InputMode::Editing;

        request
    }

    /// Applies a search completion.
    ///
    /// Returns `false` if the completion was stale and nothing changed.
    pub fn apply_search_result(
        &mut self,
        token: super::RequestToken,
        response: Result<HttpResponse>,
    ) -> bool {
        if !self.controller.settle(token, response) {
            return false;
        }

        self.covers = self.results().iter().map(CoverImage::for_record).collect();
        self.selected_index = 0;
        if self.covers.is_empty() {
            self.input_mode = InputMode::Editing;
        }
        true
    }

    /// Probe actions for every card of the current results.
    #[must_use]
    pub fn cover_probe_actions(&self) -> Vec<Action> {
        if !self.probe_covers {
            return vec![];
        }

        let token = self.controller.latest_token();
        self.covers
            .iter()
            .enumerate()
            .map(|(index, cover)| Action::ProbeCover {
                token,
                index,
                url: cover.src().to_string(),
            })
            .collect()
    }

    /// Applies a cover probe completion.
    ///
    /// Returns `(changed, follow_up)`. The follow-up probes the substituted
    /// placeholder after the first failure of a card; later failures of the
    /// same card produce none.
    pub fn apply_cover_result(
        &mut self,
        token: super::RequestToken,
        index: usize,
        loaded: bool,
    ) -> (bool, Option<Action>) {
        if !self.controller.is_current(token) {
            tracing::debug!(token = %token, index, "discarding cover result of superseded search");
            return (false, None);
        }
        let Some(cover) = self.covers.get_mut(index) else {
            tracing::debug!(index, "cover result for unknown card");
            return (false, None);
        };

        if loaded {
            cover.mark_loaded();
            return (true, None);
        }

        let follow_up = cover.handle_load_error().map(|src| Action::ProbeCover {
            token,
            index,
            url: src.to_string(),
        });
        (true, follow_up.filter(|_| self.probe_covers))
    }

    /// Number of cards per row that fit in `cols` terminal columns.
    #[must_use]
    pub fn columns_for_width(cols: usize) -> usize {
        let usable = cols.saturating_sub(GRID_MARGIN * 2) + CARD_GAP;
        (usable / (MIN_CARD_WIDTH + CARD_GAP)).clamp(1, MAX_COLUMNS)
    }

    /// Updates layout-dependent state for a new terminal size.
    pub fn set_viewport(&mut self, _rows: usize, cols: usize) {
        self.grid_columns = Self::columns_for_width(cols);
    }

    /// Moves the browsing cursor by `delta` cards, clamped to the results.
    ///
    /// Returns `false` if the cursor could not move.
    pub fn move_selection_by(&mut self, delta: isize) -> bool {
        let count = self.covers.len();
        if count == 0 {
            return false;
        }

        let target = self
            .selected_index
            .checked_add_signed(delta)
            .filter(|&idx| idx < count);

        match target {
            Some(idx) => {
                self.selected_index = idx;
                true
            }
            None => false,
        }
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Derive the results view from the outcome
    /// 2. Fit as many card rows as the results area allows
    /// 3. Center the window on the selected card's row
    /// 4. Shift the window back if it runs past the last row
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let results = match derive_view(self.controller.outcome()) {
            ViewState::ShowNothing => ResultsPanel::Nothing,
            ViewState::ShowLoader => ResultsPanel::Loader(LoaderInfo {
                message: "Searching Open Library...".to_string(),
                frame: self.spinner_frame,
            }),
            ViewState::ShowError(message) => ResultsPanel::Banner(BannerInfo {
                message: message.to_string(),
                severity: BannerSeverity::Error,
            }),
            ViewState::ShowNotice(message) => ResultsPanel::Banner(BannerInfo {
                message: message.to_string(),
                severity: BannerSeverity::Notice,
            }),
            ViewState::ShowGrid(records) => ResultsPanel::Grid(self.compute_grid(records, rows, cols)),
        };

        UIViewModel {
            header: HeaderInfo {
                title: APP_TITLE.to_string(),
            },
            search_bar: self.compute_search_bar(),
            results,
            footer: self.compute_footer(),
        }
    }

    fn compute_grid(&self, records: &[BookRecord], rows: usize, cols: usize) -> GridInfo {
        let columns = Self::columns_for_width(cols);
        let usable_width = cols.saturating_sub(GRID_MARGIN * 2);
        let card_width = (usable_width.saturating_sub(CARD_GAP * (columns - 1)) / columns)
            .max(MIN_CARD_WIDTH.min(usable_width));

        let total_rows = (records.len() + columns - 1) / columns;
        let visible_rows = (rows.saturating_sub(CHROME_ROWS) / CARD_HEIGHT).max(1);
        let selected_row = self.selected_index / columns;

        let mut start_row = selected_row.saturating_sub(visible_rows / 2);
        if start_row + visible_rows > total_rows {
            start_row = total_rows.saturating_sub(visible_rows);
        }

        let first_index = start_row * columns;
        let last_index = ((start_row + visible_rows) * columns).min(records.len());

        let matcher = self
            .last_query
            .as_ref()
            .filter(|q| q.mode == SearchMode::Title && !q.term.trim().is_empty())
            .map(|q| (SkimMatcherV2::default(), q.term.trim()));

        let cards = records[first_index..last_index]
            .iter()
            .enumerate()
            .map(|(offset, record)| {
                let index = first_index + offset;
                self.compute_card(record, index, card_width, matcher.as_ref())
            })
            .collect();

        GridInfo {
            cards,
            columns,
            card_width,
            total: records.len(),
            first_index,
        }
    }

    fn compute_card(
        &self,
        record: &BookRecord,
        index: usize,
        card_width: usize,
        matcher: Option<&(SkimMatcherV2, &str)>,
    ) -> CardItem {
        let inner_width = card_width.saturating_sub(4);
        let title = truncate_chars(&record.title, inner_width);
        let title_len = title.chars().count();

        let title_highlights = matcher.map_or_else(Vec::new, |(m, term)| {
            compute_highlight_ranges(m, &record.title, term)
                .into_iter()
                .filter(|&(start, _)| start < title_len)
                .map(|(start, end)| (start, end.min(title_len)))
                .collect()
        });

        CardItem {
            title,
            title_highlights,
            authors: truncate_chars(&format!("Author: {}", record.authors_display()), inner_width),
            published: truncate_chars(&format!("First Published: {}", record.year_display()), inner_width),
            cover_label: truncate_chars(&self.cover_label(record, index), inner_width),
            is_selected: self.input_mode == InputMode::Browsing && index == self.selected_index,
        }
    }

    fn cover_label(&self, record: &BookRecord, index: usize) -> String {
        let Some(cover) = self.covers.get(index) else {
            return "Cover: -".to_string();
        };

        match (cover.is_placeholder(), cover.status(), record.cover_id) {
            (true, CoverStatus::Failed, _) => "Cover: unavailable".to_string(),
            (true, _, _) | (false, _, None) => "Cover: No Cover".to_string(),
            (false, CoverStatus::Loaded, Some(id)) => format!("Cover: #{id} \u{2713}"),
            (false, _, Some(id)) => format!("Cover: #{id}"),
        }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        SearchBarInfo {
            query: self.query_input.clone(),
            placeholder: self.search_mode.placeholder(),
            mode: self.search_mode,
            is_focused: self.input_mode == InputMode::Editing,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Editing => {
                "Enter: search  Tab: title/author  Down: results  Esc: clear/close".to_string()
            }
            InputMode::Browsing => {
                "hjkl/arrows: move  /: edit query  Tab: title/author  Enter: search  q: quit".to_string()
            }
        };
        FooterInfo { keybindings }
    }
}

/// Coalesces fuzzy match positions of `term` in `text` into `(start, end)` ranges.
fn compute_highlight_ranges(matcher: &SkimMatcherV2, text: &str, term: &str) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, term) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

/// Truncates `text` to at most `max` characters, ending in "..." when cut.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(&"...".chars().take(max - keep).collect::<String>());
    out
}
