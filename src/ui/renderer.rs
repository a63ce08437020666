//! Top-level rendering coordinator.
//!
//! Rendering is two steps: compute a [`UIViewModel`] from `AppState`, then draw
//! it with the components into one frame string. The frame is written to
//! stdout in a single `print!`.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    print!("{}", render_frame(state, rows, cols));
}

/// Renders the plugin UI into a string of ANSI-styled output.
///
/// # Example
///
/// ```
/// use zbookfinder::app::{AppState, SearchController};
/// use zbookfinder::domain::QueryBuilder;
/// use zbookfinder::ui::{render_frame, Theme};
///
/// let state = AppState::new(SearchController::new(QueryBuilder::default()), Theme::default());
/// let frame = render_frame(&state, 24, 80);
/// assert!(frame.contains("Book Finder"));
/// ```
#[must_use]
pub fn render_frame(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);
    render_viewmodel(&viewmodel, &state.theme, rows, cols)
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) -> String {
    let mut out = String::new();
    components::render_layout(&mut out, vm, theme, cols, rows);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{HttpResponse, SearchController};
    use crate::domain::QueryBuilder;
    use crate::ui::helpers::strip_ansi;
    use crate::ui::viewmodel::NO_RESULTS_MESSAGE;

    fn state() -> AppState {
        AppState::new(SearchController::new(QueryBuilder::default()), Theme::default())
    }

    #[test]
    fn idle_frame_has_chrome_only() {
        let plain = strip_ansi(&render_frame(&state(), 24, 80));
        assert!(plain.contains("Book Finder"));
        assert!(plain.contains("(\u{2022}) Title"));
        assert!(plain.contains("Enter: search"));
        assert!(!plain.contains('\u{256d}'));
    }

    #[test]
    fn failure_frame_shows_fixed_message() {
        let mut s = state();
        let request = s.submit_search();
        s.apply_search_result(request.token, Ok(HttpResponse::new(503, "upstream down")));

        let plain = strip_ansi(&render_frame(&s, 24, 100));
        assert!(plain.contains(crate::domain::error::FETCH_FAILED_MESSAGE));
        assert!(!plain.contains("upstream down"));
        assert!(!plain.contains("503"));
    }

    #[test]
    fn empty_frame_shows_notice() {
        let mut s = state();
        let request = s.submit_search();
        s.apply_search_result(request.token, Ok(HttpResponse::new(200, r#"{"docs":[]}"#)));

        let plain = strip_ansi(&render_frame(&s, 24, 80));
        assert!(plain.contains(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn success_frame_shows_cards() {
        let mut s = state();
        let request = s.submit_search();
        s.apply_search_result(
            request.token,
            Ok(HttpResponse::new(
                200,
                r#"{"docs":[{"key":"/works/OL1W","title":"Dune","author_name":["Frank Herbert"],"first_publish_year":1965,"cover_i":11481354}]}"#,
            )),
        );

        let plain = strip_ansi(&render_frame(&s, 24, 80));
        assert!(plain.contains("1 result"));
        assert!(plain.contains("Dune"));
        assert!(plain.contains("Author: Frank Herbert"));
        assert!(plain.contains("First Published: 1965"));
        assert!(plain.contains("Cover: #11481354"));
    }

    #[test]
    fn three_titled_docs_render_three_cards() {
        let mut s = state();
        let request = s.submit_search();
        s.apply_search_result(
            request.token,
            Ok(HttpResponse::new(
                200,
                r#"{"docs":[{"title":"Dune"},{"title":"Dune Messiah"},{"title":"Children of Dune"}]}"#,
            )),
        );

        let plain = strip_ansi(&render_frame(&s, 30, 130));
        let cards = plain.matches('\u{256d}').count() + plain.matches('\u{250f}').count();
        assert_eq!(cards, 3);
        assert!(plain.contains("3 results"));
    }

    #[test]
    fn network_failure_renders_no_cards() {
        let mut s = state();
        let request = s.submit_search();
        s.apply_search_result(
            request.token,
            Err(crate::domain::BookFinderError::Network("connection refused".to_string())),
        );

        let plain = strip_ansi(&render_frame(&s, 24, 80));
        assert!(plain.contains(crate::domain::error::FETCH_FAILED_MESSAGE));
        assert!(!plain.contains("connection refused"));
        assert!(!plain.contains('\u{256d}'));
    }
}
