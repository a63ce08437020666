//! Search bar component renderer.
//!
//! Draws the Title/Author selector line followed by a bordered input box. The
//! box shows the query with a block cursor while focused, or the mode's example
//! query dimmed while the query is empty.

use crate::domain::SearchMode;
use crate::ui::helpers::{position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

const CURSOR: char = '\u{2588}';

/// Renders the mode selector and the search input box starting at `row`.
///
/// # Returns
///
/// The next available row position (row + 4)
///
/// # Layout
///
/// ```text
///   Search by: (•) Title  ( ) Author
///   ┌───────────────────────────────┐
///   │ Title: Dune█                  │
///   └───────────────────────────────┘
/// ```
pub fn render_search_bar(out: &mut String, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let row = render_mode_selector(out, row, search.mode, theme);

    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(SEARCH_BOX_MARGIN);
    let border = Theme::fg(&theme.colors.search_bar_border);

    position_cursor(out, row, 1);
    out.push_str(&margin);
    out.push_str(&border);
    out.push('┌');
    out.push_str(&"─".repeat(inner_width));
    out.push('┐');
    out.push_str(Theme::reset());

    let label = format!(" {}: ", search.mode.label());
    let available = inner_width.saturating_sub(text_width(&label) + 1);

    position_cursor(out, row + 1, 1);
    out.push_str(&margin);
    out.push_str(&border);
    out.push('│');
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(&label);

    let mut used = text_width(&label);
    if search.query.is_empty() && !search.is_focused {
        let hint: String = search.placeholder.chars().take(available).collect();
        used += text_width(&hint);
        out.push_str(Theme::dim());
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(&hint);
        out.push_str(Theme::reset());
    } else {
        // keep the tail of long queries visible while typing
        let len = text_width(&search.query);
        let visible: String = search.query.chars().skip(len.saturating_sub(available)).collect();
        used += text_width(&visible);
        out.push_str(&visible);
    }

    if search.is_focused && used < inner_width {
        out.push_str(&Theme::fg(&theme.colors.search_bar_border));
        out.push(CURSOR);
        used += 1;
        if search.query.is_empty() {
            let hint: String = search.placeholder.chars().take(inner_width - used).collect();
            used += text_width(&hint);
            out.push_str(&Theme::fg(&theme.colors.text_dim));
            out.push_str(&hint);
        }
    }

    out.push_str(&" ".repeat(inner_width.saturating_sub(used)));
    out.push_str(&border);
    out.push('│');
    out.push_str(Theme::reset());

    position_cursor(out, row + 2, 1);
    out.push_str(&margin);
    out.push_str(&border);
    out.push('└');
    out.push_str(&"─".repeat(inner_width));
    out.push('┘');
    out.push_str(Theme::reset());

    row + 3
}

fn render_mode_selector(out: &mut String, row: usize, mode: SearchMode, theme: &Theme) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str("Search by: ");

    for (i, option) in [SearchMode::Title, SearchMode::Author].into_iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        if option == mode {
            out.push_str(Theme::bold());
            out.push_str(&Theme::fg(&theme.colors.mode_active_fg));
            out.push_str("(\u{2022}) ");
            out.push_str(option.label());
            out.push_str(Theme::reset());
            out.push_str(&Theme::fg(&theme.colors.text_dim));
        } else {
            out.push_str("( ) ");
            out.push_str(option.label());
        }
    }

    out.push_str(Theme::reset());
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;

    fn bar(query: &str, mode: SearchMode, is_focused: bool) -> String {
        let info = SearchBarInfo {
            query: query.to_string(),
            placeholder: mode.placeholder(),
            mode,
            is_focused,
        };
        let mut out = String::new();
        let next = render_search_bar(&mut out, 4, &info, &Theme::default(), 40);
        assert_eq!(next, 8);
        strip_ansi(&out)
    }

    #[test]
    fn selector_marks_active_mode() {
        let plain = bar("", SearchMode::Author, false);
        assert!(plain.contains("( ) Title  (\u{2022}) Author"));
        assert!(plain.contains("Author: e.g., \"Frank Herbert\""));
    }

    #[test]
    fn focused_query_shows_cursor() {
        let plain = bar("Dune", SearchMode::Title, true);
        assert!(plain.contains("Title: Dune\u{2588}"));
    }

    #[test]
    fn long_query_keeps_tail_and_box_width() {
        let query = "a".repeat(60) + "END";
        let plain = bar(&query, SearchMode::Title, false);
        assert!(plain.contains("aEND"));

        let line = plain.split('│').nth(1).unwrap();
        assert_eq!(text_width(line), 34);
    }
}
