//! Result card grid renderer.
//!
//! Cards are laid out row-major, `columns` per row, each a framed box:
//!
//! ```text
//! ╭────────────────────────────╮
//! │ Dune                       │
//! │ Author: Frank Herbert      │
//! │ First Published: 1965      │
//! │ Cover: #11481354           │
//! ╰────────────────────────────╯
//! ```
//!
//! The selected card gets a heavy frame and a highlighted title line.

use crate::app::state::{CARD_GAP, CARD_HEIGHT, GRID_MARGIN};
use crate::ui::helpers::{position_cursor, render_highlighted_text, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardItem, GridInfo};

/// Renders the one-line result summary at `row`.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_grid_status(out: &mut String, row: usize, grid: &GridInfo, theme: &Theme) -> usize {
    let last = grid.first_index + grid.cards.len();
    let noun = if grid.total == 1 { "result" } else { "results" };
    let summary = if grid.first_index == 0 && last == grid.total {
        format!("{} {noun}", grid.total)
    } else {
        format!("{}-{} of {} {noun}", grid.first_index + 1, last, grid.total)
    };

    position_cursor(out, row, GRID_MARGIN + 1);
    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&summary);
    out.push_str(Theme::reset());
    row + 1
}

/// Renders the visible cards with their top edge at `row`.
///
/// # Returns
///
/// The row below the last card row.
pub fn render_grid(out: &mut String, row: usize, grid: &GridInfo, theme: &Theme) -> usize {
    let columns = grid.columns.max(1);
    let mut next_row = row;

    for (i, card) in grid.cards.iter().enumerate() {
        let top = row + (i / columns) * CARD_HEIGHT;
        let left = GRID_MARGIN + 1 + (i % columns) * (grid.card_width + CARD_GAP);
        render_card(out, top, left, grid.card_width, card, theme);
        next_row = top + CARD_HEIGHT;
    }

    next_row
}

fn render_card(out: &mut String, top: usize, left: usize, width: usize, card: &CardItem, theme: &Theme) {
    let inner = width.saturating_sub(2);
    let (frame_color, [tl, tr, bl, br, h, v]) = if card.is_selected {
        (&theme.colors.selection_bg, ['┏', '┓', '┗', '┛', '━', '┃'])
    } else {
        (&theme.colors.card_border, ['╭', '╮', '╰', '╯', '─', '│'])
    };
    let frame = Theme::fg(frame_color);

    position_cursor(out, top, left);
    out.push_str(&frame);
    out.push(tl);
    out.extend(std::iter::repeat(h).take(inner));
    out.push(tr);
    out.push_str(Theme::reset());

    // title line
    position_cursor(out, top + 1, left);
    out.push_str(&frame);
    out.push(v);
    out.push_str(Theme::reset());
    let restore = if card.is_selected {
        format!(
            "{}{}{}",
            Theme::bold(),
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.text_normal))
    };
    out.push_str(&restore);
    out.push(' ');
    render_highlighted_text(out, &card.title, &card.title_highlights, theme, &restore);
    out.push_str(&" ".repeat(inner.saturating_sub(text_width(&card.title) + 1)));
    out.push_str(Theme::reset());
    out.push_str(&frame);
    out.push(v);
    out.push_str(Theme::reset());

    let details = [&card.authors, &card.published, &card.cover_label];
    for (offset, line) in details.into_iter().enumerate() {
        position_cursor(out, top + 2 + offset, left);
        out.push_str(&frame);
        out.push(v);
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push(' ');
        out.push_str(line);
        out.push_str(&" ".repeat(inner.saturating_sub(text_width(line) + 1)));
        out.push_str(&frame);
        out.push(v);
        out.push_str(Theme::reset());
    }

    position_cursor(out, top + CARD_HEIGHT - 1, left);
    out.push_str(&frame);
    out.push(bl);
    out.extend(std::iter::repeat(h).take(inner));
    out.push(br);
    out.push_str(Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;

    fn card(title: &str, is_selected: bool) -> CardItem {
        CardItem {
            title: title.to_string(),
            title_highlights: vec![],
            authors: "Author: Frank Herbert".to_string(),
            published: "First Published: 1965".to_string(),
            cover_label: "Cover: #1".to_string(),
            is_selected,
        }
    }

    fn grid(cards: Vec<CardItem>, first_index: usize, total: usize) -> GridInfo {
        GridInfo {
            cards,
            columns: 2,
            card_width: 30,
            total,
            first_index,
        }
    }

    #[test]
    fn cards_fill_rows_left_to_right() {
        let g = grid(vec![card("A", false), card("B", false), card("C", true)], 0, 3);
        let mut out = String::new();

        let next = render_grid(&mut out, 10, &g, &Theme::default());

        assert_eq!(next, 10 + 2 * CARD_HEIGHT);
        assert!(out.contains("\u{1b}[10;2H"));
        assert!(out.contains("\u{1b}[10;34H"));
        assert!(out.contains("\u{1b}[16;2H"));

        let plain = strip_ansi(&out);
        assert!(plain.contains("First Published: 1965"));
        assert_eq!(plain.matches('┏').count(), 1);
        assert_eq!(plain.matches('╭').count(), 2);
    }

    #[test]
    fn card_lines_have_card_width() {
        let g = grid(vec![card("Dune", false)], 0, 1);
        let mut out = String::new();
        render_grid(&mut out, 1, &g, &Theme::default());

        let plain = strip_ansi(&out);
        let title_line: String = plain
            .chars()
            .skip_while(|&c| c != '│')
            .take(30)
            .collect();
        assert_eq!(title_line, format!("│ Dune{}│", " ".repeat(23)));
    }

    #[test]
    fn status_shows_window() {
        let theme = Theme::default();

        let mut out = String::new();
        render_grid_status(&mut out, 9, &grid(vec![card("A", false)], 0, 1), &theme);
        assert!(strip_ansi(&out).ends_with("1 result"));

        let mut out = String::new();
        render_grid_status(&mut out, 9, &grid(vec![card("A", false); 4], 16, 21), &theme);
        assert!(strip_ansi(&out).ends_with("17-20 of 21 results"));
    }
}
