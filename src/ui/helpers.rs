//! Shared rendering utilities.
//!
//! Components draw into a frame buffer (`&mut String`) rather than straight to
//! stdout, so a whole frame can be emitted at once and inspected in tests.
//! Widths and highlight ranges are measured in characters, not bytes.

use crate::ui::theme::Theme;
use std::fmt::Write;

/// Appends a cursor move to `row`, `col` (both 1-indexed).
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    let _ = write!(out, "\u{1b}[{row};{col}H");
}

/// Display width of `text` in terminal cells, approximated by character count.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Appends `text` centered in a line of `cols` cells, padded on both sides.
///
/// Text wider than the line is cut to fit.
pub fn push_centered(out: &mut String, text: &str, cols: usize) {
    let visible: String = text.chars().take(cols).collect();
    let width = text_width(&visible);
    let padding = cols.saturating_sub(width) / 2;

    out.push_str(&" ".repeat(padding));
    out.push_str(&visible);
    out.push_str(&" ".repeat(cols.saturating_sub(padding + width)));
}

/// Appends `text` with the given character ranges highlighted.
///
/// Ranges are `(start, end)` character indices, end exclusive, sorted and
/// non-overlapping. After each highlighted run the `restore` sequence is
/// re-applied so surrounding styling continues.
///
/// # Example
///
/// ```
/// use zbookfinder::ui::helpers::render_highlighted_text;
/// use zbookfinder::ui::Theme;
///
/// let mut out = String::new();
/// render_highlighted_text(&mut out, "Dune", &[(0, 2)], &Theme::default(), "");
/// assert!(out.ends_with("ne"));
/// ```
pub fn render_highlighted_text(
    out: &mut String,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    restore: &str,
) {
    if ranges.is_empty() {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(current_pos, chars.len());
        let end = end.clamp(start, chars.len());

        out.extend(&chars[current_pos..start]);

        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(restore);

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
}

/// Strips ANSI escape sequences, leaving only printable text.
#[cfg(test)]
pub fn strip_ansi(text: &str) -> String {
    let mut plain = String::new();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            plain.push(c);
        }
    }
    plain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_text_fills_line() {
        let mut out = String::new();
        push_centered(&mut out, "abc", 9);
        assert_eq!(out, "   abc   ");

        let mut out = String::new();
        push_centered(&mut out, "toolong", 4);
        assert_eq!(out, "tool");
    }

    #[test]
    fn highlighting_preserves_text() {
        let theme = Theme::default();
        let mut out = String::new();
        render_highlighted_text(&mut out, "Dune Messiah", &[(0, 4), (5, 6)], &theme, "");

        assert_eq!(strip_ansi(&out), "Dune Messiah");
        assert!(out.contains(&Theme::bg(&theme.colors.match_highlight_bg)));
    }

    #[test]
    fn highlighting_tolerates_out_of_range() {
        let mut out = String::new();
        render_highlighted_text(&mut out, "Dune", &[(2, 10), (12, 14)], &Theme::default(), "");
        assert_eq!(strip_ansi(&out), "Dune");
    }

    #[test]
    fn cursor_positioning() {
        let mut out = String::new();
        position_cursor(&mut out, 5, 1);
        assert_eq!(out, "\u{1b}[5;1H");
    }
}
