//! Message banner renderer.
//!
//! Shows the failure message or the no-results notice in place of the grid.
//! Errors and notices share the layout; only the color and the icon differ.

use crate::ui::helpers::{position_cursor, push_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BannerInfo, BannerSeverity};

/// Renders the banner centered on `row`.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_banner(out: &mut String, row: usize, banner: &BannerInfo, theme: &Theme, cols: usize) -> usize {
    let (color, icon) = match banner.severity {
        BannerSeverity::Error => (&theme.colors.error_fg, '✗'),
        BannerSeverity::Notice => (&theme.colors.notice_fg, 'ℹ'),
    };

    position_cursor(out, row, 1);
    if banner.severity == BannerSeverity::Error {
        out.push_str(Theme::bold());
    }
    out.push_str(&Theme::fg(color));
    push_centered(out, &format!("{icon} {}", banner.message), cols);
    out.push_str(Theme::reset());
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;

    #[test]
    fn severity_selects_color() {
        let theme = Theme::default();
        let mut error = String::new();
        render_banner(
            &mut error,
            1,
            &BannerInfo {
                message: "Failed".to_string(),
                severity: BannerSeverity::Error,
            },
            &theme,
            30,
        );
        let mut notice = String::new();
        render_banner(
            &mut notice,
            1,
            &BannerInfo {
                message: "No books".to_string(),
                severity: BannerSeverity::Notice,
            },
            &theme,
            30,
        );

        assert!(error.contains(&Theme::fg(&theme.colors.error_fg)));
        assert!(notice.contains(&Theme::fg(&theme.colors.notice_fg)));
        assert!(!notice.contains(&Theme::fg(&theme.colors.error_fg)));
        assert_eq!(strip_ansi(&notice).trim(), "ℹ No books");
    }
}
