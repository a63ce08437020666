//! Loading spinner renderer.

use crate::ui::helpers::{position_cursor, push_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::LoaderInfo;

const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Renders the spinner and loading message centered on `row`.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_loader(out: &mut String, row: usize, loader: &LoaderInfo, theme: &Theme, cols: usize) -> usize {
    let glyph = FRAMES[loader.frame % FRAMES.len()];

    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(&theme.colors.loader_fg));
    push_centered(out, &format!("{glyph} {}", loader.message), cols);
    out.push_str(Theme::reset());
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;

    #[test]
    fn frames_cycle() {
        let render = |frame| {
            let mut out = String::new();
            let info = LoaderInfo {
                message: "Searching".to_string(),
                frame,
            };
            render_loader(&mut out, 3, &info, &Theme::default(), 20);
            strip_ansi(&out)
        };

        assert_eq!(render(0), "    ⠋ Searching     ");
        assert_ne!(render(0), render(1));
        assert_eq!(render(0), render(FRAMES.len()));
    }
}
